//! CLI argument parsing
//!
//! Uses clap for argument parsing with derive macros.

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use herald::{Notification, Sound};
use std::io;
use std::path::PathBuf;

/// Dispatch macOS desktop notifications through terminal-notifier
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Path to the terminal-notifier executable (overrides config)
    #[arg(long, env = "HERALD_NOTIFIER", global = true)]
    pub notifier: Option<PathBuf>,

    /// Config file (default: <config dir>/herald/config.toml)
    #[arg(short, long, env = "HERALD_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a notification
    Send(SendArgs),

    /// Remove notifications previously posted with a group id
    Remove {
        /// Group id passed as -group when the notifications were sent
        group: String,
    },

    /// List the named system sounds
    Sounds,

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the default config file location
    Path,
    /// Print an example config file
    Example,
}

#[derive(Args, Debug, Default)]
pub struct SendArgs {
    /// Notification body (required unless --json provides it)
    #[arg(required_unless_present = "json")]
    pub message: Option<String>,

    /// Read the notification from a JSON file ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(long)]
    pub subtitle: Option<String>,

    /// Sound name (e.g. default, Glass, Submarine)
    #[arg(short, long)]
    pub sound: Option<String>,

    /// URL to open, or bundle id (com.…) to activate, on click
    #[arg(short = 'o', long)]
    pub link: Option<String>,

    /// Bundle id to show the notification as (must start with com.)
    #[arg(long)]
    pub sender: Option<String>,

    /// Group id; a later notification with the same group replaces this one
    #[arg(short, long)]
    pub group: Option<String>,

    /// Group id of an earlier notification to remove
    #[arg(long)]
    pub remove: Option<String>,

    #[arg(long, value_name = "PATH")]
    pub app_icon: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub content_image: Option<PathBuf>,

    /// Close the notification after this many seconds
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub timeout: Option<i64>,

    /// Print the notifier path and arguments before running it
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Print the argument list as JSON instead of running the notifier
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl SendArgs {
    /// Overlay the flags given on the command line onto `base`
    pub fn apply_to(&self, mut base: Notification) -> Notification {
        if let Some(message) = &self.message {
            base.message.clone_from(message);
        }
        set(&mut base.title, &self.title);
        set(&mut base.subtitle, &self.subtitle);
        set(&mut base.link, &self.link);
        set(&mut base.sender, &self.sender);
        set(&mut base.group, &self.group);
        set(&mut base.remove, &self.remove);
        if let Some(sound) = &self.sound {
            base.sound = Some(Sound::from(sound.as_str()));
        }
        if let Some(icon) = &self.app_icon {
            base.app_icon = Some(icon.clone());
        }
        if let Some(image) = &self.content_image {
            base.content_image = Some(image.clone());
        }
        if let Some(timeout) = self.timeout {
            base.timeout_seconds = timeout;
        }
        base.debug |= self.debug;
        base
    }
}

fn set(field: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        field.clone_from(value);
    }
}

/// Generate shell completions and print to stdout
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "herald", &mut io::stdout());
}
