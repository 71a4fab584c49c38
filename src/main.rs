// Clippy configuration: enable pedantic but allow overly strict lints
#![allow(clippy::missing_errors_doc)] // Internal functions don't need # Errors docs
#![allow(clippy::module_name_repetitions)] // e.g., NotifierConfig in config module is fine
#![allow(clippy::doc_markdown)] // Don't require backticks around macOS, JSON, etc.

//! Herald - macOS desktop notifications from the command line
//!
//! Usage:
//!   herald send "Build finished" --title CI --sound Glass
//!   herald send --json request.json --dry-run
//!   herald remove ci-builds

mod cli;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, SendArgs};
use color_eyre::eyre::{Result, WrapErr};
use herald::{HeraldConfig, Notification, Notifier, Sound};
use std::io::Read;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Read a notification request from a JSON file, or stdin for "-"
fn read_json_request(path: &Path) -> Result<Notification> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .wrap_err("Failed to read notification JSON from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&content).wrap_err("Invalid notification JSON")
}

fn handle_send(args: &SendArgs, config: &HeraldConfig, notifier: &Notifier) -> Result<()> {
    let base = match &args.json {
        Some(path) => read_json_request(path)?,
        None => Notification::default(),
    };
    let mut notification = args.apply_to(base);
    config.defaults.apply(&mut notification);

    if args.dry_run {
        let built = notification.build_args()?;
        println!("{}", serde_json::to_string(&built)?);
        return Ok(());
    }

    notifier
        .push(&notification)
        .wrap_err("Failed to push notification")
}

fn init_logging(level: &str) {
    // Accept either a bare level or a full filter directive from RUST_LOG
    let log_filter = if level.contains('=') {
        level.to_string()
    } else {
        format!("herald={level}")
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli.log_level);

    tracing::debug!("Starting herald v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => HeraldConfig::load_from_path(path.clone()),
        None => HeraldConfig::load(),
    };
    if let Some(executable) = &cli.notifier {
        config.notifier.executable.clone_from(executable);
    }
    tracing::debug!("Notifier executable: {:?}", config.notifier.executable);

    let notifier = Notifier::from_config(&config.notifier);

    match cli.command {
        Commands::Send(args) => handle_send(&args, &config, &notifier)?,
        Commands::Remove { group } => notifier
            .remove(&group)
            .wrap_err_with(|| format!("Failed to remove group '{group}'"))?,
        Commands::Sounds => {
            for sound in Sound::NAMED {
                println!("{sound}");
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => println!("{}", HeraldConfig::default_path().display()),
            ConfigAction::Example => print!("{}", HeraldConfig::example()),
        },
        Commands::Completions { shell } => cli::print_completions(shell),
    }

    Ok(())
}
