use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::notification::Notification;
use crate::sound::Sound;

/// Homebrew install location of terminal-notifier
pub const TERMINAL_NOTIFIER_PATH: &str =
    "/usr/local/Cellar/terminal-notifier/1.7.1/bin/terminal-notifier";

/// Application configuration loaded from file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HeraldConfig {
    /// Notifier program settings
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Values applied to requests that leave them unset
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Notifier program settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Path to the terminal-notifier executable
    #[serde(default = "default_executable")]
    pub executable: PathBuf,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
        }
    }
}

/// The executable is only ever run on macOS; elsewhere fall back to a bare
/// name so error messages still make sense.
fn default_executable() -> PathBuf {
    if cfg!(target_os = "macos") {
        PathBuf::from(TERMINAL_NOTIFIER_PATH)
    } else {
        PathBuf::from("terminal-notifier")
    }
}

/// Default request fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub sound: Option<Sound>,

    /// Bundle id shown as the sender (e.g. "com.apple.Terminal")
    #[serde(default)]
    pub sender: Option<String>,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub app_icon: Option<PathBuf>,

    #[serde(default)]
    pub timeout_seconds: Option<i64>,
}

impl DefaultsConfig {
    /// Fill any unset field of `notification` from these defaults
    pub fn apply(&self, notification: &mut Notification) {
        fill(&mut notification.title, &self.title);
        fill(&mut notification.sender, &self.sender);
        fill(&mut notification.group, &self.group);
        if notification.sound.as_ref().is_none_or(Sound::is_empty) {
            notification.sound.clone_from(&self.sound);
        }
        if notification
            .app_icon
            .as_ref()
            .is_none_or(|p| p.as_os_str().is_empty())
        {
            notification.app_icon.clone_from(&self.app_icon);
        }
        if notification.timeout_seconds <= 0 {
            if let Some(seconds) = self.timeout_seconds {
                notification.timeout_seconds = seconds;
            }
        }
    }
}

fn fill(field: &mut Option<String>, default: &Option<String>) {
    if field.as_deref().is_none_or(str::is_empty) {
        field.clone_from(default);
    }
}

impl HeraldConfig {
    /// Load configuration from default path (~/.config/herald/config.toml)
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Get the default configuration path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new().map_or_else(
            || PathBuf::from("~/.config/herald/config.toml"),
            |dirs| dirs.config_dir().join("herald").join("config.toml"),
        )
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: PathBuf) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Generate example configuration file content
    pub fn example() -> String {
        format!(
            r#"# Herald Configuration
# Place this file at ~/.config/herald/config.toml (Linux)
# or ~/Library/Application Support/herald/config.toml (macOS)

[notifier]
# Path to the terminal-notifier executable
executable = "{TERMINAL_NOTIFIER_PATH}"

[defaults]
# Applied when a notification leaves the field unset
# title = "herald"
# sound = "default"
# sender = "com.apple.Terminal"
# group = "herald"
# app_icon = "~/icons/herald.png"
# timeout_seconds = 10
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = HeraldConfig::load_from_path(tmp.path().join("nope.toml"));
        assert_eq!(config, HeraldConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[notifier]
executable = "/opt/homebrew/bin/terminal-notifier"

[defaults]
sound = "Glass"
sender = "com.apple.Terminal"
timeout_seconds = 7
"#,
        )
        .unwrap();

        let config = HeraldConfig::load_from_path(path);
        assert_eq!(
            config.notifier.executable,
            PathBuf::from("/opt/homebrew/bin/terminal-notifier")
        );
        assert_eq!(config.defaults.sound, Some(Sound::Glass));
        assert_eq!(config.defaults.sender.as_deref(), Some("com.apple.Terminal"));
        assert_eq!(config.defaults.timeout_seconds, Some(7));
        assert_eq!(config.defaults.title, None);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[notifier\nexecutable = 3").unwrap();
        assert_eq!(HeraldConfig::load_from_path(path), HeraldConfig::default());
    }

    #[test]
    fn test_example_parses() {
        let config: HeraldConfig = toml::from_str(&HeraldConfig::example()).unwrap();
        assert_eq!(
            config.notifier.executable,
            PathBuf::from(TERMINAL_NOTIFIER_PATH)
        );
        assert_eq!(config.defaults, DefaultsConfig::default());
    }

    #[test]
    fn test_defaults_fill_only_unset_fields() {
        let defaults = DefaultsConfig {
            title: Some("herald".into()),
            sound: Some(Sound::Ping),
            sender: Some("com.apple.Terminal".into()),
            group: None,
            app_icon: None,
            timeout_seconds: Some(9),
        };

        let mut n = Notification::new("hi").with_title("mine").with_timeout(2);
        defaults.apply(&mut n);

        assert_eq!(n.title.as_deref(), Some("mine"));
        assert_eq!(n.sound, Some(Sound::Ping));
        assert_eq!(n.sender.as_deref(), Some("com.apple.Terminal"));
        assert_eq!(n.group, None);
        assert_eq!(n.timeout_seconds, 2);

        let mut empty_title = Notification::new("hi").with_title("");
        defaults.apply(&mut empty_title);
        assert_eq!(empty_title.title.as_deref(), Some("herald"));
        assert_eq!(empty_title.timeout_seconds, 9);
    }
}
