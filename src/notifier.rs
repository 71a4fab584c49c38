//! Notification pipeline
//!
//! Ties the pieces together: platform gate, argument building, optional
//! debug echo, then dispatch. All synchronous; one process per push.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::NotifierConfig;
use crate::dispatch::Dispatcher;
use crate::errors::{NotifyError, Result};
use crate::notification::Notification;
use crate::platform::{HostPlatform, Platform};
use crate::HeraldConfig;

/// Sends notifications through a configured terminal-notifier
#[derive(Debug, Clone)]
pub struct Notifier {
    dispatcher: Dispatcher,
}

impl Notifier {
    /// Create a notifier for an explicit executable and platform
    pub fn new(executable: impl Into<PathBuf>, platform: Arc<dyn Platform>) -> Self {
        Self {
            dispatcher: Dispatcher::new(executable, platform),
        }
    }

    /// Create a notifier from config, running on the host platform
    pub fn from_config(config: &NotifierConfig) -> Self {
        Self::new(config.executable.clone(), Arc::new(HostPlatform))
    }

    /// Load the default config file and use the host platform
    pub fn from_host_config() -> Self {
        Self::from_config(&HeraldConfig::load().notifier)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Validate, build, and dispatch a notification
    ///
    /// On a platform without terminal-notifier nothing is built or run and
    /// `Ok(())` is returned, so callers need no platform checks of their own.
    pub fn push(&self, notification: &Notification) -> Result<()> {
        if !self.dispatcher.is_supported() {
            tracing::warn!(
                platform = %self.dispatcher.platform().name(),
                "OS does not support terminal-notifier, skipping notification"
            );
            return Ok(());
        }

        let args = notification.build_args()?;

        if notification.debug {
            self.echo(&args);
        }

        tracing::info!(
            executable = %self.dispatcher.executable().display(),
            group = ?notification.group,
            "Pushing notification"
        );
        self.dispatcher.dispatch(&args)
    }

    /// Remove every notification previously posted with `group`
    pub fn remove(&self, group: &str) -> Result<()> {
        if group.is_empty() {
            return Err(NotifyError::Validation("group is required"));
        }
        if !self.dispatcher.is_supported() {
            tracing::warn!(
                platform = %self.dispatcher.platform().name(),
                "OS does not support terminal-notifier, skipping removal"
            );
            return Ok(());
        }

        tracing::info!(group = %group, "Removing notifications");
        self.dispatcher
            .dispatch(&["-remove".to_string(), group.to_string()])
    }

    /// Write the command line to stderr
    fn echo(&self, args: &[String]) {
        eprintln!("{}", self.command_line(args));
    }

    /// Executable path on one line, the argument list on the next
    fn command_line(&self, args: &[String]) -> String {
        format!("{}\n{args:?}", self.dispatcher.executable().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixedPlatform;
    use tempfile::TempDir;

    #[test]
    fn test_unsupported_platform_skips_even_invalid_requests() {
        let notifier = Notifier::new(
            "/missing/terminal-notifier",
            Arc::new(FixedPlatform::unsupported()),
        );
        assert!(notifier.push(&Notification::new("")).is_ok());
        assert!(notifier.remove("builds").is_ok());
    }

    #[test]
    fn test_empty_message_never_dispatches() {
        let tmp = TempDir::new().unwrap();
        // The executable does not exist, so reaching dispatch would give an
        // Execution error instead of Validation.
        let notifier = Notifier::new(
            tmp.path().join("missing"),
            Arc::new(FixedPlatform::supported()),
        );
        let err = notifier.push(&Notification::new("")).unwrap_err();
        assert!(matches!(err, NotifyError::Validation(_)));
    }

    #[test]
    fn test_remove_requires_group() {
        let notifier = Notifier::new("terminal-notifier", Arc::new(FixedPlatform::supported()));
        assert!(matches!(
            notifier.remove(""),
            Err(NotifyError::Validation("group is required"))
        ));
    }

    #[test]
    fn test_debug_echo_shows_executable_then_args() {
        let notifier = Notifier::new(
            "/usr/local/bin/terminal-notifier",
            Arc::new(FixedPlatform::supported()),
        );
        let args = Notification::new("done")
            .with_title("CI")
            .build_args()
            .unwrap();

        assert_eq!(
            notifier.command_line(&args),
            "/usr/local/bin/terminal-notifier\n[\"-message\", \"done\", \"-title\", \"CI\"]"
        );
    }

    #[test]
    fn test_from_config_uses_executable() {
        let config = NotifierConfig {
            executable: PathBuf::from("/opt/homebrew/bin/terminal-notifier"),
        };
        let notifier = Notifier::from_config(&config);
        assert_eq!(
            notifier.dispatcher().executable(),
            std::path::Path::new("/opt/homebrew/bin/terminal-notifier")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_push_runs_stub_with_built_args() {
        use crate::dispatch::tests::stub_script;

        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("args.log");
        let script = stub_script(
            &tmp,
            "notifier",
            &format!("printf '%s\\n' \"$@\" > '{}'", log.display()),
        );

        let notifier = Notifier::new(&script, Arc::new(FixedPlatform::supported()));
        let n = Notification::new("done")
            .with_title("herald")
            .with_link("com.apple.Terminal")
            .with_debug(true);
        notifier.push(&n).unwrap();

        let recorded = std::fs::read_to_string(&log).unwrap();
        assert_eq!(
            recorded.lines().collect::<Vec<_>>(),
            vec![
                "-message",
                "done",
                "-title",
                "herald",
                "-open",
                "com.apple.Terminal",
                "-activate",
                "com.apple.Terminal",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_sends_only_remove_flag() {
        use crate::dispatch::tests::stub_script;

        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("args.log");
        let script = stub_script(
            &tmp,
            "notifier",
            &format!("printf '%s\\n' \"$@\" > '{}'", log.display()),
        );

        Notifier::new(&script, Arc::new(FixedPlatform::supported()))
            .remove("builds")
            .unwrap();

        let recorded = std::fs::read_to_string(&log).unwrap();
        assert_eq!(recorded.lines().collect::<Vec<_>>(), vec!["-remove", "builds"]);
    }
}
