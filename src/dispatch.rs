//! Running the terminal-notifier executable
//!
//! Uses a direct `Command` invocation, the same way the other CLI
//! integrations do: no shell, arguments passed as-is, block until exit.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::errors::{ExecutionFailure, NotifyError, Result};
use crate::platform::Platform;

/// Runs the notifier program with a prepared argument list
#[derive(Clone)]
pub struct Dispatcher {
    /// Path to the terminal-notifier executable
    executable: PathBuf,
    platform: Arc<dyn Platform>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("executable", &self.executable)
            .field("platform", &self.platform.name())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(executable: impl Into<PathBuf>, platform: Arc<dyn Platform>) -> Self {
        Self {
            executable: executable.into(),
            platform,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    /// True if this dispatcher will actually run anything
    pub fn is_supported(&self) -> bool {
        self.platform.supports_notifier()
    }

    /// Run the notifier and wait for it
    ///
    /// On an unsupported platform this logs and returns `Ok(())` without
    /// spawning anything. Stdout is discarded; stderr is kept for errors.
    pub fn dispatch(&self, args: &[String]) -> Result<()> {
        if !self.is_supported() {
            tracing::warn!(
                platform = %self.platform.name(),
                "OS does not support terminal-notifier, skipping notification"
            );
            return Ok(());
        }

        let output = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| self.execution_error(ExecutionFailure::Spawn(e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(self.execution_error(ExecutionFailure::Status {
                status: output.status,
                stderr,
            }));
        }

        tracing::debug!(
            executable = %self.executable.display(),
            arg_count = args.len(),
            "Dispatched notification"
        );
        Ok(())
    }

    fn execution_error(&self, failure: ExecutionFailure) -> NotifyError {
        NotifyError::Execution {
            executable: self.executable.clone(),
            failure,
        }
    }
}
