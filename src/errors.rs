//! Structured error types for herald
//!
//! Uses thiserror for ergonomic error definitions with automatic Display
//! and Error trait implementations.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// All possible errors when pushing a notification
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Request is missing required fields or produced no flags
    #[error("Invalid notification: {0}")]
    Validation(&'static str),

    /// An icon or image path could not be made absolute
    #[error("Could not resolve image path of image: {}", path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The notifier program failed to launch or exited abnormally
    #[error("Notifier '{}' failed: {failure}", executable.display())]
    Execution {
        executable: PathBuf,
        #[source]
        failure: ExecutionFailure,
    },
}

/// Why running the notifier program failed
#[derive(Error, Debug)]
pub enum ExecutionFailure {
    /// Process could not be spawned (missing binary, permissions, ...)
    #[error("could not launch: {0}")]
    Spawn(#[from] std::io::Error),

    /// Process ran but exited with a non-zero status
    #[error("exited with {status}{}", stderr_suffix(stderr))]
    Status { status: ExitStatus, stderr: String },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Convenience Result type using NotifyError
pub type Result<T> = std::result::Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = NotifyError::Validation("message is required");
        assert_eq!(err.to_string(), "Invalid notification: message is required");
    }

    #[test]
    fn test_path_resolution_names_path() {
        let err = NotifyError::PathResolution {
            path: PathBuf::from("icons/app.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no cwd"),
        };
        assert!(err.to_string().contains("icons/app.png"));
    }

    #[test]
    fn test_spawn_failure_display() {
        let err = NotifyError::Execution {
            executable: PathBuf::from("/nope/terminal-notifier"),
            failure: ExecutionFailure::Spawn(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file or directory",
            )),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/terminal-notifier"));
        assert!(msg.contains("could not launch"));
    }

    #[test]
    fn test_stderr_suffix_skips_blank() {
        assert_eq!(stderr_suffix("  \n"), "");
        assert_eq!(stderr_suffix("boom\n"), ": boom");
    }
}
