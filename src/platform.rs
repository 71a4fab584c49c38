//! Host platform capability
//!
//! terminal-notifier only exists on macOS. Rather than checking the OS
//! inline, the pipeline asks a `Platform` so tests can pin the answer.

/// Whether the current platform can run the notifier
pub trait Platform: Send + Sync {
    /// Short platform name used in diagnostics (e.g. "macos", "linux")
    fn name(&self) -> &str;

    /// True if notifications can be dispatched here
    fn supports_notifier(&self) -> bool;
}

/// The platform this binary is running on
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn name(&self) -> &str {
        std::env::consts::OS
    }

    fn supports_notifier(&self) -> bool {
        self.name() == "macos"
    }
}

/// A platform with a fixed answer, for tests and forced dispatch
#[derive(Debug, Clone)]
pub struct FixedPlatform {
    name: String,
    supported: bool,
}

impl FixedPlatform {
    pub fn new(name: impl Into<String>, supported: bool) -> Self {
        Self {
            name: name.into(),
            supported,
        }
    }

    /// A platform that always dispatches
    pub fn supported() -> Self {
        Self::new("fixed-supported", true)
    }

    /// A platform that never dispatches
    pub fn unsupported() -> Self {
        Self::new("fixed-unsupported", false)
    }
}

impl Platform for FixedPlatform {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_notifier(&self) -> bool {
        self.supported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_platform_matches_target_os() {
        let host = HostPlatform;
        assert_eq!(host.supports_notifier(), cfg!(target_os = "macos"));
        assert_eq!(host.name(), std::env::consts::OS);
    }

    #[test]
    fn test_fixed_platform() {
        assert!(FixedPlatform::supported().supports_notifier());
        assert!(!FixedPlatform::unsupported().supports_notifier());
        assert_eq!(FixedPlatform::new("plan9", false).name(), "plan9");
    }
}
