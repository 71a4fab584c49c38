//! Herald - macOS desktop notifications via terminal-notifier
//!
//! Builds a `terminal-notifier` command line from a [`Notification`] and
//! runs it. On any other OS pushing is a logged no-op.
//!
//! ```no_run
//! use herald::{Notification, Sound};
//!
//! Notification::new("Build finished")
//!     .with_title("CI")
//!     .with_sound(Sound::Glass)
//!     .with_link("https://example.com/builds/42")
//!     .push()?;
//! # Ok::<(), herald::NotifyError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod notification;
pub mod notifier;
pub mod platform;
pub mod sound;

pub use config::{HeraldConfig, NotifierConfig};
pub use dispatch::Dispatcher;
pub use errors::{ExecutionFailure, NotifyError, Result};
pub use notification::Notification;
pub use notifier::Notifier;
pub use platform::{FixedPlatform, HostPlatform, Platform};
pub use sound::Sound;
