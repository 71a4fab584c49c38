//! Notification requests and terminal-notifier argument building
//!
//! A `Notification` is filled in by the caller, turned into an ordered
//! flag/value list by [`Notification::build_args`], and handed to the
//! dispatcher. Flag order is fixed so the same request always produces the
//! same command line.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{NotifyError, Result};
use crate::notifier::Notifier;
use crate::sound::Sound;

/// Prefix that marks a reverse-DNS bundle identifier (matched case-insensitively)
const BUNDLE_ID_PREFIX: &str = "com.";

/// A single notification request
///
/// Only `message` is required. Empty strings in optional fields are treated
/// the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<Sound>,
    /// URL to open on click, or a bundle id (`com.…`) to activate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Bundle id to impersonate; ignored unless it starts with `com.`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Notifications sharing a group replace each other
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Group id of an earlier notification to remove
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_icon: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_image: Option<PathBuf>,
    /// Seconds before the notification closes itself; ignored unless > 0
    pub timeout_seconds: i64,
    /// Echo the command line to stderr before dispatch
    pub debug: bool,
}

impl Notification {
    /// Create a request with only the message set
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_sound(mut self, sound: impl Into<Sound>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_remove(mut self, remove: impl Into<String>) -> Self {
        self.remove = Some(remove.into());
        self
    }

    pub fn with_app_icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.app_icon = Some(path.into());
        self
    }

    pub fn with_content_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.content_image = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, seconds: i64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build the terminal-notifier argument list
    ///
    /// Always starts with `-message <message>`. Fails without a partial
    /// result if the message is empty or an image path cannot be resolved.
    pub fn build_args(&self) -> Result<Vec<String>> {
        self.build_args_with(|path| std::path::absolute(path))
    }

    /// `build_args` with the path-absolutizing step supplied by the caller
    fn build_args_with<F>(&self, absolute: F) -> Result<Vec<String>>
    where
        F: Fn(&Path) -> io::Result<PathBuf>,
    {
        let mut args: Vec<String> = Vec::new();

        if self.message.is_empty() {
            return Err(NotifyError::Validation("message is required"));
        }
        push_flag(&mut args, "-message", &self.message);

        if let Some(title) = non_empty(self.title.as_deref()) {
            push_flag(&mut args, "-title", title);
        }
        if let Some(subtitle) = non_empty(self.subtitle.as_deref()) {
            push_flag(&mut args, "-subtitle", subtitle);
        }
        if let Some(sound) = self.sound.as_ref().filter(|s| !s.is_empty()) {
            push_flag(&mut args, "-sound", sound.as_str());
        }
        if let Some(group) = non_empty(self.group.as_deref()) {
            push_flag(&mut args, "-group", group);
        }
        if let Some(remove) = non_empty(self.remove.as_deref()) {
            push_flag(&mut args, "-remove", remove);
        }

        if let Some(icon) = non_empty_path(self.app_icon.as_deref()) {
            let resolved = resolve_image_path(icon, &absolute)?;
            push_flag(&mut args, "-appIcon", &resolved);
        }
        if let Some(image) = non_empty_path(self.content_image.as_deref()) {
            let resolved = resolve_image_path(image, &absolute)?;
            push_flag(&mut args, "-contentImage", &resolved);
        }

        // An unparseable link counts as no link at all. A bundle id parses as
        // a relative reference, so it gets both -open and -activate and the
        // notifier decides which wins.
        let link = non_empty(self.link.as_deref()).and_then(interpret_link);
        if let Some(link) = link {
            push_flag(&mut args, "-open", link);
        }
        if let Some(link) = link.filter(|l| is_bundle_id(l)) {
            push_flag(&mut args, "-activate", link);
        }

        if let Some(sender) = self.sender.as_deref().filter(|s| is_bundle_id(s)) {
            push_flag(&mut args, "-sender", sender);
        }

        if args.is_empty() {
            return Err(NotifyError::Validation("at least a message is required"));
        }

        if self.timeout_seconds > 0 {
            push_flag(&mut args, "-timeout", &self.timeout_seconds.to_string());
        }

        tracing::trace!(args = ?args, "Built notifier arguments");
        Ok(args)
    }

    /// Validate, build, and dispatch using the default config on this host
    ///
    /// Silently does nothing on platforms without terminal-notifier.
    pub fn push(&self) -> Result<()> {
        Notifier::from_host_config().push(self)
    }
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_path(value: Option<&Path>) -> Option<&Path> {
    value.filter(|p| !p.as_os_str().is_empty())
}

/// Reverse-DNS bundle identifier check, e.g. `com.apple.Terminal`
pub fn is_bundle_id(value: &str) -> bool {
    value
        .get(..BUNDLE_ID_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(BUNDLE_ID_PREFIX))
}

/// Returns the link if it is an absolute URL or a valid relative reference
fn interpret_link(link: &str) -> Option<&str> {
    if let Some(reason) = malformed_link(link) {
        tracing::debug!(link = ?link, reason, "Ignoring unparseable link");
        return None;
    }

    match Url::parse(link) {
        Ok(_) => Some(link),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://localhost/").ok()?;
            base.join(link).ok().map(|_| link)
        }
        Err(e) => {
            tracing::debug!(link = %link, error = %e, "Ignoring unparseable link");
            None
        }
    }
}

/// Shapes the `url` crate tolerates but that are not well-formed links:
/// control characters, an empty scheme, and bad `%` escapes anywhere
/// except the query string.
fn malformed_link(link: &str) -> Option<&'static str> {
    if link.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Some("invalid control character");
    }
    if link.starts_with(':') {
        return Some("missing protocol scheme");
    }

    let (rest, fragment) = link.split_once('#').unwrap_or((link, ""));
    let before_query = rest.split_once('?').map_or(rest, |(head, _)| head);
    if !valid_escapes(before_query) || !valid_escapes(fragment) {
        return Some("invalid URL escape");
    }
    None
}

/// Every `%` must be followed by two hex digits
fn valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Make an image path absolute against the current directory
///
/// Purely lexical: the file does not have to exist, and `.`/`..`
/// components are folded away.
fn resolve_image_path<F>(path: &Path, absolute: F) -> Result<String>
where
    F: Fn(&Path) -> io::Result<PathBuf>,
{
    let absolute = absolute(path).map_err(|source| NotifyError::PathResolution {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize(&absolute).to_string_lossy().into_owned())
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, matching `cd /..`
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
