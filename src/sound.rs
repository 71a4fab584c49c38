//! Notification sounds
//!
//! terminal-notifier accepts any sound name from `/System/Library/Sounds`
//! (or `default`). The named variants cover the stock macOS set; anything
//! else is passed through as-is.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sound played when the notification is shown
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sound {
    /// The user's default alert sound
    ///
    /// Passed as a bare `default`. The notifier runs without a shell, so the
    /// single-quoted `'default'` some wrappers send would arrive with the
    /// quotes still attached.
    Default,
    Basso,
    Blow,
    Bottle,
    Frog,
    Funk,
    Glass,
    Hero,
    Morse,
    Ping,
    Pop,
    Purr,
    Sosumi,
    Tink,
    /// Any other sound name, not checked against the system set
    Custom(String),
}

impl Sound {
    /// All named sounds, in display order
    pub const NAMED: [Sound; 14] = [
        Sound::Default,
        Sound::Basso,
        Sound::Blow,
        Sound::Bottle,
        Sound::Frog,
        Sound::Funk,
        Sound::Glass,
        Sound::Hero,
        Sound::Morse,
        Sound::Ping,
        Sound::Pop,
        Sound::Purr,
        Sound::Sosumi,
        Sound::Tink,
    ];

    /// Name passed to `-sound`
    pub fn as_str(&self) -> &str {
        match self {
            Sound::Default => "default",
            Sound::Basso => "Basso",
            Sound::Blow => "Blow",
            Sound::Bottle => "Bottle",
            Sound::Frog => "Frog",
            Sound::Funk => "Funk",
            Sound::Glass => "Glass",
            Sound::Hero => "Hero",
            Sound::Morse => "Morse",
            Sound::Ping => "Ping",
            Sound::Pop => "Pop",
            Sound::Purr => "Purr",
            Sound::Sosumi => "Sosumi",
            Sound::Tink => "Tink",
            Sound::Custom(name) => name,
        }
    }

    /// True when there is nothing to pass to `-sound`
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sound {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::NAMED
            .into_iter()
            .find(|sound| sound.as_str() == s)
            .unwrap_or_else(|| Sound::Custom(s.to_string())))
    }
}

impl From<String> for Sound {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(sound) => sound,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Sound {
    fn from(s: &str) -> Self {
        Sound::from(s.to_string())
    }
}

impl From<Sound> for String {
    fn from(sound: Sound) -> Self {
        sound.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_sounds_parse_exact_names() {
        assert_eq!(Sound::from("Basso"), Sound::Basso);
        assert_eq!(Sound::from("Glass"), Sound::Glass);
        assert_eq!(Sound::from("default"), Sound::Default);
    }

    #[test]
    fn test_other_spellings_pass_through_verbatim() {
        assert_eq!(Sound::from("glass"), Sound::Custom("glass".to_string()));
        assert_eq!(Sound::from("glass").as_str(), "glass");
        assert_eq!(Sound::from("DEFAULT").as_str(), "DEFAULT");
    }

    #[test]
    fn test_unknown_sound_is_custom() {
        assert_eq!(
            Sound::from("Submarine"),
            Sound::Custom("Submarine".to_string())
        );
        assert_eq!(Sound::from("Submarine").as_str(), "Submarine");
    }

    #[test]
    fn test_default_renders_plain() {
        assert_eq!(Sound::Default.to_string(), "default");
    }

    #[test]
    fn test_empty_custom_is_empty() {
        assert!(Sound::from("").is_empty());
        assert!(!Sound::Tink.is_empty());
    }

    #[test]
    fn test_serde_uses_plain_names() {
        let json = serde_json::to_string(&Sound::Hero).unwrap();
        assert_eq!(json, "\"Hero\"");

        let parsed: Sound = serde_json::from_str("\"Purr\"").unwrap();
        assert_eq!(parsed, Sound::Purr);
    }
}
