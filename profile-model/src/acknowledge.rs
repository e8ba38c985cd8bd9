use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// What the client does to the page once an update has been accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum AcknowledgePolicy {
    /// Echo the submitted values into the display elements, clear the
    /// inputs and announce the update.
    #[default]
    InlineEcho,
    /// Only announce that a reload is needed to see the change.
    ReloadNotice,
}

impl AcknowledgePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcknowledgePolicy::InlineEcho => "inline-echo",
            AcknowledgePolicy::ReloadNotice => "reload-notice",
        }
    }
}

impl fmt::Display for AcknowledgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcknowledgePolicy {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "inline-echo" | "inline" | "echo" => {
                Ok(AcknowledgePolicy::InlineEcho)
            }
            "reload-notice" | "reload" => Ok(AcknowledgePolicy::ReloadNotice),
            _ => Err(ModelError::UnknownAcknowledgePolicy(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_env_style_values() {
        assert_eq!(
            "inline_echo".parse::<AcknowledgePolicy>(),
            Ok(AcknowledgePolicy::InlineEcho)
        );
        assert_eq!(
            " Reload-Notice ".parse::<AcknowledgePolicy>(),
            Ok(AcknowledgePolicy::ReloadNotice)
        );
        assert!(matches!(
            "banner".parse::<AcknowledgePolicy>(),
            Err(ModelError::UnknownAcknowledgePolicy(raw)) if raw == "banner"
        ));
    }

    #[test]
    fn defaults_to_inline_echo() {
        assert_eq!(AcknowledgePolicy::default(), AcknowledgePolicy::InlineEcho);
        assert_eq!(AcknowledgePolicy::default().to_string(), "inline-echo");
    }
}
