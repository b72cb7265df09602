//! Levels at which generated interceptors log

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Log levels for logged method interceptors
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    #[serde(alias = "trace")]
    Verbose = 0,
    #[serde(alias = "debug")]
    Debugging = 1,
    #[serde(alias = "info")]
    Information = 2,
    #[serde(alias = "warn")]
    Warning = 3,
    Error = 4,
    Off = 5,
}

impl Level {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Verbose,
            1 => Level::Debugging,
            2 => Level::Information,
            3 => Level::Warning,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    /// The tracing level events are emitted at, `None` for [`Level::Off`]
    pub fn to_tracing(self) -> Option<tracing::Level> {
        match self {
            Level::Verbose => Some(tracing::Level::TRACE),
            Level::Debugging => Some(tracing::Level::DEBUG),
            Level::Information => Some(tracing::Level::INFO),
            Level::Warning => Some(tracing::Level::WARN),
            Level::Error => Some(tracing::Level::ERROR),
            Level::Off => None,
        }
    }

    /// Lowercase name as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Verbose => "verbose",
            Level::Debugging => "debugging",
            Level::Information => "information",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Verbose => write!(f, "Verbose"),
            Level::Debugging => write!(f, "Debugging"),
            Level::Information => write!(f, "Information"),
            Level::Warning => write!(f, "Warning"),
            Level::Error => write!(f, "Error"),
            Level::Off => write!(f, "Off"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verbose" | "trace" => Ok(Level::Verbose),
            "debugging" | "debug" => Ok(Level::Debugging),
            "information" | "info" => Ok(Level::Information),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "off" => Ok(Level::Off),
            other => Err(format!(
                "unknown level '{other}', expected one of verbose, debugging, information, warning, error, off"
            )),
        }
    }
}
