//! Error types for configuration loading.

use std::path::PathBuf;

use panchang_ephem::EphemerisError;
use panchang_time::TimeError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// A section holds values the engine cannot run with.
    #[error("invalid [{section}] section: {reason}")]
    Invalid {
        section: &'static str,
        reason: String,
    },
    #[error("invalid location: {0}")]
    Location(#[from] EphemerisError),
    #[error("invalid timezone: {0}")]
    Time(#[from] TimeError),
}

impl ConfigError {
    pub(crate) fn invalid(section: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            section,
            reason: reason.into(),
        }
    }
}
