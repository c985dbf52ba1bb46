//! Error types for festival resolution.

use std::path::PathBuf;

use panchang_ephem::EphemerisError;
use panchang_search::SearchError;
use panchang_time::TimeError;

/// Errors from catalog loading and year resolution.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FestivalError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// A catalog entry failed validation.
    #[error("invalid catalog entry `{id}`: {reason}")]
    Catalog { id: String, reason: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("catalog parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FestivalError {
    pub(crate) fn catalog(id: &str, reason: impl Into<String>) -> Self {
        Self::Catalog {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
