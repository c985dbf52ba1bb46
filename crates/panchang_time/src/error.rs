//! Error types for time conversions and timezone resolution.

/// Errors from Julian-day conversion, civil-time validation, or zone lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TimeError {
    /// A Julian Day that is NaN or infinite.
    #[error("invalid instant: julian day {0} is not finite")]
    InvalidInstant(f64),
    /// A finite Julian Day outside the range chrono can represent.
    #[error("julian day {0} is outside the representable date range")]
    OutOfRange(f64),
    /// Civil fields that do not name a real date/time.
    #[error("invalid civil date/time: {0}")]
    InvalidCivil(String),
    /// Zone string that is neither an IANA name nor an offset.
    #[error("unknown time zone: {0}")]
    UnknownZone(String),
}
