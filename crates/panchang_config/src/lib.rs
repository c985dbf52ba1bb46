//! Configuration for the panchang engine.
//!
//! [`CalendarConfig`] is read from TOML with a default for every field and
//! turned into the provider, search and festival configs the engine takes.

pub mod calendar;
pub mod error;

pub use calendar::{CalendarConfig, FestivalSection, LocationConfig};
pub use error::ConfigError;
