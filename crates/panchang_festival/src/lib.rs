//! Festival resolution for the panchang engine.
//!
//! This crate provides:
//! - [`FestivalRule`] / [`SankrantiRule`] and the TOML [`FestivalCatalog`]
//! - Calculation-basis resolution (sunrise, pradosha, nishita, moonrise, ...)
//! - [`FestivalEngine`]: one civil year of festivals for a location and zone

pub mod basis;
pub mod catalog;
pub mod day_events;
pub mod engine;
pub mod error;
pub mod occurrence;
pub mod rule;

pub use basis::{BasisResolution, NIGHT_MUHURTAS, nishita_window, resolve_basis};
pub use catalog::FestivalCatalog;
pub use day_events::{DayEventTable, DayEvents};
pub use engine::{FestivalConfig, FestivalEngine};
pub use error::FestivalError;
pub use occurrence::{FestivalOccurrence, FestivalYear};
pub use rule::{CalculationBasis, CalculationType, FestivalRule, SankrantiRule};
