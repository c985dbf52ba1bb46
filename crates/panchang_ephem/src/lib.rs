//! Ephemeris providers for the panchang engine.
//!
//! This crate provides:
//! - The [`Ephemeris`] trait: Sun/Moon longitudes, ayanamsha, rise/set
//! - [`AnalyticEphemeris`]: kernel-free Meeus/ELP-2000 theory with ΔT
//! - [`LinearEphemeris`]: uniform mean motions for deterministic tests
//! - Observer location and rise/set configuration types

pub mod analytic;
pub mod error;
pub mod linear;
pub mod provider;
pub mod riseset_types;

pub use analytic::AnalyticEphemeris;
pub use error::EphemerisError;
pub use linear::{LinearEphemeris, MOON_MEAN_RATE, SUN_MEAN_RATE};
pub use provider::Ephemeris;
pub use riseset_types::{GeoLocation, RiseSetConfig, RiseSetEvent, RiseSetResult};
