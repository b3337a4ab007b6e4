//! Core library for the `cityweather` service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream weather provider client
//! - Shared domain model and derived-metric computation
//!
//! It is used by `cityweather-server`, but can also be reused by other
//! binaries or services.

pub mod client;
pub mod config;
pub mod daylight;
pub mod model;

pub use client::{FetchError, ForecastRange, VisualCrossingClient};
pub use config::Config;
pub use model::{CityWeather, CurrentConditions, DaySummary};
