//! Core library for the current-weather service.
//!
//! This crate defines:
//! - Shared domain models (coordinates, conditions, temperature bands)
//! - Abstraction over the upstream weather source, plus the OpenWeather adapter
//! - The domain service that classifies raw readings into bands
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod context;
pub mod model;
pub mod service;
pub mod source;

pub use context::RequestContext;
pub use model::{Coords, SourceWeather, TempBand, Weather};
pub use service::{CurrentWeather, ServiceError, WeatherService};
pub use source::{SourceError, WeatherSource, openweather::OpenWeatherSource};
