//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration (API key, endpoint, timeout)
//! - The weather provider abstraction and the OpenWeather client
//! - The bounded favorites store
//! - A session object owning favorites and the last searched city
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::{FavoritesError, FetchError};
pub use favorites::{Confirmation, FavoritesStore, MAX_FAVORITES};
pub use model::WeatherRecord;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use session::{RefreshReport, Session};
