/// Placeholder used for text fields the provider did not send.
pub const UNKNOWN: &str = "Unknown";

/// Canonical weather record for one city, independent of the provider's JSON shape.
///
/// Numeric fields are `None` when the provider omitted them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub city: String,
    pub country: String,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub description: String,
    pub wind_speed: Option<f64>,
}

impl WeatherRecord {
    /// Case-insensitive key used by the favorites store.
    pub fn key(&self) -> String {
        self.city.to_lowercase()
    }

    pub fn has_city(&self) -> bool {
        !self.city.trim().is_empty()
    }
}
