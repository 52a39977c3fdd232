use std::fmt;

use tracing::debug;

use crate::{error::FavoritesError, model::WeatherRecord};

/// Maximum number of distinct cities kept as favorites.
pub const MAX_FAVORITES: usize = 3;

/// Success message returned by a favorites mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    message: String,
}

impl Confirmation {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Bounded, insertion-ordered collection of weather records keyed by lowercase city name.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    capacity: usize,
    entries: Vec<(String, WeatherRecord)>,
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_FAVORITES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, entries: Vec::with_capacity(capacity) }
    }

    /// Add a city that is not stored yet. Existing cities are rejected, not refreshed.
    pub fn insert_new(&mut self, record: &WeatherRecord) -> Result<Confirmation, FavoritesError> {
        if !record.has_city() {
            return Err(FavoritesError::EmptyInput);
        }

        let key = record.key();
        if self.position(&key).is_some() {
            return Err(FavoritesError::AlreadyExists(record.city.clone()));
        }

        if self.is_full() {
            return Err(FavoritesError::CapacityExceeded(self.capacity));
        }

        debug!(city = %record.city, "adding favorite");
        self.entries.push((key, record.clone()));
        Ok(Confirmation::new(format!("'{}' added to favorites", record.city)))
    }

    /// Overwrite a stored city in place, or add it when there is room.
    pub fn upsert(&mut self, record: &WeatherRecord) -> Result<Confirmation, FavoritesError> {
        if !record.has_city() {
            return Err(FavoritesError::EmptyInput);
        }

        match self.position(&record.key()) {
            Some(idx) => {
                debug!(city = %record.city, "refreshing favorite");
                self.entries[idx].1 = record.clone();
                Ok(Confirmation::new(format!("'{}' refreshed", record.city)))
            }
            None => self.insert_new(record),
        }
    }

    pub fn remove(&mut self, city: &str) -> Result<Confirmation, FavoritesError> {
        let idx = self
            .position(&city.to_lowercase())
            .ok_or_else(|| FavoritesError::NotFound(city.to_string()))?;

        let (_, removed) = self.entries.remove(idx);
        debug!(city = %removed.city, "removed favorite");
        Ok(Confirmation::new(format!("'{}' removed from favorites", removed.city)))
    }

    pub fn get(&self, city: &str) -> Option<&WeatherRecord> {
        self.position(&city.to_lowercase()).map(|idx| &self.entries[idx].1)
    }

    /// Snapshot of the stored records, in insertion order.
    pub fn list_all(&self) -> Vec<WeatherRecord> {
        self.entries.iter().map(|(_, record)| record.clone()).collect()
    }

    /// Display names, in the same order as [`FavoritesStore::list_all`].
    pub fn list_names(&self) -> Vec<String> {
        self.entries.iter().map(|(_, record)| record.city.clone()).collect()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.position(&city.to_lowercase()).is_some()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear_all(&mut self) -> Confirmation {
        self.entries.clear();
        Confirmation::new("All favorites cleared")
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}
