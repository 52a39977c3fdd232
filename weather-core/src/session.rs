use tracing::{info, warn};

use crate::{
    error::{FavoritesError, FetchError},
    favorites::{Confirmation, FavoritesStore},
    model::WeatherRecord,
    provider::WeatherProvider,
};

/// Outcome of refreshing every favorite against the provider.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Freshly fetched records, in favorites order.
    pub refreshed: Vec<WeatherRecord>,
    /// Cities whose fetch failed; their stored data is left untouched.
    pub failed: Vec<(String, FetchError)>,
    /// Cities the provider answered for under a different name; not stored.
    pub renamed: Vec<(String, WeatherRecord)>,
}

/// State of one interactive session: the favorites list and the last searched city.
#[derive(Debug)]
pub struct Session<P> {
    provider: P,
    favorites: FavoritesStore,
    last_searched: Option<WeatherRecord>,
}

impl<P: WeatherProvider> Session<P> {
    pub fn new(provider: P) -> Self {
        Self::with_favorites(provider, FavoritesStore::new())
    }

    pub fn with_favorites(provider: P, favorites: FavoritesStore) -> Self {
        Self { provider, favorites, last_searched: None }
    }

    /// Fetch weather for `city` and remember it as the last searched record.
    ///
    /// A failed search clears the slot.
    pub async fn search(&mut self, city: &str) -> Result<&WeatherRecord, FetchError> {
        self.last_searched = None;
        let record = self.provider.fetch_weather(city).await?;
        info!(city = %record.city, "search succeeded");
        Ok(self.last_searched.insert(record))
    }

    pub fn last_searched(&self) -> Option<&WeatherRecord> {
        self.last_searched.as_ref()
    }

    pub fn add_last_searched(&mut self) -> Result<Confirmation, FavoritesError> {
        let record = self.last_searched.as_ref().ok_or(FavoritesError::EmptyInput)?;
        self.favorites.insert_new(record)
    }

    /// Whether to hint that `record` could be added to favorites.
    pub fn should_suggest_adding(&self, record: &WeatherRecord) -> bool {
        !self.favorites.contains(&record.city) && !self.favorites.is_full()
    }

    /// Re-fetch every favorite, one request at a time.
    ///
    /// One city's failure does not stop the others.
    pub async fn refresh_favorites(&mut self) -> RefreshReport {
        let mut report = RefreshReport::default();

        for name in self.favorites.list_names() {
            match self.provider.fetch_weather(&name).await {
                Ok(record) if record.key() == name.to_lowercase() => {
                    // Same key, so this overwrites in place and cannot hit capacity.
                    match self.favorites.upsert(&record) {
                        Ok(_) => report.refreshed.push(record),
                        Err(err) => warn!(city = %name, error = %err, "could not store refreshed favorite"),
                    }
                }
                Ok(record) => {
                    warn!(city = %name, returned = %record.city, "provider renamed favorite");
                    report.renamed.push((name, record));
                }
                Err(err) => report.failed.push((name, err)),
            }
        }

        info!(
            refreshed = report.refreshed.len(),
            failed = report.failed.len(),
            "favorites refreshed"
        );
        report
    }

    pub fn remove_favorite(&mut self, city: &str) -> Result<Confirmation, FavoritesError> {
        self.favorites.remove(city)
    }

    pub fn clear_favorites(&mut self) -> Confirmation {
        self.favorites.clear_all()
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }
}
