use std::fmt;

use anyhow::Result;
use inquire::{Confirm, InquireError, Select, Text};
use weather_core::{FavoritesError, RefreshReport, Session, WeatherProvider};

use crate::display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Search,
    AddLastSearched,
    ListFavorites,
    RemoveFavorite,
    ClearFavorites,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 6] = [
        MenuChoice::Search,
        MenuChoice::AddLastSearched,
        MenuChoice::ListFavorites,
        MenuChoice::RemoveFavorite,
        MenuChoice::ClearFavorites,
        MenuChoice::Exit,
    ];
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuChoice::Search => "Search weather for a city",
            MenuChoice::AddLastSearched => "Add last searched city to favorites",
            MenuChoice::ListFavorites => "List favorite cities",
            MenuChoice::RemoveFavorite => "Remove a city from favorites",
            MenuChoice::ClearFavorites => "Clear all favorites",
            MenuChoice::Exit => "Exit",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RemovalChoice {
    City(String),
    Cancel,
}

impl fmt::Display for RemovalChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalChoice::City(name) => f.write_str(name),
            RemovalChoice::Cancel => f.write_str("Cancel"),
        }
    }
}

/// Error used to unwind the menu when the user presses Ctrl-C.
pub fn interrupted() -> anyhow::Error {
    InquireError::OperationInterrupted.into()
}

pub fn is_interrupt(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<InquireError>(), Some(InquireError::OperationInterrupted))
}

/// `Ok(None)` when the user backed out of a prompt with Esc.
fn answer<T>(res: Result<T, InquireError>) -> Result<Option<T>> {
    match res {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Message shown instead of the list when favorites exist but none could be refreshed.
fn unrefreshed_notice(report: &RefreshReport, stored: usize) -> Option<String> {
    (stored > 0 && report.refreshed.is_empty()).then(|| {
        format!("None of your {stored} favorite(s) could be refreshed right now. They are still saved.")
    })
}

/// Interactive menu over one [`Session`].
pub struct Repl<P> {
    session: Session<P>,
}

impl<P: WeatherProvider> Repl<P> {
    pub fn new(session: Session<P>) -> Self {
        Self { session }
    }

    /// Loop until the user picks "Exit". Network and input failures are reported and the loop continues.
    pub async fn run(&mut self) -> Result<()> {
        display::welcome();

        loop {
            let menu = Select::new("What would you like to do?", MenuChoice::ALL.to_vec());
            let choice = answer(menu.prompt())?;

            match choice {
                Some(MenuChoice::Search) => self.search().await?,
                Some(MenuChoice::AddLastSearched) => self.add_last_searched(),
                Some(MenuChoice::ListFavorites) => self.list_favorites().await,
                Some(MenuChoice::RemoveFavorite) => self.remove_favorite()?,
                Some(MenuChoice::ClearFavorites) => self.clear_favorites()?,
                Some(MenuChoice::Exit) | None => return Ok(()),
            }
        }
    }

    async fn search(&mut self) -> Result<()> {
        let Some(input) = answer(Text::new("Enter city name:").prompt())? else {
            return Ok(());
        };

        let city = input.trim();
        if city.is_empty() {
            display::error("City name cannot be empty. Please try again.");
            return Ok(());
        }

        display::info(&format!("Searching for '{city}'..."));
        match self.session.search(city).await.cloned() {
            Ok(record) => {
                display::weather(&record);
                if self.session.should_suggest_adding(&record) {
                    display::info("Tip: choose \"Add last searched city to favorites\" to keep it!");
                }
            }
            Err(err) => display::error(&format!("Error: {err}")),
        }

        Ok(())
    }

    fn add_last_searched(&mut self) {
        match self.session.add_last_searched() {
            Ok(confirmation) => {
                display::success(confirmation.message());
                self.show_count();
            }
            Err(FavoritesError::EmptyInput) => {
                display::error("No city to add. Please search for a city first.");
            }
            Err(err @ FavoritesError::AlreadyExists(_)) => display::info(&err.to_string()),
            Err(err) => display::error(&err.to_string()),
        }
    }

    async fn list_favorites(&mut self) {
        let capacity = self.session.favorites().capacity();
        if self.session.favorites().is_empty() {
            display::favorites_list(&[], capacity);
            return;
        }

        display::info("Fetching latest weather for your favorites...");
        let report = self.session.refresh_favorites().await;

        for (city, err) in &report.failed {
            display::error(&format!("Could not fetch weather for '{city}': {err}"));
        }
        for (city, record) in &report.renamed {
            display::error(&format!(
                "Could not refresh '{city}': the provider answered for '{}'",
                record.city
            ));
        }

        match unrefreshed_notice(&report, self.session.favorites().count()) {
            Some(notice) => display::info(&notice),
            None => display::favorites_list(&report.refreshed, capacity),
        }
    }

    fn remove_favorite(&mut self) -> Result<()> {
        let names = self.session.favorites().list_names();
        if names.is_empty() {
            display::info("Your favorites list is empty. Nothing to remove.");
            return Ok(());
        }

        let mut options: Vec<RemovalChoice> = names.into_iter().map(RemovalChoice::City).collect();
        options.push(RemovalChoice::Cancel);

        match answer(Select::new("Which city should be removed?", options).prompt())? {
            Some(RemovalChoice::City(name)) => match self.session.remove_favorite(&name) {
                Ok(confirmation) => {
                    display::success(confirmation.message());
                    self.show_count();
                }
                Err(err) => display::error(&err.to_string()),
            },
            Some(RemovalChoice::Cancel) | None => display::info("Cancelled."),
        }

        Ok(())
    }

    fn clear_favorites(&mut self) -> Result<()> {
        if self.session.favorites().is_empty() {
            display::info("Your favorites list is already empty.");
            return Ok(());
        }

        let confirmed = answer(Confirm::new("Remove all favorites?").with_default(false).prompt())?;
        if confirmed == Some(true) {
            let confirmation = self.session.clear_favorites();
            display::success(confirmation.message());
        } else {
            display::info("Cancelled.");
        }

        Ok(())
    }

    fn show_count(&self) {
        let favorites = self.session.favorites();
        display::info(&format!("Favorites: {}/{}", favorites.count(), favorites.capacity()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::FetchError;

    #[test]
    fn interrupt_is_recognised_through_anyhow() {
        assert!(is_interrupt(&interrupted()));
        assert!(!is_interrupt(&anyhow::anyhow!("boom")));
        assert!(!is_interrupt(&InquireError::OperationCanceled.into()));
    }

    #[test]
    fn escape_is_not_an_error() {
        let res: Result<Option<u8>> = answer(Err(InquireError::OperationCanceled));
        assert!(matches!(res, Ok(None)));

        let res: Result<Option<u8>> = answer(Err(InquireError::OperationInterrupted));
        assert!(res.is_err_and(|err| is_interrupt(&err)));
    }

    #[test]
    fn failed_refresh_does_not_claim_the_list_is_empty() {
        let report = RefreshReport {
            failed: vec![("Tokyo".into(), FetchError::TimedOut)],
            ..RefreshReport::default()
        };

        let notice = unrefreshed_notice(&report, 1).expect("store is not empty");
        assert!(notice.contains("still saved"));
        assert!(!notice.contains("empty"));

        assert!(unrefreshed_notice(&RefreshReport::default(), 0).is_none());
    }

    #[test]
    fn menu_lists_every_action_once() {
        let labels: Vec<String> = MenuChoice::ALL.iter().map(ToString::to_string).collect();
        let mut unique = labels.clone();
        unique.dedup();

        assert_eq!(labels.len(), 6);
        assert_eq!(unique, labels);
        assert_eq!(RemovalChoice::City("Lima".into()).to_string(), "Lima");
    }
}
