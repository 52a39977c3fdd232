use thiserror::Error;

/// Classified reason a weather fetch produced no record.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("City '{city}' not found.")]
    CityNotFound { city: String },

    #[error("Invalid API key.")]
    InvalidCredential,

    #[error("Too many requests.")]
    RateLimited,

    #[error("Unexpected response (status code: {0})")]
    UnexpectedStatus(u16),

    #[error("Unable to connect.")]
    ConnectionFailed,

    #[error("Request timed out.")]
    TimedOut,

    #[error("An unexpected error occurred: {0}")]
    TransportError(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::TimedOut
        } else if err.is_connect() {
            FetchError::ConnectionFailed
        } else {
            FetchError::TransportError(err.to_string())
        }
    }
}

/// Reason a favorites mutation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FavoritesError {
    #[error("No city to add.")]
    EmptyInput,

    #[error("'{0}' is already in your favorites list")]
    AlreadyExists(String),

    #[error("Favorites list is full (max {0}). Remove one first.")]
    CapacityExceeded(usize),

    #[error("'{0}' is not in your favorites")]
    NotFound(String),
}
