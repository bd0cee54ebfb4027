//! Error types for the machine tracker.
//!
//! [`TrackerError`] covers everything that can go wrong while talking to the
//! inventory API, decoding its responses, or loading configuration and themes.
//! [`LocateError`] is the narrower, user-facing outcome of an item lookup: its
//! `Display` text is exactly what the tracker popup shows.

use thiserror::Error;

/// The main error type for machine tracker operations.
///
/// # Examples
///
/// ```
/// use machine_tracker::TrackerError;
///
/// let err = TrackerError::Http { status: 502 };
/// assert_eq!(err.to_string(), "API request failed with status 502");
/// ```
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The API answered with a non-success HTTP status.
    #[error("API request failed with status {status}")]
    Http {
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The response body was not valid JSON for the expected type.
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The machine list response was neither an array nor an `items` envelope.
    #[error("Unexpected API response format")]
    UnexpectedShape,

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A received web response could not be replayed synchronously.
    #[error("{what} response was not ready to replay")]
    ReplayNotReady {
        /// Which response was being replayed.
        what: &'static str,
    },
}

/// A specialized `Result` type for machine tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Why an item lookup did not produce location details.
///
/// `EmptyInput` is raised locally, before any request is made. `NotFound`
/// means the API was reached but had nothing usable for the code, while
/// `LookupFailed` means the API could not be asked at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    /// The item code was empty or whitespace only.
    #[error("Please enter an item code")]
    EmptyInput,

    /// The API reported failure or returned no usable location payload.
    #[error("No data found for this item code.")]
    NotFound,

    /// The request itself failed; the reason is kept for logging.
    #[error("Failed to fetch item details.")]
    LookupFailed(String),
}

impl From<TrackerError> for LocateError {
    fn from(err: TrackerError) -> Self {
        Self::LookupFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_error_messages_match_popup_text() {
        assert_eq!(LocateError::EmptyInput.to_string(), "Please enter an item code");
        assert_eq!(LocateError::NotFound.to_string(), "No data found for this item code.");
        assert_eq!(
            LocateError::LookupFailed("timeout".into()).to_string(),
            "Failed to fetch item details."
        );
    }

    #[test]
    fn tracker_error_converts_to_lookup_failed() {
        let err: LocateError = TrackerError::Http { status: 500 }.into();
        assert_eq!(
            err,
            LocateError::LookupFailed("API request failed with status 500".into())
        );
    }
}
