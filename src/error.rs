//! Crate-wide error type.
//!
//! Every fallible operation returns [`Result`]. Transport and parse failures
//! abort an acquisition run; the remaining variants describe misuse of the
//! session or a broken on-disk store.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Seen store at {path} is corrupt: {reason}")]
    StoreCorrupt { path: String, reason: String },

    /// The attempt cap was reached before enough qualifying articles turned up.
    #[error("Found only {found} of {wanted} qualifying articles after {attempts} requests")]
    InsufficientSupply {
        attempts: usize,
        found: usize,
        wanted: usize,
    },

    #[error("No article titled {0:?} in the current list")]
    NotInWorkingList(String),

    #[error("Unknown language code {0:?}")]
    UnknownLanguage(String),

    #[error("Could not open {url}: {reason}")]
    Navigation { url: String, reason: String },
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
