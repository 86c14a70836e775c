use std::io;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Meeting not found: {0}")]
    NotFound(String),

    #[error("The calendar has no meetings")]
    EmptyCollection,

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Corrupt calendar data: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Lookup outcomes a caller is expected to handle as ordinary control flow.
    ///
    /// Everything else is either a contract violation by the caller or a
    /// failure of the underlying storage.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::EmptyCollection)
    }
}
