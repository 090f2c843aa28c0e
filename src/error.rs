//! Defines the crate level error type.

/// The errors that may occur while loading and summarising transactions.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The value stored under the transactions key could not be parsed as a
    /// list of transaction records.
    ///
    /// No partial summary is produced when this happens.
    #[error("the stored transactions could not be parsed: {0}")]
    MalformedPayload(String),

    /// A single record had a field that could not be coerced, e.g., an amount
    /// that is not a number or a date that is not a valid timestamp.
    ///
    /// `index` is the position of the record in the stored collection.
    #[error("transaction record {index} is invalid: {reason}")]
    InvalidRecord {
        /// Position of the offending record in the stored collection.
        index: usize,
        /// Human readable description of what was wrong with the record.
        reason: String,
    },

    /// The locale tag does not match any of the supported locales.
    #[error("unsupported locale \"{0}\"")]
    UnsupportedLocale(String),

    /// The currency code is not a three letter ISO 4217 style code.
    #[error("invalid currency code \"{0}\"")]
    InvalidCurrency(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}
