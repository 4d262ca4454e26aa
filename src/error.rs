// File: ./src/error.rs
//! Error types for configuration problems.
//!
//! Only configuration is ever rejected. Malformed document content (bad dates,
//! odd checklist lines) is absorbed by the extractor and never surfaces here.

use thiserror::Error;

/// Problems with a date format string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The format has no year field, so no calendar date can be resolved from it.
    #[error("Date format '{0}' must contain a year (yyyy, yy, kkkk or kk)")]
    MissingYear(String),

    /// A `'` opened a literal section that was never closed.
    #[error("Date format '{0}' has an unterminated quoted literal")]
    UnterminatedQuote(String),
}

/// Problems with a date tag template or the settings built around it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Date tag '{0}' must include the %date% token")]
    MissingDateToken(String),

    #[error("Date tag '{template}' includes the %date% token {count} times, expected once")]
    DuplicateDateToken { template: String, count: usize },

    #[error(transparent)]
    Format(#[from] FormatError),

    /// Formatting a sample date and parsing it back did not give the same date.
    #[error("Invalid date format '{0}': dates written with it cannot be read back")]
    DateFormatRoundTrip(String),
}
