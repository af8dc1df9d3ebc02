//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants
//! cover invalid configuration, empty source collections and exhausted rejection-sampling budgets.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot draw from empty {what}")]
    EmptyCollection { what: &'static str },

    #[error(
        "failed to satisfy density constraint for {what}: accepted {accepted} of {requested} after {trials} trials"
    )]
    SamplingExhausted {
        what: &'static str,
        accepted: usize,
        requested: usize,
        trials: usize,
    },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
