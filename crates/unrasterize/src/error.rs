//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid parameters, malformed blocks, cancellation, output IO/serialization and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("malformed block at row {row_off}, col {col_off} with shape {rows}x{cols}")]
    MalformedBlock {
        row_off: usize,
        col_off: usize,
        rows: usize,
        cols: usize,
    },

    #[error("selection cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn invalid_parameter_names_the_parameter() {
        let err = Error::invalid_parameter("mask_width", "must be >= 0, got -1");
        assert_eq!(
            err.to_string(),
            "invalid parameter `mask_width`: must be >= 0, got -1"
        );
    }

    #[test]
    fn malformed_block_reports_bounds() {
        let err = Error::MalformedBlock {
            row_off: 4,
            col_off: 8,
            rows: 0,
            cols: 3,
        };
        assert_eq!(
            err.to_string(),
            "malformed block at row 4, col 8 with shape 0x3"
        );
    }
}
