// models/src/errors.rs

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized {field} value: {value}")]
    UnknownVariant { field: &'static str, value: String },

    #[error("invalid time string: {0}")]
    InvalidTime(String),
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
