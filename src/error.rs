use std::error::Error;
use std::fmt;

/// Raised by a checkpoint once a stop has been requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run cancelled")
    }
}

impl Error for Cancelled {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroMaxValue,
    UnknownAlgorithm(String),
    InvalidNumber { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMaxValue => write!(f, "bar height (max value) must be at least 1"),
            ConfigError::UnknownAlgorithm(key) => write!(
                f,
                "unknown algorithm '{}', expected one of bubble, selection, insertion, merge, quick, heap",
                key
            ),
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "invalid {}: '{}' is not a non-negative integer", name, value)
            }
        }
    }
}

impl Error for ConfigError {}
