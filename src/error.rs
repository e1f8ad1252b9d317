//! Error types.
//!
//! Analysis itself never fails; these errors only surface while loading
//! static tables, validating configuration or loading a denylist file.

use std::path::PathBuf;
use thiserror::Error;

/// Bundled table failed validation. Fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Wordlist '{0}' is empty")]
    EmptyWordlist(&'static str),
    #[error("Keyboard layout '{0}' is empty")]
    EmptyLayout(&'static str),
    #[error("Key '{key}' is not aligned to the grid of layout '{graph}'")]
    MisalignedKey { graph: &'static str, key: String },
    #[error("Character '{key}' appears twice in layout '{graph}'")]
    DuplicateKey { graph: &'static str, key: char },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Score thresholds must be positive and strictly increasing: {0:?}")]
    NonMonotonicThresholds([f64; 4]),
    #[error("Attack rate for '{0}' must be positive and finite")]
    NonPositiveRate(&'static str),
    #[error("Attack rates must decrease from offline fast hashing to online throttling")]
    RateOrder,
    #[error("Crack time ceiling must be positive, got {0} years")]
    NonPositiveCeiling(f64),
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum DenylistError {
    #[error("Denylist file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read denylist file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Denylist file is empty")]
    EmptyFile,
}

/// Errors raised while building an [`Estimator`](crate::Estimator).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
