//! Common-password denylist
//!
//! A small built-in list of extremely common passwords, optionally extended
//! at startup from a file. Membership is case-insensitive and independent of
//! the scoring pipeline.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::error::DenylistError;

/// Environment variable pointing at an extension file.
pub const DENYLIST_PATH_ENV: &str = "PWD_DENYLIST_PATH";

const DEFAULT_DENYLIST_PATH: &str = "./assets/denylist.txt";

const BUILT_IN: [&str; 20] = [
    "password", "123456", "12345678", "qwerty", "abc123", "monkey", "1234567", "letmein",
    "trustno1", "dragon", "baseball", "iloveyou", "master", "sunshine", "ashley", "bailey",
    "passw0rd", "shadow", "123123", "654321",
];

static EXTENSION: RwLock<Option<HashSet<String>>> = RwLock::new(None);

/// Returns the extension file path.
///
/// Priority:
/// 1. Environment variable `PWD_DENYLIST_PATH`
/// 2. Default path `./assets/denylist.txt`
pub fn get_denylist_path() -> PathBuf {
    std::env::var(DENYLIST_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DENYLIST_PATH))
}

/// Loads the extension file named by [`get_denylist_path`].
///
/// The built-in list works without calling this.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read
/// - File is empty
pub fn init_denylist() -> Result<usize, DenylistError> {
    init_denylist_from_path(get_denylist_path())
}

/// Loads the extension from a specific file, one password per line.
///
/// Idempotent: once an extension is loaded, later calls return its size
/// without reading the file.
pub fn init_denylist_from_path<P: AsRef<Path>>(path: P) -> Result<usize, DenylistError> {
    {
        let guard = EXTENSION.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(set) = guard.as_ref() {
            return Ok(set.len());
        }
    }

    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Denylist initialization FAILED: FileNotFound {:?}", path);
        return Err(DenylistError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Denylist initialization FAILED: Empty file {:?}", path);
        return Err(DenylistError::EmptyFile);
    }

    let set: HashSet<String> = content
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect();

    let count = set.len();
    *EXTENSION.write().unwrap_or_else(PoisonError::into_inner) = Some(set);

    #[cfg(feature = "tracing")]
    tracing::info!("Denylist extension loaded: {} passwords from {:?}", count, path);

    Ok(count)
}

/// True when the whole password is a known common password, ignoring case.
pub fn is_common_password(password: &str) -> bool {
    let lower = password.to_lowercase();
    if BUILT_IN.contains(&lower.as_str()) {
        return true;
    }
    EXTENSION
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&lower))
}

#[cfg(test)]
pub fn reset_denylist_for_testing() {
    *EXTENSION.write().unwrap_or_else(PoisonError::into_inner) = None;
}
