//! Password strength estimation library
//!
//! Estimates how many guesses an attacker needs to reach a password by
//! finding the weak patterns inside it (dictionary words, keyboard walks,
//! sequences, repeats, dates, leet substitutions) and picking the
//! combination of patterns that explains the password most cheaply. The
//! guess count is mapped to a 0-4 score, crack times under four attacker
//! models and feedback for the user.
//!
//! # Features
//!
//! - `async` (default): Enables debounced analysis with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_REFERENCE_YEAR`: Year the date matcher treats as the present
//!   (read by [`EstimatorConfig::from_env`])
//! - `PWD_DEBOUNCE_MS`: Debounce delay of [`analyze_tx`]
//! - `PWD_DENYLIST_PATH`: Extra common-password file for
//!   [`is_common_password`] (default: `./assets/denylist.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_estimator::{analyze, is_common_password};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let result = analyze(&password);
//!
//! println!("Score: {}", result.score);
//! println!("Strength: {}", result.strength());
//! println!("Crack time: {}", result.crack_time().display);
//! if let Some(warning) = result.feedback.warning {
//!     println!("Warning: {}", warning);
//! }
//!
//! assert!(is_common_password("PASSWORD"));
//! ```

mod config;
mod crack_time;
mod denylist;
mod error;
mod evaluator;
mod feedback;
mod guesses;
mod matching;
mod metrics;
mod segmentation;
mod tables;

// Public API
pub use config::{AttackRates, EstimatorConfig};
pub use crack_time::{AttackModel, CrackTime, CrackTimes, Score, Strength, display_time};
pub use denylist::{get_denylist_path, init_denylist, init_denylist_from_path, is_common_password};
pub use error::{ConfigError, DenylistError, EstimatorError, TableError};
pub use evaluator::{AnalysisResult, Estimator, analyze, default_estimator};
pub use feedback::{Feedback, Suggestion, Warning};
pub use guesses::estimate_guesses;
pub use matching::{
    DatePattern, DictionaryPattern, KeyboardPattern, Match, MatchContext, Pattern, PatternKind,
    RepeatPattern, SequencePattern, SequenceSpace, omnimatch,
};
pub use metrics::Metrics;
pub use segmentation::{Segmentation, most_guessable, segment};
pub use tables::{
    DictionaryName, GraphName, KeyboardGraph, RankedDictionary, Step, Tables, init_tables,
};

#[cfg(feature = "async")]
pub use evaluator::analyze_tx;
