//! Password strength estimator - main analysis logic.

use std::sync::OnceLock;

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::EstimatorConfig;
use crate::crack_time::{AttackModel, CrackTime, CrackTimes, Score, Strength};
use crate::error::EstimatorError;
use crate::feedback::{Feedback, empty_feedback, feedback};
use crate::matching::{Match, MatchContext, chars_of};
use crate::metrics::Metrics;
use crate::segmentation::segment;
use crate::tables::{Tables, init_tables};

/// Attacker model behind [`AnalysisResult::crack_time`].
pub const HEADLINE_MODEL: AttackModel = AttackModel::OfflineSlowHashing;

/// Outcome of one analysis. Built fresh per call and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Estimated guesses; infinite once `guesses_log10` leaves the `f64` range.
    pub guesses: f64,
    pub guesses_log10: f64,
    pub score: Score,
    pub crack_times: CrackTimes,
    pub feedback: Feedback,
    /// Winning segmentation, in password order.
    pub sequence: Vec<Match>,
    pub metrics: Metrics,
}

impl AnalysisResult {
    fn empty() -> Self {
        Self {
            guesses: 1.0,
            guesses_log10: 0.0,
            score: Score::default(),
            crack_times: CrackTimes::zero(),
            feedback: empty_feedback(),
            sequence: Vec::new(),
            metrics: Metrics::default(),
        }
    }

    pub fn strength(&self) -> Strength {
        if self.metrics.length == 0 {
            Strength::Empty
        } else {
            Strength::from(self.score)
        }
    }

    /// Score as a share of the maximum, for progress bars.
    pub fn percentage(&self) -> u8 {
        self.score.value() * (100 / Score::MAX.value())
    }

    /// Crack time under the offline slow-hash model.
    pub fn crack_time(&self) -> &CrackTime {
        self.crack_times.get(HEADLINE_MODEL)
    }
}

/// Analyzer bound to the static tables and one configuration.
#[derive(Debug, Clone)]
pub struct Estimator {
    tables: &'static Tables,
    config: EstimatorConfig,
}

impl Estimator {
    /// Validates `config` and makes sure the static tables are loaded.
    pub fn new(config: EstimatorConfig) -> Result<Self, EstimatorError> {
        config.validate()?;
        let tables = init_tables()?;
        Ok(Self { tables, config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Analyzes a password. Never fails.
    pub fn analyze(&self, password: &SecretString) -> AnalysisResult {
        self.analyze_str(password.expose_secret())
    }

    /// Same as [`Estimator::analyze`] for callers holding a plain string.
    pub fn analyze_str(&self, password: &str) -> AnalysisResult {
        if password.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!("empty password, skipping analysis");
            return AnalysisResult::empty();
        }

        let chars = chars_of(password);
        let ctx = MatchContext {
            tables: self.tables,
            reference_year: self.config.reference_year,
        };
        let segmentation = segment(&chars, &ctx);
        let guesses_log10 = segmentation.guesses_log10;
        let score = Score::from_guesses_log10(guesses_log10, &self.config.score_thresholds);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            length = chars.len(),
            matches = segmentation.sequence.len(),
            guesses_log10,
            score = score.value(),
            "password analyzed"
        );

        AnalysisResult {
            guesses: 10f64.powf(guesses_log10),
            guesses_log10,
            score,
            crack_times: CrackTimes::estimate(guesses_log10, &self.config),
            feedback: feedback(score, &segmentation.sequence),
            metrics: Metrics::of(password),
            sequence: segmentation.sequence,
        }
    }

    /// Debounced analysis for keystroke-driven callers.
    ///
    /// Waits for the configured debounce delay, then analyzes and sends the
    /// result on `tx` unless `token` was cancelled in the meantime.
    #[cfg(feature = "async")]
    pub async fn analyze_tx(
        &self,
        password: &SecretString,
        token: CancellationToken,
        tx: mpsc::Sender<AnalysisResult>,
    ) {
        #[cfg(feature = "tracing")]
        tracing::info!("analysis is about to start...");

        tokio::time::sleep(self.config.debounce).await;

        if token.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::debug!("analysis cancelled before start");
            return;
        }

        let result = self.analyze(password);

        if let Err(_e) = tx.send(result).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send password analysis result: {}", _e);
        }
    }
}

/// Process-wide estimator with the default configuration.
///
/// # Panics
///
/// Panics if the bundled tables are corrupt.
pub fn default_estimator() -> &'static Estimator {
    static DEFAULT: OnceLock<Estimator> = OnceLock::new();
    DEFAULT.get_or_init(|| match Estimator::new(EstimatorConfig::default()) {
        Ok(estimator) => estimator,
        Err(e) => panic!("bundled password tables are corrupt: {}", e),
    })
}

/// Analyzes a password with the default configuration.
pub fn analyze(password: &SecretString) -> AnalysisResult {
    default_estimator().analyze(password)
}

/// [`Estimator::analyze_tx`] with the default configuration.
#[cfg(feature = "async")]
pub async fn analyze_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<AnalysisResult>,
) {
    default_estimator().analyze_tx(password, token, tx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{Suggestion, Warning};
    use crate::matching::{Pattern, PatternKind};
    use crate::tables::DictionaryName;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn estimator() -> Estimator {
        Estimator::new(EstimatorConfig::default().with_reference_year(2024))
            .expect("default config is valid")
    }

    #[test]
    fn test_score_always_in_range() {
        let estimator = estimator();
        let long = "z".repeat(200);
        for pwd in [
            "a",
            "password",
            "Tr0ub4dor&3",
            "correcthorsebatterystaple",
            "🔑🔑🔑🔑",
            "Xk9#mQ2!vL7@pR4$wZ8&",
            long.as_str(),
        ] {
            let result = estimator.analyze(&secret(pwd));
            assert!(result.score <= Score::MAX, "score out of range for {:?}", pwd);
            assert!(result.guesses_log10 >= 0.0);
            assert!(result.percentage() <= 100);
        }
    }

    #[test]
    fn test_empty_password() {
        let result = estimator().analyze(&secret(""));
        assert_eq!(result.score.value(), 0);
        assert_eq!(result.strength(), Strength::Empty);
        assert_eq!(result.crack_time().seconds, 0.0);
        assert_eq!(result.crack_time().display, "0 seconds");
        assert_eq!(result.feedback.warning, Some(Warning::EmptyPassword));
        assert_eq!(
            result.feedback.suggestions,
            vec![Suggestion::PasswordCannotBeEmpty]
        );
        assert!(result.sequence.is_empty());
    }

    #[test]
    fn test_one_more_repeat_never_decreases_guesses() {
        let estimator = estimator();
        let ten = estimator.analyze_str("aaaaaaaaaa");
        let eleven = estimator.analyze_str("aaaaaaaaaaa");
        assert!(ten.guesses_log10 <= eleven.guesses_log10);
        assert!(ten.score <= eleven.score);
    }

    #[test]
    fn test_sequence_tiles_password() {
        let estimator = estimator();
        for pwd in ["p@ssw0rd2024!", "ab", "zxcvbnm,./", "1/1/91abc", "ÄÖÜäöü123"] {
            let result = estimator.analyze_str(pwd);
            let mut next = 0;
            for m in &result.sequence {
                assert_eq!(m.i, next, "gap or overlap in {:?}", pwd);
                next = m.j + 1;
            }
            assert_eq!(next, pwd.chars().count());
        }
    }

    #[test]
    fn test_common_password() {
        let result = estimator().analyze_str("password");
        assert_eq!(result.sequence.len(), 1);
        let m = &result.sequence[0];
        assert_eq!((m.i, m.j), (0, 7));
        match &m.pattern {
            Pattern::Dictionary(d) => {
                assert_eq!(d.dictionary, DictionaryName::Passwords);
                assert_eq!(d.rank, 1);
            }
            other => panic!("expected dictionary match, got {:?}", other),
        }
        assert_eq!(result.guesses, 1.0);
        assert_eq!(result.score.value(), 0);
        assert_eq!(result.strength(), Strength::VeryWeak);
        assert_eq!(result.feedback.warning, Some(Warning::TopTen));
    }

    #[test]
    fn test_alphabet_sequence() {
        let result = estimator().analyze_str("abcdefgh");
        assert_eq!(result.sequence.len(), 1);
        assert_eq!(result.sequence[0].kind(), PatternKind::Sequence);
        assert!(result.score.value() <= 1);
        assert_eq!(result.feedback.warning, Some(Warning::Sequence));
    }

    #[test]
    fn test_keyboard_row() {
        let result = estimator().analyze_str("qwerty");
        assert!(
            result
                .sequence
                .iter()
                .any(|m| m.kind() == PatternKind::Keyboard)
        );
        assert_eq!(result.score.value(), 0);
        assert_eq!(result.feedback.warning, Some(Warning::StraightRow));
    }

    #[test]
    fn test_high_entropy_password() {
        let result = estimator().analyze_str("Xk9#mQ2!vL7@pR4$wZ8&");
        assert_eq!(result.score.value(), 4);
        assert_eq!(result.strength(), Strength::VeryStrong);
        assert_eq!(result.percentage(), 100);
        assert_eq!(result.crack_time().display, "centuries");
        assert!(result.feedback.is_empty());
        assert!(result.metrics.has_special_chars);
    }

    #[test]
    fn test_common_words_are_weak() {
        let estimator = estimator();
        for pwd in [
            "chocolate",
            "elephant",
            "butterfly",
            "kitchen",
            "giraffe",
            "umbrella",
        ] {
            let result = estimator.analyze_str(pwd);
            assert!(result.score.value() <= 1, "{:?} scored {}", pwd, result.score);
            assert_eq!(result.sequence.len(), 1, "{:?} not read as one word", pwd);
            assert_eq!(result.sequence[0].kind(), PatternKind::Dictionary);
        }
        assert!(estimator.analyze_str("Butterfly99").score.value() <= 1);
    }

    /// Deterministic printable-ASCII noise.
    fn scrambled(len: usize) -> String {
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                char::from(b'!' + ((state >> 33) % 94) as u8)
            })
            .collect()
    }

    #[test]
    fn test_guesses_beyond_f64_range() {
        let estimator = estimator();
        let password = scrambled(700);
        let result = estimator.analyze_str(&password);

        assert!(result.guesses_log10.is_finite());
        assert!(result.guesses_log10 > 308.0);
        assert!(result.guesses.is_infinite());
        assert_eq!(result.score, Score::MAX);
        for (model, time) in result.crack_times.iter() {
            assert_eq!(time.display, "centuries", "{} model", model);
        }
        assert_eq!(result, estimator.analyze_str(&password));
    }

    #[test]
    fn test_extreme_reference_year() {
        for year in [i32::MIN, i32::MAX] {
            let config = EstimatorConfig::default().with_reference_year(year);
            let estimator = Estimator::new(config).expect("any year is accepted");
            for pwd in ["13051987", "1/1/91", "2024-12-25"] {
                let result = estimator.analyze_str(pwd);
                assert!(result.guesses_log10.is_finite());
                assert!(result.score <= Score::MAX);
            }
        }
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let estimator = estimator();
        for pwd in ["", "dragon1987", "Tr0ub4dor&3", "qazwsx!@#"] {
            assert_eq!(estimator.analyze_str(pwd), estimator.analyze_str(pwd));
        }
    }

    #[test]
    fn test_crack_times_ordered_by_attacker() {
        let result = estimator().analyze_str("correcthorse");
        let seconds: Vec<f64> = result.crack_times.iter().map(|(_, t)| t.seconds).collect();
        assert!(seconds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EstimatorConfig::default().with_centuries_after_years(-1.0);
        assert!(matches!(
            Estimator::new(config),
            Err(EstimatorError::Config(_))
        ));
    }

    #[test]
    fn test_default_estimator_matches_explicit_one() {
        let result = analyze(&secret("sunshine"));
        assert_eq!(result.score.value(), 0);
        assert!(std::ptr::eq(default_estimator(), default_estimator()));
    }
}
