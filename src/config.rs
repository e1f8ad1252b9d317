//! Estimator configuration.
//!
//! The score thresholds and attacker throughputs are policy constants taken
//! from the zxcvbn estimation model. They are tunable, but every
//! configuration must keep the score bands monotonic and the attacker
//! models ordered from fastest to slowest.

use std::time::Duration;

use chrono::Datelike;

use crate::crack_time::AttackModel;
use crate::error::ConfigError;

/// Environment variable overriding the reference year used by the date matcher.
pub const REFERENCE_YEAR_ENV: &str = "PWD_REFERENCE_YEAR";

/// Environment variable overriding the async debounce delay (milliseconds).
pub const DEBOUNCE_MS_ENV: &str = "PWD_DEBOUNCE_MS";

/// Guess counts separating score 0|1, 1|2, 2|3 and 3|4.
pub const DEFAULT_SCORE_THRESHOLDS: [f64; 4] = [1e3, 1e6, 1e8, 1e10];

/// Beyond this many years every crack time reads "centuries".
pub const DEFAULT_CENTURIES_AFTER_YEARS: f64 = 100.0;

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Guesses per second for each attacker model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRates {
    pub online_throttling: f64,
    pub online_no_throttling: f64,
    pub offline_slow_hashing: f64,
    pub offline_fast_hashing: f64,
}

impl AttackRates {
    pub fn rate(&self, model: AttackModel) -> f64 {
        match model {
            AttackModel::OnlineThrottling => self.online_throttling,
            AttackModel::OnlineNoThrottling => self.online_no_throttling,
            AttackModel::OfflineSlowHashing => self.offline_slow_hashing,
            AttackModel::OfflineFastHashing => self.offline_fast_hashing,
        }
    }
}

impl Default for AttackRates {
    fn default() -> Self {
        Self {
            online_throttling: 100.0 / 3600.0,
            online_no_throttling: 10.0,
            offline_slow_hashing: 1e4,
            offline_fast_hashing: 1e10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    pub score_thresholds: [f64; 4],
    pub attack_rates: AttackRates,
    pub centuries_after_years: f64,
    /// Year the date matcher treats as "now".
    pub reference_year: i32,
    /// Delay applied by `analyze_tx` before analyzing, so a burst of
    /// keystrokes only triggers the last analysis.
    pub debounce: Duration,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            score_thresholds: DEFAULT_SCORE_THRESHOLDS,
            attack_rates: AttackRates::default(),
            centuries_after_years: DEFAULT_CENTURIES_AFTER_YEARS,
            reference_year: current_year(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl EstimatorConfig {
    /// Default configuration with environment overrides applied.
    ///
    /// Reads `PWD_REFERENCE_YEAR` and `PWD_DEBOUNCE_MS` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when a variable is set but does
    /// not parse, or any validation error of the resulting config.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(REFERENCE_YEAR_ENV) {
            config.reference_year = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: REFERENCE_YEAR_ENV,
                value: value.clone(),
            })?;
        }

        if let Ok(value) = std::env::var(DEBOUNCE_MS_ENV) {
            let millis: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: DEBOUNCE_MS_ENV,
                value: value.clone(),
            })?;
            config.debounce = Duration::from_millis(millis);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_score_thresholds(mut self, thresholds: [f64; 4]) -> Self {
        self.score_thresholds = thresholds;
        self
    }

    pub fn with_attack_rates(mut self, rates: AttackRates) -> Self {
        self.attack_rates = rates;
        self
    }

    pub fn with_centuries_after_years(mut self, years: f64) -> Self {
        self.centuries_after_years = years;
        self
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Checks the band and attacker-model invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = self.score_thresholds;
        let positive = thresholds.iter().all(|t| t.is_finite() && *t > 0.0);
        let increasing = thresholds.windows(2).all(|w| w[0] < w[1]);
        if !positive || !increasing {
            return Err(ConfigError::NonMonotonicThresholds(thresholds));
        }

        for model in AttackModel::ALL {
            let rate = self.attack_rates.rate(model);
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ConfigError::NonPositiveRate(model.name()));
            }
        }
        // AttackModel::ALL runs from fastest to slowest
        let ordered = AttackModel::ALL
            .windows(2)
            .all(|w| self.attack_rates.rate(w[0]) > self.attack_rates.rate(w[1]));
        if !ordered {
            return Err(ConfigError::RateOrder);
        }

        let ceiling = self.centuries_after_years;
        if ceiling.is_nan() || ceiling <= 0.0 {
            return Err(ConfigError::NonPositiveCeiling(self.centuries_after_years));
        }

        Ok(())
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}
