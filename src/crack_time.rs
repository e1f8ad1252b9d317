//! Score banding and crack-time estimates.

use std::fmt;

use crate::config::EstimatorConfig;

const MINUTE: f64 = 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const MONTH: f64 = DAY * 31.0;
const YEAR: f64 = MONTH * 12.0;

/// Attacker throughput models, named after the zxcvbn result fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackModel {
    OfflineFastHashing,
    OfflineSlowHashing,
    OnlineNoThrottling,
    OnlineThrottling,
}

impl AttackModel {
    /// Every model, fastest attacker first.
    pub const ALL: [AttackModel; 4] = [
        AttackModel::OfflineFastHashing,
        AttackModel::OfflineSlowHashing,
        AttackModel::OnlineNoThrottling,
        AttackModel::OnlineThrottling,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AttackModel::OfflineFastHashing => "offline_fast_hashing_1e10_per_second",
            AttackModel::OfflineSlowHashing => "offline_slow_hashing_1e4_per_second",
            AttackModel::OnlineNoThrottling => "online_no_throttling_10_per_second",
            AttackModel::OnlineThrottling => "online_throttling_100_per_hour",
        }
    }
}

impl fmt::Display for AttackModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Discrete strength score, always within `0..=4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub const MAX: Score = Score(4);

    /// Number of thresholds the guess count reaches.
    pub fn from_guesses_log10(guesses_log10: f64, thresholds: &[f64; 4]) -> Self {
        let reached = thresholds
            .iter()
            .filter(|t| guesses_log10 >= t.log10())
            .count();
        Score(reached as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human label for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
    /// Nothing to analyze.
    Empty,
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Strength::VeryWeak => "Very Weak",
            Strength::Weak => "Weak",
            Strength::Fair => "Fair",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
            Strength::Empty => "Empty",
        }
    }
}

impl From<Score> for Strength {
    fn from(score: Score) -> Self {
        match score.value() {
            0 => Strength::VeryWeak,
            1 => Strength::Weak,
            2 => Strength::Fair,
            3 => Strength::Strong,
            _ => Strength::VeryStrong,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrackTime {
    pub seconds: f64,
    pub display: String,
}

/// Crack time under each attacker model.
#[derive(Debug, Clone, PartialEq)]
pub struct CrackTimes {
    times: [CrackTime; 4],
}

impl CrackTimes {
    /// Times for `10^guesses_log10` guesses at the configured rates.
    pub fn estimate(guesses_log10: f64, config: &EstimatorConfig) -> Self {
        let times = AttackModel::ALL.map(|model| {
            let rate = config.attack_rates.rate(model);
            let seconds = 10f64.powf(guesses_log10 - rate.log10());
            CrackTime {
                seconds,
                display: display_time(seconds, config.centuries_after_years),
            }
        });
        Self { times }
    }

    /// Every model at zero seconds.
    pub fn zero() -> Self {
        Self {
            times: AttackModel::ALL.map(|_| CrackTime {
                seconds: 0.0,
                display: "0 seconds".to_string(),
            }),
        }
    }

    pub fn get(&self, model: AttackModel) -> &CrackTime {
        // declaration order matches AttackModel::ALL
        &self.times[model as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttackModel, &CrackTime)> {
        AttackModel::ALL.into_iter().zip(self.times.iter())
    }
}

/// Formats a duration with the largest unit that fits, up to
/// `centuries_after_years`.
pub fn display_time(seconds: f64, centuries_after_years: f64) -> String {
    let (amount, unit) = if seconds < 1.0 {
        return "less than a second".to_string();
    } else if seconds < MINUTE {
        (seconds, "second")
    } else if seconds < HOUR {
        (seconds / MINUTE, "minute")
    } else if seconds < DAY {
        (seconds / HOUR, "hour")
    } else if seconds < MONTH {
        (seconds / DAY, "day")
    } else if seconds < YEAR {
        (seconds / MONTH, "month")
    } else if seconds < YEAR * centuries_after_years {
        (seconds / YEAR, "year")
    } else {
        return "centuries".to_string();
    };

    let amount = amount.round() as u64;
    if amount == 1 {
        format!("{} {}", amount, unit)
    } else {
        format!("{} {}s", amount, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SCORE_THRESHOLDS;

    #[test]
    fn test_score_bands() {
        let t = &DEFAULT_SCORE_THRESHOLDS;
        assert_eq!(Score::from_guesses_log10(0.0, t).value(), 0);
        assert_eq!(Score::from_guesses_log10(2.99, t).value(), 0);
        assert_eq!(Score::from_guesses_log10(3.0, t).value(), 1);
        assert_eq!(Score::from_guesses_log10(7.5, t).value(), 2);
        assert_eq!(Score::from_guesses_log10(9.0, t).value(), 3);
        assert_eq!(Score::from_guesses_log10(10.0, t).value(), 4);
        assert_eq!(Score::from_guesses_log10(400.0, t), Score::MAX);
    }

    #[test]
    fn test_strength_labels() {
        assert_eq!(Strength::from(Score(0)), Strength::VeryWeak);
        assert_eq!(Strength::from(Score(2)).to_string(), "Fair");
        assert_eq!(Strength::from(Score::MAX).label(), "Very Strong");
        assert_eq!(Strength::Empty.label(), "Empty");
    }

    #[test]
    fn test_display_time_units() {
        assert_eq!(display_time(0.2, 100.0), "less than a second");
        assert_eq!(display_time(1.0, 100.0), "1 second");
        assert_eq!(display_time(42.0, 100.0), "42 seconds");
        assert_eq!(display_time(90.0, 100.0), "2 minutes");
        assert_eq!(display_time(HOUR, 100.0), "1 hour");
        assert_eq!(display_time(3.0 * DAY, 100.0), "3 days");
        assert_eq!(display_time(2.0 * MONTH, 100.0), "2 months");
        assert_eq!(display_time(5.0 * YEAR, 100.0), "5 years");
        assert_eq!(display_time(500.0 * YEAR, 100.0), "centuries");
        assert_eq!(display_time(f64::INFINITY, 100.0), "centuries");
    }

    #[test]
    fn test_ceiling_is_configurable() {
        assert_eq!(display_time(500.0 * YEAR, 10_000.0), "500 years");
        assert_eq!(display_time(20.0 * YEAR, 10.0), "centuries");
    }

    #[test]
    fn test_crack_times_per_model() {
        let config = EstimatorConfig::default();
        let times = CrackTimes::estimate(4.0, &config);
        assert!((times.get(AttackModel::OfflineSlowHashing).seconds - 1.0).abs() < 1e-9);
        assert_eq!(times.get(AttackModel::OfflineSlowHashing).display, "1 second");
        assert_eq!(
            times.get(AttackModel::OfflineFastHashing).display,
            "less than a second"
        );
        // 1e4 guesses at 100 per hour is 100 hours
        assert_eq!(times.get(AttackModel::OnlineThrottling).display, "4 days");

        let seconds: Vec<f64> = times.iter().map(|(_, t)| t.seconds).collect();
        assert!(seconds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_times() {
        let times = CrackTimes::zero();
        for (_, time) in times.iter() {
            assert_eq!(time.seconds, 0.0);
            assert_eq!(time.display, "0 seconds");
        }
    }
}
