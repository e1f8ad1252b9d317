//! Guess estimator
//!
//! Turns each match into the number of guesses an attacker who knows the
//! pattern class would need to reach it. Every figure is kept as a base-10
//! logarithm: products become sums and long low-entropy passwords cannot
//! overflow.

use crate::matching::{DictionaryPattern, Match, MatchContext, Pattern};
use crate::tables::KeyboardGraph;

/// Floors applied to a non-bruteforce match that does not span the whole
/// password, so that a cheap fragment cannot make its neighbours look free.
pub const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
pub const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;

/// Dates at least this many years apart from the reference year all cost
/// the same.
pub const MIN_YEAR_SPACE: u32 = 20;

const DAYS_PER_YEAR: f64 = 365.0;
const SEPARATOR_STYLES: f64 = 4.0;

/// Sequence starts an attacker tries first.
const OBVIOUS_SEQUENCE_STARTS: [char; 7] = ['a', 'A', 'z', 'Z', '0', '1', '9'];

/// Size of the smallest character class containing `c`.
pub fn bruteforce_cardinality(c: char) -> u32 {
    match c {
        '0'..='9' => 10,
        'a'..='z' | 'A'..='Z' => 26,
        c if c.is_ascii() => 33,
        _ => 100,
    }
}

pub fn bruteforce_guesses_log10(c: char) -> f64 {
    f64::from(bruteforce_cardinality(c)).log10()
}

/// log10(a + b) given log10(a) and log10(b).
fn log10_add(a: f64, b: f64) -> f64 {
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi + (1.0 + 10f64.powf(lo - hi)).log10()
}

fn log10_n_choose_k(n: usize, k: usize) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    let k = k.min(n - k);
    (1..=k)
        .map(|i| ((n - k + i) as f64).log10() - (i as f64).log10())
        .sum()
}

/// Ways of choosing which `changed + unchanged` positions carry a variation
/// (a substitution, a shifted key), when an attacker tries the few-variation
/// cases first. Doubles when every position or none is changed.
fn log10_variations(changed: usize, unchanged: usize) -> f64 {
    if changed == 0 || unchanged == 0 {
        return 2f64.log10();
    }
    (1..=changed.min(unchanged)).fold(f64::NEG_INFINITY, |acc, i| {
        log10_add(acc, log10_n_choose_k(changed + unchanged, i))
    })
}

/// 1 when the word is lower case or only its first letter is capitalized,
/// 2 for any other capitalization.
fn log10_uppercase_variations(token: &str) -> f64 {
    if token.chars().skip(1).any(char::is_uppercase) {
        2f64.log10()
    } else {
        0.0
    }
}

fn log10_l33t_variations(pattern: &DictionaryPattern, token: &str) -> f64 {
    let lower: Vec<char> = token.chars().flat_map(char::to_lowercase).collect();
    pattern
        .substitutions
        .iter()
        .map(|&(typed, letter)| {
            let changed = lower.iter().filter(|&&c| c == typed).count();
            let unchanged = lower.iter().filter(|&&c| c == letter).count();
            log10_variations(changed, unchanged)
        })
        .sum()
}

fn dictionary_guesses(pattern: &DictionaryPattern, token: &str) -> f64 {
    let reversed = if pattern.reversed { 2f64.log10() } else { 0.0 };
    (pattern.rank as f64).log10()
        + log10_uppercase_variations(token)
        + log10_l33t_variations(pattern, token)
        + reversed
}

fn sequence_guesses(token: &str, len: usize, ascending: bool, space_size: u32) -> f64 {
    let first = token.chars().next();
    let base = if first.is_some_and(|c| OBVIOUS_SEQUENCE_STARTS.contains(&c)) {
        4.0
    } else {
        f64::from(space_size)
    };
    let direction = if ascending { 1.0 } else { 2.0 };
    (base * direction).log10() + (len as f64).log10()
}

/// Walks of every length from three keys up to `len` with at most `turns`
/// direction changes, times the ways the shifted keys can be placed.
fn keyboard_guesses(graph: &KeyboardGraph, len: usize, turns: usize, shifted: usize) -> f64 {
    let log_starts = (graph.starting_positions() as f64).log10();
    let log_degree = graph.average_degree().log10();

    let mut total = f64::NEG_INFINITY;
    for i in 3..=len {
        for j in 1..=turns.min(i - 1) {
            let walks = log10_n_choose_k(i - 1, j - 1) + log_starts + j as f64 * log_degree;
            total = log10_add(total, walks);
        }
    }
    if shifted > 0 {
        total += log10_variations(shifted, len - shifted);
    }
    total.max(0.0)
}

fn date_guesses(year: i32, separator: bool, reference_year: i32) -> f64 {
    let year_space = year.abs_diff(reference_year).max(MIN_YEAR_SPACE);
    let separator = if separator { SEPARATOR_STYLES } else { 1.0 };
    (f64::from(year_space) * DAYS_PER_YEAR * separator).log10()
}

/// Estimated guesses for `m`, as log10.
///
/// `password_len` is the length of the whole password the match was found
/// in; matches shorter than it are floored.
pub fn estimate_guesses(m: &Match, password_len: usize, ctx: &MatchContext<'_>) -> f64 {
    let len = m.len();
    let raw = match &m.pattern {
        Pattern::Bruteforce => {
            return m.token.chars().map(bruteforce_guesses_log10).sum();
        }
        Pattern::Dictionary(d) => dictionary_guesses(d, &m.token),
        Pattern::Sequence(s) => sequence_guesses(&m.token, len, s.ascending, s.space.size()),
        Pattern::Repeat(r) => r.base_guesses_log10 + (r.repeat_count as f64).log10(),
        Pattern::Keyboard(k) => match ctx.tables.graph(k.graph) {
            Some(graph) => keyboard_guesses(graph, len, k.turns, k.shifted_count),
            None => m.token.chars().map(bruteforce_guesses_log10).sum(),
        },
        Pattern::Date(d) => date_guesses(d.year, d.separator.is_some(), ctx.reference_year),
    };

    if len < password_len {
        let floor = if len == 1 {
            MIN_SUBMATCH_GUESSES_SINGLE_CHAR
        } else {
            MIN_SUBMATCH_GUESSES_MULTI_CHAR
        };
        raw.max(floor.log10())
    } else {
        raw
    }
}

/// Fills in `guesses_log10` for every match.
pub fn estimate_all(matches: &mut [Match], password_len: usize, ctx: &MatchContext<'_>) {
    for m in matches.iter_mut() {
        m.guesses_log10 = estimate_guesses(m, password_len, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::test_support::ctx;
    use crate::matching::{
        DatePattern, KeyboardPattern, RepeatPattern, SequencePattern, SequenceSpace,
    };
    use crate::tables::{DictionaryName, GraphName};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn dictionary(token: &str, rank: usize, reversed: bool, subs: Vec<(char, char)>) -> Match {
        Match::new(
            0,
            token.chars().count() - 1,
            token.to_string(),
            Pattern::Dictionary(DictionaryPattern {
                matched_word: token.to_lowercase(),
                rank,
                dictionary: DictionaryName::Passwords,
                reversed,
                substitutions: subs,
            }),
        )
    }

    #[test]
    fn test_bruteforce_cardinality() {
        assert_eq!(bruteforce_cardinality('7'), 10);
        assert_eq!(bruteforce_cardinality('q'), 26);
        assert_eq!(bruteforce_cardinality('Q'), 26);
        assert_eq!(bruteforce_cardinality('#'), 33);
        assert_eq!(bruteforce_cardinality(' '), 33);
        assert_eq!(bruteforce_cardinality('é'), 100);
    }

    #[test]
    fn test_n_choose_k() {
        assert!(close(log10_n_choose_k(5, 2), 10f64.log10()));
        assert!(close(log10_n_choose_k(5, 0), 0.0));
        assert_eq!(log10_n_choose_k(2, 3), f64::NEG_INFINITY);
    }

    #[test]
    fn test_log10_add() {
        assert!(close(log10_add(2.0, 2.0), 200f64.log10()));
        assert!(close(log10_add(f64::NEG_INFINITY, 1.5), 1.5));
    }

    #[test]
    fn test_dictionary_rank_is_guesses() {
        let m = dictionary("password", 1, false, vec![]);
        assert!(close(estimate_guesses(&m, 8, &ctx()), 0.0));
    }

    #[test]
    fn test_uppercase_multiplier() {
        assert!(close(log10_uppercase_variations("password"), 0.0));
        assert!(close(log10_uppercase_variations("Password"), 0.0));
        assert!(close(log10_uppercase_variations("PASSWORD"), 2f64.log10()));
        assert!(close(log10_uppercase_variations("passWord"), 2f64.log10()));
    }

    #[test]
    fn test_reversed_doubles() {
        let m = dictionary("drowssap", 1, true, vec![]);
        assert!(close(estimate_guesses(&m, 8, &ctx()), 2f64.log10()));
    }

    #[test]
    fn test_l33t_variations() {
        // one '4' among zero remaining 'a': every 'a' substituted
        let m = dictionary("p4ss", 10, false, vec![('4', 'a')]);
        assert!(close(estimate_guesses(&m, 4, &ctx()), 20f64.log10()));

        // one '4' and two 'a': C(3,1) = 3
        let m = dictionary("b4nana", 10, false, vec![('4', 'a')]);
        assert!(close(estimate_guesses(&m, 6, &ctx()), 30f64.log10()));
    }

    #[test]
    fn test_submatch_floor() {
        let m = dictionary("password", 1, false, vec![]);
        assert!(close(estimate_guesses(&m, 9, &ctx()), 50f64.log10()));
    }

    #[test]
    fn test_sequence_guesses() {
        let m = Match::new(
            0,
            7,
            "abcdefgh".to_string(),
            Pattern::Sequence(SequencePattern {
                space: SequenceSpace::Lower,
                ascending: true,
            }),
        );
        assert!(close(estimate_guesses(&m, 8, &ctx()), 32f64.log10()));

        let m = Match::new(
            0,
            3,
            "6543".to_string(),
            Pattern::Sequence(SequencePattern {
                space: SequenceSpace::Digits,
                ascending: false,
            }),
        );
        assert!(close(estimate_guesses(&m, 4, &ctx()), 80f64.log10()));
    }

    #[test]
    fn test_repeat_guesses() {
        let m = Match::new(
            0,
            9,
            "aaaaaaaaaa".to_string(),
            Pattern::Repeat(RepeatPattern {
                base_token: "a".to_string(),
                base_guesses_log10: 26f64.log10(),
                repeat_count: 10,
            }),
        );
        assert!(close(estimate_guesses(&m, 10, &ctx()), 260f64.log10()));
    }

    #[test]
    fn test_keyboard_guesses_grow_with_length_and_turns() {
        let ctx = ctx();
        let keyboard = |len: usize, turns: usize| {
            let m = Match::new(
                0,
                len - 1,
                "q".repeat(len),
                Pattern::Keyboard(KeyboardPattern {
                    graph: GraphName::Qwerty,
                    turns,
                    shifted_count: 0,
                }),
            );
            estimate_guesses(&m, len, &ctx)
        };
        assert!(keyboard(6, 1) < 3.0, "a straight six-key row stays under 1e3");
        assert!(keyboard(8, 1) > keyboard(6, 1));
        assert!(keyboard(6, 3) > keyboard(6, 1));
    }

    #[test]
    fn test_date_guesses() {
        let date = |year: i32, separator: Option<char>| {
            Match::new(
                0,
                7,
                "xxxxxxxx".to_string(),
                Pattern::Date(DatePattern {
                    separator,
                    year,
                    month: 1,
                    day: 1,
                }),
            )
        };
        let ctx = ctx();
        let recent = estimate_guesses(&date(2020, None), 8, &ctx);
        let old = estimate_guesses(&date(1964, None), 8, &ctx);
        let separated = estimate_guesses(&date(2020, Some('/')), 8, &ctx);
        // recent years fall back to the minimum year space
        assert!(close(recent, (20.0f64 * 365.0).log10()));
        assert!(close(old, (60.0f64 * 365.0).log10()));
        assert!(separated > recent);
    }

    #[test]
    fn test_date_guesses_extreme_reference_year() {
        assert!(date_guesses(1987, false, i32::MIN).is_finite());
        assert!(date_guesses(1987, true, i32::MAX).is_finite());
    }
}
