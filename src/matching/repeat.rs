//! Repeat matcher: `aaaa`, `abcabcabc`, `lolol`...

use super::{Match, MatchContext, Pattern, RepeatPattern};
use crate::segmentation::segment;

/// Number of times `unit` repeats back to back starting at `start`.
fn repeat_count(password: &[char], start: usize, unit: usize) -> usize {
    let base = &password[start..start + unit];
    let mut count = 1;
    while start + (count + 1) * unit <= password.len()
        && password[start + count * unit..start + (count + 1) * unit] == *base
    {
        count += 1;
    }
    count
}

/// Greedy scan for repeated blocks. At each position the unit length that
/// covers the most characters wins, the shortest unit on a tie, and the
/// scan resumes after the match.
///
/// The guesses for one copy of the base unit come from segmenting the unit
/// itself, so `abcabc` costs about as much as `abc` times two.
pub fn repeat_match(password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();
    let mut i = 0;

    while i < n {
        let mut best: Option<(usize, usize)> = None;
        for unit in 1..=(n - i) / 2 {
            let count = repeat_count(password, i, unit);
            let covered = unit * count;
            if count >= 2 && best.is_none_or(|(u, c)| covered > u * c) {
                best = Some((unit, count));
            }
        }

        let Some((unit, count)) = best else {
            i += 1;
            continue;
        };

        let base = &password[i..i + unit];
        let base_guesses_log10 = segment(base, ctx).guesses_log10;
        let j = i + unit * count - 1;
        matches.push(Match::from_chars(
            password,
            i,
            j,
            Pattern::Repeat(RepeatPattern {
                base_token: base.iter().collect(),
                base_guesses_log10,
                repeat_count: count,
            }),
        ));
        i = j + 1;
    }
    matches
}
