//! Sequence matcher: runs like `abcd`, `XYZ` or `4321`.

use super::{Match, MatchContext, Pattern, SequencePattern, SequenceSpace};

const MIN_SEQUENCE_LEN: usize = 3;

/// Signed step from `a` to `b` when both belong to the same alphabet.
fn step(a: char, b: char) -> Option<(SequenceSpace, i64)> {
    let space = SequenceSpace::of(a)?;
    if SequenceSpace::of(b)? != space {
        return None;
    }
    Some((space, b as i64 - a as i64))
}

/// Maximal runs of at least three characters whose code points step by +1
/// or -1 inside one alphabet. Neighbouring runs may share a boundary
/// character (`abcba` yields `abc` and `cba`).
pub fn sequence_match(password: &[char], _ctx: &MatchContext<'_>) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();
    let mut i = 0;

    while i + 1 < n {
        let Some((space, delta)) = step(password[i], password[i + 1]) else {
            i += 1;
            continue;
        };
        if delta.abs() != 1 {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j + 1 < n && step(password[j], password[j + 1]) == Some((space, delta)) {
            j += 1;
        }

        if j - i + 1 >= MIN_SEQUENCE_LEN {
            matches.push(Match::from_chars(
                password,
                i,
                j,
                Pattern::Sequence(SequencePattern {
                    space,
                    ascending: delta > 0,
                }),
            ));
        }
        i = j;
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::*;

    fn spans(password: &str) -> Vec<(usize, usize, String)> {
        run(sequence_match, password)
            .into_iter()
            .map(|m| (m.i, m.j, m.token))
            .collect()
    }

    #[test]
    fn test_ascending_lowercase() {
        let matches = run(sequence_match, "abcdefgh");
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (0, 7));
        assert_eq!(
            matches[0].pattern,
            Pattern::Sequence(SequencePattern {
                space: SequenceSpace::Lower,
                ascending: true
            })
        );
    }

    #[test]
    fn test_descending_digits() {
        let matches = run(sequence_match, "xx4321");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "4321");
        assert!(matches!(
            matches[0].pattern,
            Pattern::Sequence(SequencePattern {
                space: SequenceSpace::Digits,
                ascending: false
            })
        ));
    }

    #[test]
    fn test_shared_boundary() {
        assert_eq!(
            spans("abcba"),
            vec![(0, 2, "abc".to_string()), (2, 4, "cba".to_string())]
        );
    }

    #[test]
    fn test_alphabets_do_not_mix() {
        assert!(spans("xyZ").is_empty());
        assert!(spans("9:;").is_empty());
        assert_eq!(spans("XYZ"), vec![(0, 2, "XYZ".to_string())]);
    }

    #[test]
    fn test_too_short_or_wrong_step() {
        assert!(spans("ab").is_empty());
        assert!(spans("aceg").is_empty());
        assert!(spans("aaa").is_empty());
    }
}
