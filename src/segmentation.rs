//! Minimum-guess segmentation.
//!
//! Chooses the gapless, non-overlapping cover of the password by matches
//! whose guesses multiply to the smallest total. Positions no match
//! explains are covered one character at a time by bruteforce matches.
//! The search is a shortest path over character positions in log10 space.

use crate::guesses::{bruteforce_guesses_log10, estimate_all};
use crate::matching::{Match, MatchContext, Pattern, omnimatch};

/// Totals closer than this are treated as equal.
const TIE_EPSILON: f64 = 1e-9;

/// The winning cover.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// Matches in password order; their ranges tile `[0, len)`.
    pub sequence: Vec<Match>,
    pub guesses_log10: f64,
}

#[derive(Debug, Clone, Copy)]
enum Choice {
    Bruteforce,
    Match(usize),
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    total: f64,
    len: usize,
    choice: Choice,
}

/// Runs the DP over `matches`, whose guesses must already be estimated.
pub fn most_guessable(password: &[char], matches: &[Match]) -> Segmentation {
    let n = password.len();
    if n == 0 {
        return Segmentation {
            sequence: Vec::new(),
            guesses_log10: 0.0,
        };
    }

    let mut ending_at: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (idx, m) in matches.iter().enumerate() {
        if m.i <= m.j && m.j < n {
            ending_at[m.j].push(idx);
        }
    }

    // best[k] covers [0, k)
    let mut best: Vec<Option<Cell>> = vec![None; n + 1];
    let mut reached = vec![f64::INFINITY; n + 1];
    reached[0] = 0.0;

    for k in 1..=n {
        let mut cell = Cell {
            total: reached[k - 1] + bruteforce_guesses_log10(password[k - 1]),
            len: 1,
            choice: Choice::Bruteforce,
        };

        for &idx in &ending_at[k - 1] {
            let m = &matches[idx];
            let total = reached[m.i] + m.guesses_log10;
            let len = m.len();
            let better = total < cell.total - TIE_EPSILON
                || ((total - cell.total).abs() <= TIE_EPSILON && len > cell.len);
            if better {
                cell = Cell {
                    total,
                    len,
                    choice: Choice::Match(idx),
                };
            }
        }

        reached[k] = cell.total;
        best[k] = Some(cell);
    }

    let mut sequence = Vec::new();
    let mut k = n;
    while k > 0 {
        let Some(cell) = best[k] else {
            break;
        };
        let m = match cell.choice {
            Choice::Match(idx) => matches[idx].clone(),
            Choice::Bruteforce => {
                let mut m = Match::from_chars(password, k - 1, k - 1, Pattern::Bruteforce);
                m.guesses_log10 = bruteforce_guesses_log10(password[k - 1]);
                m
            }
        };
        k -= cell.len;
        sequence.push(m);
    }
    sequence.reverse();

    Segmentation {
        sequence,
        guesses_log10: reached[n],
    }
}

/// Matches, estimates and segments `password` in one go.
pub fn segment(password: &[char], ctx: &MatchContext<'_>) -> Segmentation {
    let mut matches = omnimatch(password, ctx);
    estimate_all(&mut matches, password.len(), ctx);
    most_guessable(password, &matches)
}
