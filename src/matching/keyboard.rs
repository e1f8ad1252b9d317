//! Keyboard matcher: walks over physically adjacent keys (`qwerty`,
//! `zxcvfr`, `7896`).

use super::{KeyboardPattern, Match, MatchContext, Pattern};
use crate::tables::KeyboardGraph;

const MIN_WALK_LEN: usize = 3;

fn walks(password: &[char], graph: &KeyboardGraph) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();
    let mut i = 0;

    while i + 1 < n {
        let mut j = i + 1;
        let mut last_direction = None;
        let mut turns = 0;
        let mut shifted_count = usize::from(graph.is_shifted(password[i]));

        while j < n {
            let Some(step) = graph.step(password[j - 1], password[j]) else {
                break;
            };
            if step.shifted {
                shifted_count += 1;
            }
            if last_direction != Some(step.direction) {
                turns += 1;
                last_direction = Some(step.direction);
            }
            j += 1;
        }

        if j - i >= MIN_WALK_LEN {
            matches.push(Match::from_chars(
                password,
                i,
                j - 1,
                Pattern::Keyboard(KeyboardPattern {
                    graph: graph.name,
                    turns,
                    shifted_count,
                }),
            ));
        }
        i = j;
    }
    matches
}

/// Maximal walks of at least three keys on every bundled layout.
pub fn keyboard_match(password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    ctx.tables
        .graphs
        .iter()
        .flat_map(|graph| walks(password, graph))
        .collect()
}
