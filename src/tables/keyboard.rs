//! Keyboard adjacency graphs.
//!
//! Graphs are built from a textual picture of the layout. Each key is a
//! token of one or two characters (unshifted, shifted). Slanted layouts
//! (staggered rows of a real keyboard) give each key six neighbours;
//! aligned layouts (a numeric keypad) give it eight. Neighbours are listed
//! in a fixed clockwise order so that a change of index is a change of
//! direction.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::TableError;

const QWERTY: &str = concat!(
    "`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+\n",
    "    qQ wW eE rR tT yY uU iI oO pP [{ ]} \\|\n",
    "     aA sS dD fF gG hH jJ kK lL ;: '\"\n",
    "      zZ xX cC vV bB nN mM ,< .> /?",
);

const KEYPAD: &str = concat!(
    "  / * -\n",
    "7 8 9 +\n",
    "4 5 6\n",
    "1 2 3\n",
    "  0 .",
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphName {
    Qwerty,
    Keypad,
}

impl GraphName {
    pub const ALL: [GraphName; 2] = [GraphName::Qwerty, GraphName::Keypad];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphName::Qwerty => "qwerty",
            GraphName::Keypad => "keypad",
        }
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a typed character sits relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Index of the neighbour slot, stable per layout.
    pub direction: usize,
    /// The character is the shifted half of its key.
    pub shifted: bool,
}

#[derive(Debug)]
pub struct KeyboardGraph {
    pub name: GraphName,
    adjacency: HashMap<char, Vec<Option<&'static str>>>,
    shifted: HashSet<char>,
    starting_positions: usize,
    average_degree: f64,
}

impl KeyboardGraph {
    pub fn bundled(name: GraphName) -> Result<Self, TableError> {
        match name {
            GraphName::Qwerty => Self::build(name, QWERTY, true),
            GraphName::Keypad => Self::build(name, KEYPAD, false),
        }
    }

    pub fn build(name: GraphName, layout: &'static str, slanted: bool) -> Result<Self, TableError> {
        let token_size = layout
            .split_whitespace()
            .next()
            .map(|t| t.chars().count())
            .ok_or(TableError::EmptyLayout(name.as_str()))?;
        let x_unit = token_size as i32 + 1;

        let mut positions: HashMap<(i32, i32), &'static str> = HashMap::new();
        for (y, line) in layout.lines().enumerate() {
            let y = y as i32;
            let slant = if slanted { y - 1 } else { 0 };
            for (column, token) in tokens_with_columns(line) {
                let misaligned = || TableError::MisalignedKey {
                    graph: name.as_str(),
                    key: token.to_string(),
                };
                if token.chars().count() != token_size {
                    return Err(misaligned());
                }
                let x = (column as i32 - slant).div_euclid(x_unit);
                if positions.insert((x, y), token).is_some() {
                    return Err(misaligned());
                }
            }
        }

        let mut adjacency = HashMap::new();
        let mut shifted = HashSet::new();
        let mut degree_sum = 0usize;
        for (&(x, y), &token) in &positions {
            let neighbours: Vec<Option<&'static str>> = neighbour_coords(x, y, slanted)
                .into_iter()
                .map(|coord| positions.get(&coord).copied())
                .collect();
            degree_sum += neighbours.iter().flatten().count();
            shifted.extend(token.chars().nth(1));
            for c in token.chars() {
                if adjacency.insert(c, neighbours.clone()).is_some() {
                    return Err(TableError::DuplicateKey {
                        graph: name.as_str(),
                        key: c,
                    });
                }
            }
        }

        let starting_positions = positions.len();
        Ok(Self {
            name,
            adjacency,
            shifted,
            starting_positions,
            average_degree: degree_sum as f64 / starting_positions as f64,
        })
    }

    /// Returns the step from `from` to `to` if the two keys are adjacent.
    pub fn step(&self, from: char, to: char) -> Option<Step> {
        let neighbours = self.adjacency.get(&from)?;
        neighbours
            .iter()
            .enumerate()
            .find_map(|(direction, key)| {
                let position = (*key)?.chars().position(|c| c == to)?;
                Some(Step {
                    direction,
                    shifted: position == 1,
                })
            })
    }

    /// Whether `c` is the shifted half of a key on this layout.
    pub fn is_shifted(&self, c: char) -> bool {
        self.shifted.contains(&c)
    }

    /// Number of physical keys.
    pub fn starting_positions(&self) -> usize {
        self.starting_positions
    }

    /// Mean number of neighbours per physical key.
    pub fn average_degree(&self) -> f64 {
        self.average_degree
    }
}

/// Whitespace-separated tokens of `line` with the column each starts at.
fn tokens_with_columns(line: &'static str) -> Vec<(usize, &'static str)> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (column, c) in line.char_indices().chain([(line.len(), ' ')]) {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(column),
            (true, Some(s)) => {
                tokens.push((s, &line[s..column]));
                start = None;
            }
            _ => {}
        }
    }
    tokens
}

fn neighbour_coords(x: i32, y: i32, slanted: bool) -> Vec<(i32, i32)> {
    if slanted {
        vec![
            (x - 1, y),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    } else {
        vec![
            (x - 1, y),
            (x - 1, y - 1),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x + 1, y + 1),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    }
}
