//! Static tables
//!
//! Wordlists, keyboard graphs and the leet table are bundled with the
//! crate, parsed once and shared read-only for the rest of the process.

mod keyboard;
mod wordlists;

use std::sync::OnceLock;

use crate::error::TableError;

pub use keyboard::{GraphName, KeyboardGraph, Step};
pub use wordlists::{DictionaryName, RankedDictionary};

static TABLES: OnceLock<Tables> = OnceLock::new();

/// Letter → characters commonly typed in its place.
pub const LEET_TABLE: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('b', &['8']),
    ('c', &['(', '{', '[', '<']),
    ('e', &['3']),
    ('g', &['6', '9']),
    ('i', &['1', '!', '|']),
    ('l', &['1', '|', '7']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['+', '7']),
    ('x', &['%']),
    ('z', &['2']),
];

/// Characters accepted between the day, month and year of a date.
pub const DATE_SEPARATORS: &[char] = &['/', '-', '.', ' ', '_', '\\'];

#[derive(Debug)]
pub struct Tables {
    pub dictionaries: Vec<RankedDictionary>,
    pub graphs: Vec<KeyboardGraph>,
}

impl Tables {
    /// Parses and validates every bundled table.
    pub fn load() -> Result<Self, TableError> {
        let dictionaries = DictionaryName::ALL
            .into_iter()
            .map(RankedDictionary::bundled)
            .collect::<Result<Vec<_>, _>>()?;
        let graphs = GraphName::ALL
            .into_iter()
            .map(KeyboardGraph::bundled)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            dictionaries,
            graphs,
        })
    }

    pub fn dictionary(&self, name: DictionaryName) -> Option<&RankedDictionary> {
        self.dictionaries.iter().find(|d| d.name == name)
    }

    pub fn graph(&self, name: GraphName) -> Option<&KeyboardGraph> {
        self.graphs.iter().find(|g| g.name == name)
    }

    /// Longest word across all dictionaries, in characters.
    pub fn max_word_len(&self) -> usize {
        self.dictionaries
            .iter()
            .map(RankedDictionary::max_word_len)
            .max()
            .unwrap_or(0)
    }

    /// Letters a leet character may stand for.
    pub fn leet_letters(c: char) -> impl Iterator<Item = char> {
        LEET_TABLE
            .iter()
            .filter(move |(_, subs)| subs.contains(&c))
            .map(|(letter, _)| *letter)
    }
}

/// Initializes the static tables. Call once at startup.
///
/// Idempotent: later calls return the already loaded tables.
///
/// # Errors
///
/// Returns an error if a bundled table is corrupt. The process should not
/// continue without a complete table set.
pub fn init_tables() -> Result<&'static Tables, TableError> {
    if let Some(tables) = TABLES.get() {
        return Ok(tables);
    }

    let tables = Tables::load().inspect_err(|_e| {
        #[cfg(feature = "tracing")]
        tracing::error!("Static table initialization FAILED: {}", _e);
    })?;

    #[cfg(feature = "tracing")]
    tracing::info!(
        "Static tables initialized: {} dictionaries, {} keyboard graphs",
        tables.dictionaries.len(),
        tables.graphs.len()
    );

    Ok(TABLES.get_or_init(|| tables))
}
