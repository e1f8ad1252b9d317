//! Ranked wordlists bundled with the crate.

use std::collections::HashMap;
use std::fmt;

use crate::error::TableError;

const PASSWORDS: &str = include_str!("../../assets/passwords.txt");
const ENGLISH: &str = include_str!("../../assets/english.txt");
const NAMES: &str = include_str!("../../assets/names.txt");
const SURNAMES: &str = include_str!("../../assets/surnames.txt");

/// Which ranked list a dictionary match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DictionaryName {
    Passwords,
    English,
    Names,
    Surnames,
}

impl DictionaryName {
    pub const ALL: [DictionaryName; 4] = [
        DictionaryName::Passwords,
        DictionaryName::English,
        DictionaryName::Names,
        DictionaryName::Surnames,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DictionaryName::Passwords => "passwords",
            DictionaryName::English => "english",
            DictionaryName::Names => "names",
            DictionaryName::Surnames => "surnames",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            DictionaryName::Passwords => PASSWORDS,
            DictionaryName::English => ENGLISH,
            DictionaryName::Names => NAMES,
            DictionaryName::Surnames => SURNAMES,
        }
    }
}

impl fmt::Display for DictionaryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased word → 1-based frequency rank.
#[derive(Debug)]
pub struct RankedDictionary {
    pub name: DictionaryName,
    ranks: HashMap<String, usize>,
    max_word_len: usize,
}

impl RankedDictionary {
    /// Parses one word per line; the first occurrence of a word keeps its rank.
    pub fn parse(name: DictionaryName, content: &str) -> Result<Self, TableError> {
        let mut ranks = HashMap::new();
        let mut max_word_len = 0;

        let words = content
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty());
        for word in words {
            let rank = ranks.len() + 1;
            max_word_len = max_word_len.max(word.chars().count());
            ranks.entry(word).or_insert(rank);
        }

        if ranks.is_empty() {
            return Err(TableError::EmptyWordlist(name.as_str()));
        }

        Ok(Self {
            name,
            ranks,
            max_word_len,
        })
    }

    pub fn bundled(name: DictionaryName) -> Result<Self, TableError> {
        Self::parse(name, name.source())
    }

    pub fn rank(&self, word: &str) -> Option<usize> {
        self.ranks.get(word).copied()
    }

    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
