//! Pattern matchers
//!
//! Each matcher scans the password for one class of weak substring and
//! reports every occurrence it finds. Matchers do not coordinate: their
//! matches may overlap freely, and choosing among them is left to the
//! segmentation step.

mod date;
mod dictionary;
mod keyboard;
mod repeat;
mod sequence;

use std::fmt;

use crate::tables::{DictionaryName, GraphName, Tables};

pub use date::date_match;
pub use dictionary::{dictionary_match, l33t_match, reverse_dictionary_match};
pub use keyboard::keyboard_match;
pub use repeat::repeat_match;
pub use sequence::sequence_match;

/// Read-only inputs shared by the matchers and the guess estimator.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    pub tables: &'a Tables,
    pub reference_year: i32,
}

/// Signature shared by every matcher.
pub type Matcher = fn(&[char], &MatchContext<'_>) -> Vec<Match>;

/// A weak substring of the password.
///
/// `i` and `j` are inclusive character indices. `guesses_log10` is filled in
/// by the guess estimator; matchers leave it at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub i: usize,
    pub j: usize,
    pub token: String,
    pub pattern: Pattern,
    pub guesses_log10: f64,
}

impl Match {
    pub fn new(i: usize, j: usize, token: String, pattern: Pattern) -> Self {
        Self {
            i,
            j,
            token,
            pattern,
            guesses_log10: 0.0,
        }
    }

    pub(crate) fn from_chars(chars: &[char], i: usize, j: usize, pattern: Pattern) -> Self {
        Self::new(i, j, chars[i..=j].iter().collect(), pattern)
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.j + 1 - self.i
    }

    pub fn kind(&self) -> PatternKind {
        match &self.pattern {
            Pattern::Dictionary(d) if d.reversed => PatternKind::ReverseDictionary,
            Pattern::Dictionary(_) => PatternKind::Dictionary,
            Pattern::Sequence(_) => PatternKind::Sequence,
            Pattern::Repeat(_) => PatternKind::Repeat,
            Pattern::Keyboard(_) => PatternKind::Keyboard,
            Pattern::Date(_) => PatternKind::Date,
            Pattern::Bruteforce => PatternKind::Bruteforce,
        }
    }

    /// Estimated guesses. Saturates to infinity past the `f64` range.
    pub fn guesses(&self) -> f64 {
        10f64.powf(self.guesses_log10)
    }
}

/// Pattern class of a match. The declaration order is the tie-break order
/// used when sorting matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternKind {
    Dictionary,
    ReverseDictionary,
    Sequence,
    Repeat,
    Keyboard,
    Date,
    Bruteforce,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Dictionary => "dictionary",
            PatternKind::ReverseDictionary => "reverse_dictionary",
            PatternKind::Sequence => "sequence",
            PatternKind::Repeat => "repeat",
            PatternKind::Keyboard => "keyboard",
            PatternKind::Date => "date",
            PatternKind::Bruteforce => "bruteforce",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Dictionary(DictionaryPattern),
    Sequence(SequencePattern),
    Repeat(RepeatPattern),
    Keyboard(KeyboardPattern),
    Date(DatePattern),
    Bruteforce,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryPattern {
    /// The dictionary word, lower-cased and with leet substitutions undone.
    pub matched_word: String,
    pub rank: usize,
    pub dictionary: DictionaryName,
    pub reversed: bool,
    /// `(typed, letter)` pairs applied to reach `matched_word`. Empty unless
    /// the match came from the leet matcher.
    pub substitutions: Vec<(char, char)>,
}

impl DictionaryPattern {
    pub fn l33t(&self) -> bool {
        !self.substitutions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSpace {
    Lower,
    Upper,
    Digits,
}

impl SequenceSpace {
    pub fn of(c: char) -> Option<Self> {
        match c {
            'a'..='z' => Some(SequenceSpace::Lower),
            'A'..='Z' => Some(SequenceSpace::Upper),
            '0'..='9' => Some(SequenceSpace::Digits),
            _ => None,
        }
    }

    pub fn size(&self) -> u32 {
        match self {
            SequenceSpace::Lower | SequenceSpace::Upper => 26,
            SequenceSpace::Digits => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencePattern {
    pub space: SequenceSpace,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatPattern {
    /// Smallest unit whose repetition forms the token.
    pub base_token: String,
    /// Guesses needed for one copy of the base unit.
    pub base_guesses_log10: f64,
    pub repeat_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardPattern {
    pub graph: GraphName,
    /// Direction changes along the walk; a straight row counts one.
    pub turns: usize,
    pub shifted_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePattern {
    pub separator: Option<char>,
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

/// Runs every matcher over the password and returns their matches, sorted
/// by position and then by pattern kind.
pub fn omnimatch(password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let matchers: [(&str, Matcher); 7] = [
        ("dictionary", dictionary_match),
        ("reverse_dictionary", reverse_dictionary_match),
        ("l33t", l33t_match),
        ("sequence", sequence_match),
        ("repeat", repeat_match),
        ("keyboard", keyboard_match),
        ("date", date_match),
    ];

    let mut matches = Vec::new();
    for (_matcher_name, matcher) in matchers {
        let found = matcher(password, ctx);

        #[cfg(feature = "tracing")]
        tracing::trace!("{} matcher found {} matches", _matcher_name, found.len());

        matches.extend(found);
    }

    matches.sort_by(|a, b| (a.i, a.j, a.kind()).cmp(&(b.i, b.j, b.kind())));
    matches
}

pub(crate) fn chars_of(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::tables::init_tables;

    pub fn ctx() -> MatchContext<'static> {
        MatchContext {
            tables: init_tables().expect("bundled tables are valid"),
            reference_year: 2024,
        }
    }

    pub fn run(matcher: Matcher, password: &str) -> Vec<Match> {
        matcher(&chars_of(password), &ctx())
    }
}
