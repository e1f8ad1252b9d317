//! Feedback for weak passwords.
//!
//! The warning and the targeted suggestion are chosen from the dominant
//! match of the winning segmentation: the non-bruteforce match with the
//! most guesses, the longer token on a tie.

use std::fmt;

use crate::crack_time::Score;
use crate::matching::{DictionaryPattern, Match, Pattern};
use crate::tables::DictionaryName;

/// Scores at or above this get no feedback.
const QUIET_SCORE: u8 = 3;

/// Passwords-list matches this cheap still read as a known password.
const SIMILAR_TO_COMMON_MAX_LOG10: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    EmptyPassword,
    StraightRow,
    ShortKeyboardPattern,
    SimpleRepeat,
    ExtendedRepeat,
    Sequence,
    Date,
    TopTen,
    TopHundred,
    VeryCommon,
    SimilarToCommon,
    WordByItself,
    NamesByThemselves,
    CommonNames,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Warning::EmptyPassword => "Please enter a password",
            Warning::StraightRow => "Straight rows of keys are easy to guess",
            Warning::ShortKeyboardPattern => "Short keyboard patterns are easy to guess",
            Warning::SimpleRepeat => "Repeats like \"aaa\" are easy to guess",
            Warning::ExtendedRepeat => {
                "Repeats like \"abcabcabc\" are only slightly harder to guess than \"abc\""
            }
            Warning::Sequence => "Sequences like abc or 6543 are easy to guess",
            Warning::Date => "Dates are often easy to guess",
            Warning::TopTen => "This is a top-10 common password",
            Warning::TopHundred => "This is a top-100 common password",
            Warning::VeryCommon => "This is a very common password",
            Warning::SimilarToCommon => "This is similar to a commonly used password",
            Warning::WordByItself => "A word by itself is easy to guess",
            Warning::NamesByThemselves => "Names and surnames by themselves are easy to guess",
            Warning::CommonNames => "Common names and surnames are easy to guess",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suggestion {
    PasswordCannotBeEmpty,
    AddAnotherWord,
    AvoidRepeatedWords,
    UseLongerKeyboardPattern,
    AvoidRepeatedBlocks,
    AvoidSequences,
    AvoidDates,
    CapitalizationDoesntHelp,
    AllUppercase,
    ReversedWords,
    PredictableSubstitutions,
    AvoidCommonWords,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Suggestion::PasswordCannotBeEmpty => "Password cannot be empty",
            Suggestion::AddAnotherWord => "Add another word or two. Uncommon words are better.",
            Suggestion::AvoidRepeatedWords => "Avoid repeated words and characters",
            Suggestion::UseLongerKeyboardPattern => "Use a longer keyboard pattern with more turns",
            Suggestion::AvoidRepeatedBlocks => "Avoid repeating short blocks of characters",
            Suggestion::AvoidSequences => "Avoid sequences",
            Suggestion::AvoidDates => "Avoid dates and years that are associated with you",
            Suggestion::CapitalizationDoesntHelp => "Capitalization doesn't help very much",
            Suggestion::AllUppercase => "All-uppercase is almost as easy to guess as all-lowercase",
            Suggestion::ReversedWords => "Reversed words aren't much harder to guess",
            Suggestion::PredictableSubstitutions => {
                "Predictable substitutions like '@' instead of 'a' don't help very much"
            }
            Suggestion::AvoidCommonWords => {
                "Avoid words and names that appear in common password lists"
            }
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub warning: Option<Warning>,
    pub suggestions: Vec<Suggestion>,
}

impl Feedback {
    pub fn is_empty(&self) -> bool {
        self.warning.is_none() && self.suggestions.is_empty()
    }
}

/// Feedback for the empty password.
pub fn empty_feedback() -> Feedback {
    Feedback {
        warning: Some(Warning::EmptyPassword),
        suggestions: vec![Suggestion::PasswordCannotBeEmpty],
    }
}

/// Builds feedback for a scored segmentation.
pub fn feedback(score: Score, sequence: &[Match]) -> Feedback {
    if score.value() >= QUIET_SCORE {
        return Feedback::default();
    }

    let mut suggestions = vec![Suggestion::AddAnotherWord, Suggestion::AvoidRepeatedWords];
    let Some(dominant) = dominant_match(sequence) else {
        return Feedback {
            warning: None,
            suggestions,
        };
    };

    let sole_match = sequence.len() == 1;
    let (warning, targeted) = match &dominant.pattern {
        Pattern::Dictionary(d) => dictionary_feedback(d, dominant, sole_match),
        Pattern::Keyboard(k) => {
            let warning = if k.turns == 1 {
                Warning::StraightRow
            } else {
                Warning::ShortKeyboardPattern
            };
            (Some(warning), Suggestion::UseLongerKeyboardPattern)
        }
        Pattern::Repeat(r) => {
            let warning = if r.base_token.chars().count() == 1 {
                Warning::SimpleRepeat
            } else {
                Warning::ExtendedRepeat
            };
            (Some(warning), Suggestion::AvoidRepeatedBlocks)
        }
        Pattern::Sequence(_) => (Some(Warning::Sequence), Suggestion::AvoidSequences),
        Pattern::Date(_) => (Some(Warning::Date), Suggestion::AvoidDates),
        Pattern::Bruteforce => {
            return Feedback {
                warning: None,
                suggestions,
            };
        }
    };

    suggestions.push(targeted);
    Feedback {
        warning,
        suggestions,
    }
}

fn dominant_match(sequence: &[Match]) -> Option<&Match> {
    sequence
        .iter()
        .filter(|m| !matches!(m.pattern, Pattern::Bruteforce))
        .reduce(|best, m| {
            let more_guesses = m.guesses_log10 > best.guesses_log10;
            let longer_tie = m.guesses_log10 == best.guesses_log10 && m.len() > best.len();
            if more_guesses || longer_tie { m } else { best }
        })
}

fn dictionary_feedback(
    pattern: &DictionaryPattern,
    m: &Match,
    sole_match: bool,
) -> (Option<Warning>, Suggestion) {
    let warning = match pattern.dictionary {
        DictionaryName::Passwords => {
            if sole_match && !pattern.l33t() && !pattern.reversed {
                Some(match pattern.rank {
                    0..=10 => Warning::TopTen,
                    11..=100 => Warning::TopHundred,
                    _ => Warning::VeryCommon,
                })
            } else if m.guesses_log10 <= SIMILAR_TO_COMMON_MAX_LOG10 {
                Some(Warning::SimilarToCommon)
            } else {
                None
            }
        }
        DictionaryName::English => sole_match.then_some(Warning::WordByItself),
        DictionaryName::Names | DictionaryName::Surnames => Some(if sole_match {
            Warning::NamesByThemselves
        } else {
            Warning::CommonNames
        }),
    };

    let token = &m.token;
    let mut chars = token.chars();
    let capitalized = chars.next().is_some_and(char::is_uppercase)
        && chars.clone().next().is_some()
        && !chars.any(char::is_uppercase);
    let all_uppercase = token.chars().any(char::is_uppercase) && token.to_uppercase() == *token;

    let targeted = if capitalized {
        Suggestion::CapitalizationDoesntHelp
    } else if all_uppercase {
        Suggestion::AllUppercase
    } else if pattern.reversed && token.chars().count() >= 4 {
        Suggestion::ReversedWords
    } else if pattern.l33t() {
        Suggestion::PredictableSubstitutions
    } else {
        Suggestion::AvoidCommonWords
    };

    (warning, targeted)
}
