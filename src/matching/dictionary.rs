//! Dictionary matchers: plain, reversed and leet-substituted words.

use std::collections::HashSet;

use super::{DictionaryPattern, Match, MatchContext, Pattern};
use crate::tables::{DictionaryName, Tables};

struct WordHit {
    i: usize,
    j: usize,
    word: String,
    rank: usize,
    dictionary: DictionaryName,
}

/// Lower-cases one character at a time so indices stay aligned with the
/// original password.
pub(crate) fn lowercase(chars: &[char]) -> Vec<char> {
    chars
        .iter()
        .map(|&c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

fn find_words(lower: &[char], ctx: &MatchContext<'_>) -> Vec<WordHit> {
    let n = lower.len();
    let max_len = ctx.tables.max_word_len();
    let mut hits = Vec::new();

    for i in 0..n {
        let mut word = String::new();
        for j in i..n.min(i + max_len) {
            word.push(lower[j]);
            for dict in &ctx.tables.dictionaries {
                if let Some(rank) = dict.rank(&word) {
                    hits.push(WordHit {
                        i,
                        j,
                        word: word.clone(),
                        rank,
                        dictionary: dict.name,
                    });
                }
            }
        }
    }
    hits
}

/// Case-insensitive lookup of every substring in every ranked wordlist.
pub fn dictionary_match(password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    find_words(&lowercase(password), ctx)
        .into_iter()
        .map(|hit| {
            Match::from_chars(
                password,
                hit.i,
                hit.j,
                Pattern::Dictionary(DictionaryPattern {
                    matched_word: hit.word,
                    rank: hit.rank,
                    dictionary: hit.dictionary,
                    reversed: false,
                    substitutions: Vec::new(),
                }),
            )
        })
        .collect()
}

/// Dictionary words typed backwards. Palindromes are left to
/// [`dictionary_match`].
pub fn reverse_dictionary_match(password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let n = password.len();
    let reversed: Vec<char> = password.iter().rev().copied().collect();

    find_words(&lowercase(&reversed), ctx)
        .into_iter()
        .filter_map(|hit| {
            let (i, j) = (n - 1 - hit.j, n - 1 - hit.i);
            let token_lower: String = lowercase(&password[i..=j]).into_iter().collect();
            if token_lower == hit.word {
                return None;
            }
            Some(Match::from_chars(
                password,
                i,
                j,
                Pattern::Dictionary(DictionaryPattern {
                    matched_word: hit.word,
                    rank: hit.rank,
                    dictionary: hit.dictionary,
                    reversed: true,
                    substitutions: Vec::new(),
                }),
            ))
        })
        .collect()
}

/// Every way of reading the leet characters present in `password` as
/// letters. Ambiguous characters (`1` may be `i` or `l`) branch.
fn enumerate_substitutions(password: &[char]) -> Vec<Vec<(char, char)>> {
    let mut typed: Vec<char> = Vec::new();
    for &c in password {
        if !typed.contains(&c) && Tables::leet_letters(c).next().is_some() {
            typed.push(c);
        }
    }
    if typed.is_empty() {
        return Vec::new();
    }

    let mut maps: Vec<Vec<(char, char)>> = vec![Vec::new()];
    for t in typed {
        let letters: Vec<char> = Tables::leet_letters(t).collect();
        maps = maps
            .into_iter()
            .flat_map(|map| {
                letters.iter().map(move |&letter| {
                    let mut next = map.clone();
                    next.push((t, letter));
                    next
                })
            })
            .collect();
    }
    maps
}

/// Dictionary words with common symbol-for-letter substitutions undone,
/// e.g. `p4ssw0rd`. Only tokens that actually contain a substitution and
/// are longer than one character are reported.
pub fn l33t_match(password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let lower = lowercase(password);
    let mut seen: HashSet<(usize, usize, String, DictionaryName)> = HashSet::new();
    let mut matches = Vec::new();

    for sub in enumerate_substitutions(password) {
        let translated: Vec<char> = lower
            .iter()
            .map(|c| {
                sub.iter()
                    .find(|(typed, _)| typed == c)
                    .map_or(*c, |(_, letter)| *letter)
            })
            .collect();

        for hit in find_words(&translated, ctx) {
            if hit.i == hit.j {
                continue;
            }
            let token = &lower[hit.i..=hit.j];
            let used: Vec<(char, char)> = sub
                .iter()
                .filter(|(typed, _)| token.contains(typed))
                .copied()
                .collect();
            if used.is_empty() {
                continue;
            }
            if !seen.insert((hit.i, hit.j, hit.word.clone(), hit.dictionary)) {
                continue;
            }
            matches.push(Match::from_chars(
                password,
                hit.i,
                hit.j,
                Pattern::Dictionary(DictionaryPattern {
                    matched_word: hit.word,
                    rank: hit.rank,
                    dictionary: hit.dictionary,
                    reversed: false,
                    substitutions: used,
                }),
            ));
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::*;

    fn dictionary_of(m: &Match) -> &DictionaryPattern {
        match &m.pattern {
            Pattern::Dictionary(d) => d,
            other => panic!("expected dictionary pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_dictionary_match_whole_word() {
        let matches = run(dictionary_match, "password");
        let whole = matches
            .iter()
            .find(|m| {
                (m.i, m.j) == (0, 7) && dictionary_of(m).dictionary == DictionaryName::Passwords
            })
            .expect("password should be found");
        assert_eq!(dictionary_of(whole).rank, 1);
        assert_eq!(whole.token, "password");
    }

    #[test]
    fn test_dictionary_match_case_insensitive_keeps_token() {
        let matches = run(dictionary_match, "xxDRAGONxx");
        let m = matches
            .iter()
            .find(|m| dictionary_of(m).matched_word == "dragon")
            .expect("dragon should be found");
        assert_eq!((m.i, m.j), (2, 7));
        assert_eq!(m.token, "DRAGON");
    }

    #[test]
    fn test_dictionary_match_finds_embedded_words() {
        let matches = run(dictionary_match, "horsebattery");
        let words: Vec<&str> = matches
            .iter()
            .map(|m| dictionary_of(m).matched_word.as_str())
            .collect();
        assert!(words.contains(&"horse"));
        assert!(words.contains(&"battery"));
    }

    #[test]
    fn test_reverse_dictionary_match() {
        let matches = run(reverse_dictionary_match, "drowssap");
        let m = matches
            .iter()
            .find(|m| dictionary_of(m).matched_word == "password")
            .expect("reversed password should be found");
        assert_eq!((m.i, m.j), (0, 7));
        assert_eq!(m.token, "drowssap");
        assert!(dictionary_of(m).reversed);
    }

    #[test]
    fn test_reverse_dictionary_skips_palindromes() {
        let matches = run(reverse_dictionary_match, "hannah");
        assert!(matches.iter().all(|m| m.token != "hannah"));
    }

    #[test]
    fn test_l33t_match() {
        let matches = run(l33t_match, "p4ssw0rd");
        let m = matches
            .iter()
            .find(|m| dictionary_of(m).matched_word == "password")
            .expect("leet password should be found");
        let d = dictionary_of(m);
        assert!(d.l33t());
        assert!(d.substitutions.contains(&('4', 'a')));
        assert!(d.substitutions.contains(&('0', 'o')));
        assert_eq!(m.token, "p4ssw0rd");
    }

    #[test]
    fn test_l33t_match_ambiguous_character() {
        // '1' must be read as 'l' here
        let matches = run(l33t_match, "ki11er");
        assert!(matches.iter().any(|m| dictionary_of(m).matched_word == "killer"));
    }

    #[test]
    fn test_l33t_match_requires_substitution() {
        let matches = run(l33t_match, "password");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_enumerate_substitutions() {
        let subs = enumerate_substitutions(&['a', '1', '|']);
        assert_eq!(subs.len(), 4);
        assert!(enumerate_substitutions(&['a', 'b']).is_empty());
    }

    #[test]
    fn test_lowercase_keeps_alignment() {
        let chars: Vec<char> = "AİB".chars().collect();
        assert_eq!(lowercase(&chars).len(), 3);
    }
}
