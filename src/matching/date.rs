//! Date matcher: day, month and year in any order, with or without a
//! separator (`13051987`, `5/13/87`, `1987.05.13`).

use std::sync::OnceLock;

use regex::Regex;

use super::{DatePattern, Match, MatchContext, Pattern};
use crate::tables::DATE_SEPARATORS;

pub const DATE_MIN_YEAR: i32 = 1900;
pub const DATE_MAX_YEAR: i32 = 2050;

/// Where to cut an undelimited digit run of a given length.
fn date_splits(len: usize) -> &'static [(usize, usize)] {
    match len {
        4 => &[(1, 2), (2, 3)],
        5 => &[(1, 3), (2, 3)],
        6 => &[(1, 2), (2, 4), (4, 5)],
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)],
        _ => &[],
    }
}

#[allow(clippy::expect_used)] // Static regex pattern is hardcoded and valid
fn delimited_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,4})([ /\\_.\-])(\d{1,2})([ /\\_.\-])(\d{1,4})$").expect("valid regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dmy {
    day: u8,
    month: u8,
    year: i32,
}

fn two_to_four_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}

fn map_ints_to_dm(a: i32, b: i32) -> Option<(u8, u8)> {
    [(a, b), (b, a)]
        .into_iter()
        .find(|&(day, month)| (1..=31).contains(&day) && (1..=12).contains(&month))
        .map(|(day, month)| (day as u8, month as u8))
}

/// Reads three integers as a day, month and year in some order.
fn map_ints_to_dmy(ints: [i32; 3]) -> Option<Dmy> {
    // the middle value is always a day or a month
    if ints[1] > 31 || ints[1] <= 0 {
        return None;
    }

    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut under_1 = 0;
    for &int in &ints {
        if (99 < int && int < DATE_MIN_YEAR) || int > DATE_MAX_YEAR {
            return None;
        }
        if int > 31 {
            over_31 += 1;
        }
        if int > 12 {
            over_12 += 1;
        }
        if int <= 0 {
            under_1 += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || under_1 >= 2 {
        return None;
    }

    // year last, then year first
    let year_splits = [(ints[2], ints[0], ints[1]), (ints[0], ints[1], ints[2])];
    for &(year, a, b) in &year_splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            // a four-digit year with no valid day/month rules the token out
            let (day, month) = map_ints_to_dm(a, b)?;
            return Some(Dmy { day, month, year });
        }
    }
    for &(year, a, b) in &year_splits {
        if let Some((day, month)) = map_ints_to_dm(a, b) {
            return Some(Dmy {
                day,
                month,
                year: two_to_four_digit_year(year),
            });
        }
    }
    None
}

fn parse_digits(chars: &[char]) -> Option<i32> {
    chars.iter().collect::<String>().parse().ok()
}

fn undelimited(password: &[char], reference_year: i32) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();

    for i in 0..n {
        for j in (i + 3)..(i + 8).min(n) {
            let token = &password[i..=j];
            if !token.iter().all(char::is_ascii_digit) {
                break;
            }
            let best = date_splits(token.len())
                .iter()
                .filter_map(|&(k, l)| {
                    let ints = [
                        parse_digits(&token[..k])?,
                        parse_digits(&token[k..l])?,
                        parse_digits(&token[l..])?,
                    ];
                    map_ints_to_dmy(ints)
                })
                .min_by_key(|dmy| dmy.year.abs_diff(reference_year));

            if let Some(dmy) = best {
                matches.push(date(password, i, j, None, dmy));
            }
        }
    }
    matches
}

fn delimited(password: &[char]) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();

    for i in 0..n {
        for j in (i + 5)..(i + 10).min(n) {
            let token: String = password[i..=j].iter().collect();
            let Some(caps) = delimited_regex().captures(&token) else {
                continue;
            };
            if caps[2] != caps[4] {
                continue;
            }
            let separator = caps[2].chars().next();
            if !separator.is_some_and(|s| DATE_SEPARATORS.contains(&s)) {
                continue;
            }
            let parsed = (
                caps[1].parse::<i32>(),
                caps[3].parse::<i32>(),
                caps[5].parse::<i32>(),
            );
            let (Ok(a), Ok(b), Ok(c)) = parsed else {
                continue;
            };
            if let Some(dmy) = map_ints_to_dmy([a, b, c]) {
                matches.push(date(password, i, j, separator, dmy));
            }
        }
    }
    matches
}

fn date(password: &[char], i: usize, j: usize, separator: Option<char>, dmy: Dmy) -> Match {
    Match::from_chars(
        password,
        i,
        j,
        Pattern::Date(DatePattern {
            separator,
            year: dmy.year,
            month: dmy.month,
            day: dmy.day,
        }),
    )
}

/// Dates with and without separators. A date lying strictly inside another
/// date match is dropped (`1305` inside `13051987`).
pub fn date_match(password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let mut candidates = undelimited(password, ctx.reference_year);
    candidates.extend(delimited(password));

    candidates
        .iter()
        .enumerate()
        .filter(|&(idx, m)| {
            !candidates
                .iter()
                .enumerate()
                .any(|(other_idx, other)| other_idx != idx && other.i <= m.i && other.j >= m.j)
        })
        .map(|(_, m)| m.clone())
        .collect()
}
