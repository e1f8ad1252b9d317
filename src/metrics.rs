//! Composition metrics - character classes and Shannon entropy.

use std::collections::HashMap;

/// Characters counted as special.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    /// Length in characters.
    pub length: usize,
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_numbers: bool,
    pub has_special_chars: bool,
    /// Shannon entropy of the character distribution times the length, in
    /// bits, rounded to one decimal.
    pub entropy: f64,
}

impl Metrics {
    pub fn of(password: &str) -> Self {
        Self {
            length: password.chars().count(),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_numbers: password.chars().any(|c| c.is_ascii_digit()),
            has_special_chars: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
            entropy: shannon_entropy_bits(password),
        }
    }
}

fn shannon_entropy_bits(password: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut length = 0usize;
    for c in password.chars() {
        *counts.entry(c).or_insert(0) += 1;
        length += 1;
    }
    if length == 0 {
        return 0.0;
    }

    let len = length as f64;
    let per_char: f64 = counts
        .values()
        .map(|&count| {
            let p = count as f64 / len;
            p * (1.0 / p).log2()
        })
        .sum();
    (per_char * len * 10.0).round() / 10.0
}
