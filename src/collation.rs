//! Locale-aware string ordering used for every sorted list in a snapshot.
//!
//! The ordering approximates the root collation of a browser's
//! `localeCompare`. Strings are decomposed (NFD) and compared in levels:
//!
//! 1. base letters, ignoring accents and case, with punctuation and
//!    whitespace ahead of digits and digits ahead of letters;
//! 2. accents, unaccented first;
//! 3. case, lowercase first;
//! 4. code points, so distinct strings never compare equal.

use itertools::Itertools;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

/// Per-level comparison keys of one string.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    primary: Vec<(u8, char)>,
    /// Combining marks attached to each base character.
    accents: Vec<Vec<char>>,
    uppercase: Vec<bool>,
}

impl SortKey {
    fn new(value: &str) -> Self {
        let mut key = SortKey::default();
        for c in value.nfd() {
            if is_combining_mark(c) {
                if let Some(marks) = key.accents.last_mut() {
                    marks.push(c);
                }
                continue;
            }
            key.primary.push(primary_weight(c));
            key.accents.push(Vec::new());
            key.uppercase.push(c.is_uppercase());
        }
        key
    }
}

/// Compares two strings the way snapshot listings are ordered.
pub fn locale_cmp(left: &str, right: &str) -> Ordering {
    SortKey::new(left)
        .cmp(&SortKey::new(right))
        .then_with(|| left.cmp(right))
}

/// Removes exact duplicates and returns the remaining strings in locale order.
pub fn unique_sorted<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .unique()
        .sorted_by(|left, right| locale_cmp(left, right))
        .collect()
}
