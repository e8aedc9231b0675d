//! Sort key normalization
//!
//! Turns display values into strings that sort the way a person expects:
//! accents are transliterated, case is folded, leading articles are dropped
//! and punctuation is ignored.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use std::collections::HashSet;

use crate::utils::dates::to_iso8601;

lazy_static! {
    /// Leading articles in German, English, Spanish, French and Italian
    static ref ARTICLES: HashSet<&'static str> = [
        // German
        "die", "der", "das", "ein", "eine",
        // English
        "the", "a", "an",
        // Spanish
        "el", "la", "los", "las", "un", "una", "unos", "unas",
        // French
        "le", "les", "une", "des",
        // Italian
        "il", "lo", "i", "gli", "uno",
    ]
    .into_iter()
    .collect();
}

/// Characters removed from a term without leaving whitespace behind
const STRIPPED_CHARS: &[char] = &[
    '*', '.', ':', ',', ';', '…', '\'', '"', '/', '\\', '!', '?', '$', '(', ')', '=', '+', '#',
    '<', '>', '|', '‘', '“', '¡', '¿', '´', '`',
];

/// A value read from a media item that can be normalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term<'a> {
    Text(&'a str),
    Timestamp(NaiveDateTime),
    Number(i64),
}

/// Normalize a term into a locale-independent sortable string
pub fn normalize(term: Term<'_>) -> String {
    match term {
        Term::Timestamp(dt) => to_iso8601(&dt),
        Term::Number(n) => sortable_number(n),
        Term::Text(text) => normalize_text(text),
    }
}

/// Normalize a display string
pub fn normalize_text(text: &str) -> String {
    // characters without a transliteration are dropped
    let term = deunicode::deunicode_with_tofu(&text.to_lowercase(), "").to_lowercase();
    let term = strip_article(&term).replace('&', "and");

    let term: String = term
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();

    term.trim().to_string()
}

/// Drop a leading article, unless it is the only word
fn strip_article(term: &str) -> &str {
    match term.trim_start().split_once(char::is_whitespace) {
        Some((first, rest)) if ARTICLES.contains(first) && !rest.trim().is_empty() => rest,
        _ => term,
    }
}

/// Fixed-width encoding whose byte order matches numeric order
fn sortable_number(n: i64) -> String {
    format!("{:020}", (n as u64) ^ (1 << 63))
}
