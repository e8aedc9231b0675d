//! Track utilities

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::MediaItem;

lazy_static! {
    // Anything that is neither a word character nor whitespace
    static ref NON_WORD_PATTERN: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// Strip punctuation from a term before handing it to a library search
pub fn search_term(term: &str) -> String {
    NON_WORD_PATTERN.replace_all(term, "").to_string()
}

/// Total duration of a list of items in milliseconds, items without one count as zero
pub fn total_duration_ms(items: &[MediaItem]) -> u64 {
    items.iter().filter_map(|i| i.duration_ms).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term() {
        assert_eq!(search_term("AC/DC"), "ACDC");
        assert_eq!(search_term("Don't Stop Me Now!"), "Dont Stop Me Now");
        assert_eq!(search_term("Café del Mar"), "Café del Mar");
    }

    #[test]
    fn test_total_duration() {
        let mut a = MediaItem::new("1", "A");
        a.duration_ms = Some(90_000);
        let mut b = MediaItem::new("2", "B");
        b.duration_ms = Some(30_500);
        let c = MediaItem::new("3", "C");

        assert_eq!(total_duration_ms(&[a, b, c]), 120_500);
    }
}
