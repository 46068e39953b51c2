//! Locale-aware string ordering for titles and genres.
//!
//! Strings are compared in three passes, the way a library catalog shelves
//! them: base letters ignoring case and accents, then accents, then case with
//! lowercase first. Fully equal keys fall back to code point order so the
//! ordering stays total.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn with_accents(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_swapped(s: &str) -> String {
    s.nfd()
        .flat_map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                c.to_uppercase().collect::<Vec<_>>()
            }
        })
        .collect()
}

/// Compare two strings in catalog order
pub fn compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| with_accents(a).cmp(&with_accents(b)))
        .then_with(|| case_swapped(a).cmp(&case_swapped(b)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = values.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| compare(a, b));
        v
    }

    #[test]
    fn test_case_insensitive_primary_order() {
        assert_eq!(sorted(&["zeta", "Alpha", "beta"]), vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(
            sorted(&["Fantasy", "fantasy", "Drama"]),
            vec!["Drama", "fantasy", "Fantasy"]
        );
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(
            sorted(&["Ótica", "Zoologia", "Ortografia", "Oceano"]),
            vec!["Oceano", "Ortografia", "Ótica", "Zoologia"]
        );
        assert_eq!(compare("e", "é"), Ordering::Less);
    }

    #[test]
    fn test_equal_strings() {
        assert_eq!(compare("Romance", "Romance"), Ordering::Equal);
    }
}
