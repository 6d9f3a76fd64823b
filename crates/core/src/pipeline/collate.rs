//! Locale-aware title comparison.
//!
//! Titles are ordered by the Unicode root collation (CLDR root locale,
//! tertiary strength): base letters first, then accents, then case with
//! lowercase before uppercase. Letters without a decomposition (`Ø`, `Æ`,
//! `Ł`, `ß`) and punctuation get their collation weights rather than their
//! code point order. When the collator finds two titles equal the raw strings
//! decide, which keeps the ordering total.

use core::cmp::Ordering;
use std::sync::LazyLock;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};

/// Root-locale collator backed by the compiled CLDR data.
static ROOT_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(CollatorPreferences::default(), CollatorOptions::default()).ok()
});

/// Compare two titles for display ordering.
///
/// # Example
///
/// ```rust
/// # use core::cmp::Ordering;
/// # use shelfview_core::pipeline::compare_titles;
/// assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
/// assert_eq!(compare_titles("éclair", "eclair"), Ordering::Greater);
/// ```
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .as_ref()
        .map_or(Ordering::Equal, |collator| collator.compare(a, b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_collator_is_available() {
        assert!(ROOT_COLLATOR.is_some());
    }

    #[test]
    fn test_case_is_ignored_for_letter_order() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_accents_sort_next_to_base_letter() {
        // Byte order would put 'é' after 'z'.
        assert_eq!(compare_titles("écharpe", "zipper"), Ordering::Less);
        assert_eq!(compare_titles("eclair", "éclair"), Ordering::Less);
    }

    #[test]
    fn test_letters_without_decomposition() {
        assert_eq!(compare_titles("Øre", "Zebra"), Ordering::Less);
        assert_eq!(compare_titles("Æble", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Łódź", "Madrid"), Ordering::Less);
        assert_eq!(compare_titles("Straße", "Strasse X"), Ordering::Less);
    }

    #[test]
    fn test_punctuation_before_digits() {
        assert_eq!(compare_titles("_tag", "0day"), Ordering::Less);
        assert_eq!(compare_titles("0day", "apple"), Ordering::Less);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(compare_titles("shirt", "Shirt"), Ordering::Less);
        assert_eq!(compare_titles("Shirt", "shirt"), Ordering::Greater);
    }

    #[test]
    fn test_equal_titles() {
        assert_eq!(compare_titles("Red Hat", "Red Hat"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_titles("Shirt", "Shirts"), Ordering::Less);
    }
}
