//! Property tests for slug derivation.

use exitlist_ingest::slugify;
use proptest::prelude::*;

proptest! {
    #[test]
    fn slug_is_a_fixed_point(input in any::<String>()) {
        let slug = slugify(&input);
        prop_assert_eq!(slugify(&slug), slug);
    }

    #[test]
    fn slug_uses_lowercase_ascii_and_single_hyphens(input in any::<String>()) {
        let slug = slugify(&input);
        prop_assert!(slug.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn non_ascii_names_give_empty_slug(input in "[а-яА-Я一-龥]{0,24}") {
        prop_assert_eq!(slugify(&input), "");
    }

    #[test]
    fn slugged_strings_are_unchanged(input in "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,4}") {
        prop_assert_eq!(slugify(&input), input);
    }
}

#[test]
fn same_name_same_slug() {
    assert_eq!(slugify("Raytheon Technologies"), "raytheon-technologies");
    assert_eq!(slugify("RAYTHEON technologies"), slugify("Raytheon Technologies"));
}
