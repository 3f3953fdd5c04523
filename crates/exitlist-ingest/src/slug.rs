//! Slug derivation for the join key.

use unicode_normalization::UnicodeNormalization;

/// Converts a display name into a lowercase, hyphen-separated ASCII slug.
///
/// Characters without an ASCII decomposition are dropped, as is anything that
/// is not alphanumeric, whitespace or a hyphen. Runs of whitespace and hyphens
/// collapse into a single `-`. Never fails; an empty result means the name
/// cannot be joined.
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .nfkd()
        .filter(char::is_ascii)
        .map(|ch| ch.to_ascii_lowercase())
        .filter(|&ch| ch.is_ascii_alphanumeric() || is_separator(ch))
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut in_separator = false;
    for ch in folded.trim_matches(is_space).chars() {
        if is_separator(ch) {
            in_separator = true;
            continue;
        }
        if in_separator {
            slug.push('-');
            in_separator = false;
        }
        slug.push(ch);
    }
    if in_separator {
        slug.push('-');
    }
    slug
}

// ASCII whitespace including vertical tab.
fn is_space(ch: char) -> bool {
    ch.is_ascii_whitespace() || ch == '\x0b'
}

fn is_separator(ch: char) -> bool {
    is_space(ch) || ch == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugifies_company_names() {
        assert_eq!(slugify("Raytheon Technologies"), "raytheon-technologies");
        assert_eq!(slugify("  Foo   Bar--Baz "), "foo-bar-baz");
        assert_eq!(slugify("AT&T Inc."), "att-inc");
        assert_eq!(slugify("Procter & Gamble"), "procter-gamble");
    }

    #[test]
    fn folds_accents_to_ascii() {
        assert_eq!(slugify("Nestlé"), "nestle");
        assert_eq!(slugify("Société Générale"), "societe-generale");
        assert_eq!(slugify("ＡＢＣ"), "abc");
    }

    #[test]
    fn empty_and_non_ascii_inputs_give_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("Газпром"), "");
        assert_eq!(slugify("株式会社"), "");
    }

    #[test]
    fn keeps_edge_hyphens() {
        assert_eq!(slugify("-acme-"), "-acme-");
        assert_eq!(slugify(" --acme"), "-acme");
    }

    #[test]
    fn strips_underscores_and_punctuation() {
        assert_eq!(slugify("foo_bar"), "foobar");
        assert_eq!(slugify("Yandex (N.V.)"), "yandex-nv");
    }

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(slugify("Foo\t\n\x0bBar"), "foo-bar");
    }
}
