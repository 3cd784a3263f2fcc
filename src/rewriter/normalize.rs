//! Text normalization shared by queries and the index

use unicode_normalization::UnicodeNormalization;

/// Arabic harakat: fathatan through sukun
fn is_arabic_diacritic(c: char) -> bool {
    ('\u{064B}'..='\u{0652}').contains(&c)
}

fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}')
}

/// Normalize text for matching.
///
/// Applies NFKC, drops Arabic diacritics and zero-width characters,
/// lowercases, then collapses runs of whitespace to single spaces.
/// The result is stable under a second application.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfkc()
        .filter(|c| !is_arabic_diacritic(*c) && !is_zero_width(*c))
        .flat_map(char::to_lowercase)
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_whitespace() {
        assert_eq!(normalize("  17th   Century\tISHQ \n"), "17th century ishq");
    }

    #[test]
    fn test_strips_diacritics() {
        // عِشْقُ with kasra, sukun and damma
        assert_eq!(normalize("عِشْقُ"), "عشق");
    }

    #[test]
    fn test_strips_zero_width() {
        assert_eq!(normalize("غ\u{200C}زل"), "غزل");
        assert_eq!(normalize("\u{FEFF}love\u{200D}"), "love");
    }

    #[test]
    fn test_nfkc_folds_compatibility_forms() {
        // Fullwidth Latin and the "fi" ligature
        assert_eq!(normalize("ＧＨＡＺＡＬ"), "ghazal");
        assert_eq!(normalize("\u{FB01}rst"), "first");
        // Non-breaking space becomes a regular separator
        assert_eq!(normalize("love\u{00A0}poem"), "love poem");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "17th Century ISHQ ghazal",
            "عِشْقُ   ۽  مُحَبَّت",
            "ＫＡＦＩ\u{200D} of Sachal",
            "\u{0130}stanbul \u{212A}elvin",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
