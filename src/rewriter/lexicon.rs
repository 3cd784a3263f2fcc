//! Fixed theme and form dictionaries
//!
//! Every synonym is stored already normalized (lowercase, NFKC, no harakat)
//! so it can be compared directly against normalized query tokens.

use super::Lang;

/// A canonical theme and the tokens that select it
#[derive(Debug)]
pub struct ThemeEntry {
    /// Canonical key stored in filters and poem tags
    pub key: &'static str,
    /// English display label
    pub label_en: &'static str,
    /// Sindhi display label
    pub label_sd: &'static str,
    /// Synonyms and translations in both scripts
    pub synonyms: &'static [&'static str],
}

impl ThemeEntry {
    /// Display label in the given language
    pub fn label(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => self.label_en,
            Lang::Sd => self.label_sd,
        }
    }

    /// Check if any of the tokens is one of this theme's synonyms
    pub fn matches(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.synonyms.contains(t))
    }
}

/// Themes in priority order; the first matching entry wins
pub const THEMES: &[ThemeEntry] = &[
    ThemeEntry {
        key: "love",
        label_en: "love",
        label_sd: "عشق",
        synonyms: &[
            "love", "ishq", "mohabbat", "muhabbat", "pyar", "pyaar", "prem", "عشق", "محبت",
            "پيار", "پريم", "نينهن",
        ],
    },
    ThemeEntry {
        key: "mysticism",
        label_en: "mysticism",
        label_sd: "تصوف",
        synonyms: &[
            "mysticism", "mystic", "sufi", "sufism", "tasawwuf", "tasawuf", "تصوف", "صوفي",
            "صوفيت",
        ],
    },
    ThemeEntry {
        key: "separation",
        label_en: "separation",
        label_sd: "وڇوڙو",
        synonyms: &[
            "separation", "longing", "hijr", "firaq", "judai", "vichhoro", "هجر", "فراق",
            "جدائي", "وڇوڙو",
        ],
    },
    ThemeEntry {
        key: "nature",
        label_en: "nature",
        label_sd: "فطرت",
        synonyms: &["nature", "fitrat", "qudrat", "فطرت", "قدرت"],
    },
    ThemeEntry {
        key: "homeland",
        label_en: "homeland",
        label_sd: "وطن",
        synonyms: &["homeland", "watan", "dharti", "motherland", "وطن", "ڌرتي"],
    },
];

/// Canonical form key reported for any form keyword
pub const GHAZAL_FORM: &str = "ghazal";

/// Form keywords in Latin and Arabic script
pub const FORM_KEYWORDS: &[&str] = &[
    "ghazal", "ghazals", "غزل", "nazm", "نظم", "kafi", "kaafi", "ڪافي", "کافی",
];

/// Look up a theme by its canonical key
pub fn theme(key: &str) -> Option<&'static ThemeEntry> {
    THEMES.iter().find(|t| t.key == key)
}

/// First theme whose synonyms intersect the tokens
pub fn detect_theme(tokens: &[&str]) -> Option<&'static ThemeEntry> {
    THEMES.iter().find(|t| t.matches(tokens))
}

/// Form filter selected by the tokens, if any form keyword appears
pub fn detect_form(tokens: &[&str]) -> Option<&'static str> {
    tokens
        .iter()
        .any(|t| FORM_KEYWORDS.contains(t))
        .then_some(GHAZAL_FORM)
}

/// Localized form pill text
pub fn form_label(form: &str, lang: Lang) -> String {
    match (lang, form) {
        (Lang::Sd, GHAZAL_FORM) => "غزل".to_string(),
        (_, other) => other.to_string(),
    }
}
