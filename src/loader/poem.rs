//! Poem data structures
//!
//! A poem carries its poet, optional year and form, theme tags and couplets.

use crate::rewriter::{Lang, YearRange};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A poet as referenced from a poem
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poet {
    /// Unique poet identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
}

impl Poet {
    /// Create a poet with no known lifespan
    pub fn new(id: &str, name: &str, slug: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            birth_year: None,
            death_year: None,
        }
    }

    /// Set birth and death years
    pub fn with_lifespan(mut self, birth: Option<i32>, death: Option<i32>) -> Self {
        self.birth_year = birth;
        self.death_year = death;
        self
    }

    /// Check if the poet was alive at some point in the range.
    ///
    /// A missing end of the lifespan is taken to equal the known end.
    pub fn lived_during(&self, range: &YearRange) -> bool {
        match (self.birth_year, self.death_year) {
            (Some(birth), Some(death)) => range.overlaps(birth, death),
            (Some(year), None) | (None, Some(year)) => range.contains(year),
            (None, None) => false,
        }
    }
}

/// A couplet (bait / sher)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Couplet {
    pub lines: Vec<String>,
}

impl Couplet {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Lines joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// A poem in the corpus
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poem {
    /// Unique poem identifier
    #[serde(default = "generate_id")]
    pub id: String,
    /// URL slug
    pub slug: String,
    /// Poem title
    pub title: String,
    /// Language of this rendition
    #[serde(default)]
    pub lang: Lang,
    /// Poet
    pub poet: Poet,
    /// Year of composition, when known
    #[serde(default)]
    pub year: Option<i32>,
    /// Poetic form (ghazal, kafi, ...)
    #[serde(default)]
    pub form: Option<String>,
    /// Canonical theme tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Couplets in order
    #[serde(default)]
    pub couplets: Vec<Couplet>,
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl Poem {
    /// Create a poem with a specific ID
    pub fn with_id(id: &str, slug: &str, title: &str, lang: Lang, poet: Poet) -> Self {
        Self {
            id: id.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            lang,
            poet,
            year: None,
            form: None,
            tags: Vec::new(),
            couplets: Vec::new(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_form(mut self, form: &str) -> Self {
        self.form = Some(form.to_string());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_couplet(mut self, lines: &[&str]) -> Self {
        self.couplets.push(Couplet::new(lines));
        self
    }

    /// Check if the poem carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Check if the poem is of the given form
    pub fn has_form(&self, form: &str) -> bool {
        self.form
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case(form))
    }

    /// Check if the poem belongs to the year range.
    ///
    /// Uses the composition year when known, else the poet's lifespan.
    pub fn in_period(&self, range: &YearRange) -> bool {
        match self.year {
            Some(year) => range.contains(year),
            None => self.poet.lived_during(range),
        }
    }

    /// Full text of all couplets
    pub fn text(&self) -> String {
        self.couplets
            .iter()
            .map(Couplet::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Text fed to the index: title, poet, form, tags and couplets
    pub fn index_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.title,
            self.poet.name,
            self.form.as_deref().unwrap_or(""),
            self.tags.join(" "),
            self.text()
        )
    }

    /// First couplet, used as a result snippet
    pub fn snippet(&self) -> String {
        self.couplets
            .first()
            .map(|c| c.lines.join(" / "))
            .unwrap_or_default()
    }
}
