//! Section representation for the table of contents.
//!
//! A section is one addressable region of a document. Its `id` doubles as the
//! anchor name the surface resolves to a position, so it must be unique within a
//! document. Positions are never stored here: layout is mutable, and the tracker
//! asks the surface for a fresh top offset every time it measures.

use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Indentation tier of a section in the contents list.
pub enum Level {
    /// Top tier of the document's headings.
    Primary,
    /// Headings nested directly below the top tier.
    Secondary,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Anchor-bound region of a document tracked for navigation.
pub struct Section {
    /// Stable identifier, unique within the document.
    pub id: String,
    /// Display text for the contents entry.
    pub label: String,
    /// Display tier; not consulted when choosing the active section.
    pub level: Level,
}

impl Section {
    #[must_use]
    /// Creates a section from its parts.
    pub fn new(id: impl Into<String>, label: impl Into<String>, level: Level) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            level,
        }
    }
}

#[must_use]
/// Turns heading text into an anchor slug.
///
/// Lowercases, keeps alphanumerics, `-` and `_`, turns whitespace into `-` and
/// drops everything else. An empty result falls back to `section`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() {
            slug.push('-');
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// Hands out unique slugs within one document.
///
/// Repeats get `-1`, `-2`, ... suffixes in the order they are requested.
#[derive(Default)]
pub struct SlugSet {
    taken: HashSet<String>,
}

impl SlugSet {
    #[must_use]
    /// Starts an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a slug for `text` that has not been handed out before.
    pub fn unique(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut candidate = base.clone();
        let mut suffix = 0;
        while self.taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}-{suffix}");
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
