//! Section extraction from document sources.
//!
//! Headings are found with the format's tree-sitter query. Only two tiers make it into
//! the contents: the shallowest heading depth in the document is primary and the one
//! directly below it secondary. Deeper headings stay in the text but are not tracked.

use crate::error::LoadError;
use crate::formats::Format;
use crate::section::{Level, Section, SlugSet};
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A tracked heading and where it sits in the source.
pub struct Heading {
    /// Section the heading introduces.
    pub section: Section,
    /// Heading depth as written (1 for `#`).
    pub depth: usize,
    /// Zero-based source line of the heading.
    pub line: usize,
}

#[derive(Clone, Debug)]
/// Source text of a document with its tracked headings.
pub struct Document {
    /// Full source text.
    pub source: String,
    /// Tracked headings in document order.
    pub headings: Vec<Heading>,
}

impl Document {
    #[must_use]
    /// Sections in document order.
    pub fn sections(&self) -> Vec<Section> {
        self.headings.iter().map(|h| h.section.clone()).collect()
    }
}

/// Reads a file and extracts its tracked headings.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the grammar fails to load.
pub fn read_document(path: &Path, format: &impl Format) -> Result<Document, LoadError> {
    let source = fs::read_to_string(path)?;
    let headings = extract_headings(&source, format)?;
    tracing::info!(path = %path.display(), sections = headings.len(), "loaded document");
    Ok(Document { source, headings })
}

/// Extracts the two tracked heading tiers from `source` in document order.
///
/// # Errors
///
/// Returns an error if the grammar or the heading query cannot be loaded, or the
/// parser produces no tree.
pub fn extract_headings(source: &str, format: &impl Format) -> Result<Vec<Heading>, LoadError> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser.parse(source, None).ok_or(LoadError::NoTree)?;

    let query = Query::new(&language, format.heading_query())?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    let mut raw = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let Some(depth) = format.heading_depth(node) else {
                continue;
            };
            let label = format
                .heading_text(node)
                .and_then(|text| text.utf8_text(source.as_bytes()).ok())
                .map(|text| strip_closing_sequence(text).to_string())
                .unwrap_or_default();
            raw.push((node.start_position().row, depth, label));
        }
    }
    raw.sort_by_key(|(line, _, _)| *line);
    raw.dedup_by_key(|(line, _, _)| *line);

    let Some(top) = raw.iter().map(|(_, depth, _)| *depth).min() else {
        return Ok(Vec::new());
    };

    let mut slugs = SlugSet::new();
    let headings = raw
        .into_iter()
        .filter_map(|(line, depth, label)| {
            let level = match depth - top {
                0 => Level::Primary,
                1 => Level::Secondary,
                _ => return None,
            };
            let id = slugs.unique(&label);
            Some(Heading {
                section: Section { id, label, level },
                depth,
                line,
            })
        })
        .collect();
    Ok(headings)
}

/// Trims a heading's text and drops an ATX closing sequence.
///
/// A trailing run of `#` only closes the heading when whitespace precedes it (or it
/// is all there is), so `C#` keeps its hash while `Go ##` loses the run.
fn strip_closing_sequence(text: &str) -> &str {
    let text = text.trim();
    let body = text.trim_end_matches('#');
    if body.len() == text.len() {
        return text;
    }
    if body.is_empty() || body.ends_with(char::is_whitespace) {
        body.trim_end()
    } else {
        text
    }
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
