//! Row layout of a document for a fixed column width.
//!
//! Wrapping turns source lines into screen rows, and that mapping is what gives every
//! anchor its top offset. The layout is rebuilt whenever the width changes or the
//! source is reloaded, so anchors move exactly as they would on a reflowing page.

use crate::input::Heading;
use std::collections::HashMap;
use unicode_width::UnicodeWidthChar;

#[derive(Clone, Debug, PartialEq, Eq)]
/// One screen row of wrapped text.
pub struct Row {
    /// Text shown on the row.
    pub text: String,
    /// Heading depth when the row belongs to a tracked heading.
    pub heading: Option<usize>,
}

#[derive(Clone, Debug, Default)]
/// Wrapped rows plus the anchor row of every tracked section.
pub struct Layout {
    rows: Vec<Row>,
    anchors: HashMap<String, usize>,
    width: usize,
}

impl Layout {
    #[must_use]
    /// Wraps `source` at `width` terminal columns and records anchor rows for `headings`.
    pub fn build(source: &str, headings: &[Heading], width: usize) -> Self {
        let width = width.max(1);
        let by_line: HashMap<usize, &Heading> = headings.iter().map(|h| (h.line, h)).collect();

        let mut rows = Vec::new();
        let mut anchors = HashMap::new();

        for (line_no, line) in source.lines().enumerate() {
            let heading = by_line.get(&line_no);
            if let Some(h) = heading {
                anchors.insert(h.section.id.clone(), rows.len());
            }
            let depth = heading.map(|h| h.depth);
            for text in wrap(line, width) {
                rows.push(Row {
                    text,
                    heading: depth,
                });
            }
        }

        Self {
            rows,
            anchors,
            width,
        }
    }

    #[must_use]
    /// All rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    /// Column width the layout was wrapped at.
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    /// Row on which the section `id` starts, if it is laid out.
    pub fn anchor_top(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }
}

/// Splits a line into chunks at most `width` terminal columns wide, always at least one.
///
/// A single character wider than `width` still gets a row of its own.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += w;
    }
    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
