//! Markdown format implementation using tree-sitter-md.
//!
//! Sections come from ATX-style headings (`#` syntax). Headings inside fenced code
//! never reach us: the block grammar parses those as code.

use crate::formats::Format;

/// Tree-sitter queries for ATX-style markdown headings (# syntax).
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn heading_depth(&self, node: tree_sitter::Node<'_>) -> Option<usize> {
        let mut cursor = node.walk();
        let depth = node.children(&mut cursor).find_map(|child| {
            child
                .kind()
                .strip_prefix("atx_h")?
                .strip_suffix("_marker")?
                .parse()
                .ok()
        });
        depth
    }

    fn heading_text<'tree>(
        &self,
        node: tree_sitter::Node<'tree>,
    ) -> Option<tree_sitter::Node<'tree>> {
        node.child_by_field_name("heading_content").or_else(|| {
            let mut cursor = node.walk();
            let inline = node.children(&mut cursor).find(|child| child.kind() == "inline");
            inline
        })
    }
}
