//! Format trait and implementations for different document types.
//!
//! A `Format` names the tree-sitter grammar for a document type and the query that
//! captures its headings, so section extraction stays independent of the syntax.

pub mod markdown;

/// Grammar and heading query for one document type.
pub trait Format {
    /// Tree-sitter language used to parse the document.
    fn language(&self) -> tree_sitter::Language;

    /// Query capturing every heading node as `@heading`.
    fn heading_query(&self) -> &str;

    /// Heading depth of a captured node, from its marker child.
    fn heading_depth(&self, node: tree_sitter::Node<'_>) -> Option<usize>;

    /// Child node holding the heading's text, if any.
    fn heading_text<'tree>(
        &self,
        node: tree_sitter::Node<'tree>,
    ) -> Option<tree_sitter::Node<'tree>>;
}
