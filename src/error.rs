//! Error types for waymark.

use crate::schedule::Signal;
use thiserror::Error;

/// Errors a host can report when asked to deliver a trigger signal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListenError {
    /// The host has no event source for this signal.
    #[error("host does not deliver {0} signals")]
    Unsupported(Signal),
}

/// Errors reading `waymark.toml`.
#[derive(Debug, Error)]
pub enum ConfigError<'input> {
    /// The text is not valid TOML for the config shape.
    #[error("{0}")]
    Toml(facet_toml::TomlDeError<'input>),
}

impl<'input> From<facet_toml::TomlDeError<'input>> for ConfigError<'input> {
    fn from(err: facet_toml::TomlDeError<'input>) -> Self {
        Self::Toml(err)
    }
}

/// Errors that can occur while loading a document and extracting its sections.
#[derive(Debug, Error)]
pub enum LoadError {
    /// I/O error reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The grammar could not be loaded into the parser.
    #[error("grammar error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The heading query did not compile against the grammar.
    #[error("query error: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// The parser gave up without producing a tree.
    #[error("parser produced no syntax tree")]
    NoTree,
}
