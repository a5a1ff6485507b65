use super::{extract_headings, read_document, strip_closing_sequence};
use crate::error::LoadError;
use crate::formats::markdown::MarkdownFormat;
use crate::section::Level;
use std::io::Write;
use tempfile::NamedTempFile;

const GUIDE: &str = "# Guide

Intro text.

## Install

```sh
# not a heading
```

### Details

## Usage

## Usage
";

#[test]
fn test_two_tiers_are_tracked() {
    let headings = extract_headings(GUIDE, &MarkdownFormat).unwrap();
    let summary: Vec<(&str, &str, Level, usize)> = headings
        .iter()
        .map(|h| {
            (
                h.section.id.as_str(),
                h.section.label.as_str(),
                h.section.level,
                h.line,
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("guide", "Guide", Level::Primary, 0),
            ("install", "Install", Level::Secondary, 4),
            ("usage", "Usage", Level::Secondary, 12),
            ("usage-1", "Usage", Level::Secondary, 14),
        ]
    );
}

#[test]
fn test_shallowest_depth_present_is_primary() {
    let headings = extract_headings("## One\n\n### Sub\n\n## Two\n", &MarkdownFormat).unwrap();
    let levels: Vec<(usize, Level)> = headings.iter().map(|h| (h.depth, h.section.level)).collect();
    assert_eq!(
        levels,
        vec![(2, Level::Primary), (3, Level::Secondary), (2, Level::Primary)]
    );
}

#[test]
fn test_no_headings_no_sections() {
    let headings = extract_headings("Just a paragraph.\n", &MarkdownFormat).unwrap();
    assert!(headings.is_empty());
}

#[test]
fn test_read_document_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{GUIDE}").unwrap();

    let document = read_document(file.path(), &MarkdownFormat).unwrap();
    assert_eq!(document.source, GUIDE);
    assert_eq!(document.sections().len(), 4);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_document(&dir.path().join("absent.md"), &MarkdownFormat).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)), "got {err}");
}

#[test]
fn test_trailing_hash_in_title_is_kept() {
    let headings =
        extract_headings("# Languages\n\n## C#\n\n## F#\n\n## Go ##\n", &MarkdownFormat).unwrap();
    let names: Vec<(&str, &str)> = headings
        .iter()
        .map(|h| (h.section.id.as_str(), h.section.label.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("languages", "Languages"),
            ("c", "C#"),
            ("f", "F#"),
            ("go", "Go"),
        ]
    );
}

#[test]
fn test_closing_sequence_needs_leading_space() {
    assert_eq!(strip_closing_sequence(" C# "), "C#");
    assert_eq!(strip_closing_sequence("Go ##"), "Go");
    assert_eq!(strip_closing_sequence("Go\t#"), "Go");
    assert_eq!(strip_closing_sequence("###"), "");
    assert_eq!(strip_closing_sequence("Plain"), "Plain");
}
