use super::Layout;
use crate::formats::markdown::MarkdownFormat;
use crate::input::extract_headings;

const SOURCE: &str = "# Top

0123456789abcdef

## Next
tail";

fn layout(width: usize) -> Layout {
    let headings = extract_headings(SOURCE, &MarkdownFormat).unwrap();
    Layout::build(SOURCE, &headings, width)
}

#[test]
fn test_wide_layout_maps_lines_to_rows() {
    let layout = layout(80);
    assert_eq!(layout.row_count(), 6);
    assert_eq!(layout.anchor_top("top"), Some(0));
    assert_eq!(layout.anchor_top("next"), Some(4));
    assert_eq!(layout.rows()[4].heading, Some(2));
    assert_eq!(layout.rows()[5].heading, None);
}

#[test]
fn test_narrow_layout_pushes_anchors_down() {
    let layout = layout(5);
    // "0123456789abcdef" wraps into four rows
    assert_eq!(layout.anchor_top("next"), Some(7));
    assert_eq!(layout.rows()[2].text, "01234");
    assert_eq!(layout.rows()[5].text, "f");
}

#[test]
fn test_blank_lines_keep_a_row() {
    let layout = layout(80);
    assert_eq!(layout.rows()[1].text, "");
}

#[test]
fn test_zero_width_is_clamped() {
    let layout = Layout::build("ab", &[], 0);
    assert_eq!(layout.width(), 1);
    assert_eq!(layout.row_count(), 2);
}

#[test]
fn test_unknown_anchor_is_none() {
    assert_eq!(layout(80).anchor_top("missing"), None);
}

#[test]
fn test_wide_characters_wrap_by_columns() {
    let layout = Layout::build("漢字漢字漢字", &[], 6);
    assert_eq!(layout.row_count(), 2);
    assert_eq!(layout.rows()[0].text, "漢字漢");
    assert_eq!(layout.rows()[1].text, "字漢字");
}

#[test]
fn test_character_wider_than_pane_gets_own_row() {
    let layout = Layout::build("漢a", &[], 1);
    let texts: Vec<&str> = layout.rows().iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["漢", "a"]);
}
