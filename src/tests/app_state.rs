use super::{AppState, Focus};
use crate::config::Config;
use crate::formats::markdown::MarkdownFormat;
use crate::input::read_document;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// One heading per title, each followed by twenty 30-column filler lines.
fn fixture(titles: &[&str]) -> String {
    let filler = "x".repeat(30);
    let mut source = String::new();
    for (i, title) in titles.iter().enumerate() {
        let marker = if i == 0 { "#" } else { "##" };
        source.push_str(&format!("{marker} {title}\n"));
        for _ in 0..20 {
            source.push_str(&filler);
            source.push('\n');
        }
    }
    source
}

fn app_for(file: &NamedTempFile) -> AppState {
    let document = read_document(file.path(), &MarkdownFormat).unwrap();
    AppState::new(
        file.path().to_path_buf(),
        document,
        &Config::default(),
        (40, 10),
    )
}

fn temp_doc(titles: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", fixture(titles)).unwrap();
    file
}

#[test]
fn test_mount_activates_first_section() {
    let file = temp_doc(&["A", "B", "C"]);
    let app = app_for(&file);
    assert_eq!(app.tracker.active_id(), Some("a"));
    assert_eq!(app.viewport.layout().anchor_top("b"), Some(21));
    assert_eq!(app.viewport.max_offset(), 53);
}

#[test]
fn test_scrolling_updates_on_next_tick() {
    let file = temp_doc(&["A", "B", "C"]);
    let mut app = app_for(&file);

    app.scroll_by(20);
    assert_eq!(app.tracker.active_id(), Some("a"), "nothing measured until the frame");
    let change = app.tick().unwrap();
    assert_eq!(change.previous.as_deref(), Some("a"));
    assert_eq!(change.current, "b");
}

#[test]
fn test_scroll_burst_costs_one_measurement() {
    let file = temp_doc(&["A", "B", "C"]);
    let mut app = app_for(&file);
    let before = app.tracker.measurements();

    for _ in 0..40 {
        app.scroll_by(1);
    }
    app.tick();
    assert_eq!(app.tracker.measurements(), before + 1);
    assert_eq!(app.tracker.active_id(), Some("c"));
}

#[test]
fn test_scroll_is_clamped() {
    let file = temp_doc(&["A", "B", "C"]);
    let mut app = app_for(&file);

    app.scroll_to(1_000);
    assert_eq!(app.viewport.offset(), 53);
    app.scroll_to(-5);
    assert_eq!(app.viewport.offset(), 0);
    app.tick();

    let before = app.tracker.measurements();
    app.scroll_to_top();
    app.tick();
    assert_eq!(app.tracker.measurements(), before, "no movement, no signal");
}

#[test]
fn test_paging_moves_by_viewport_height() {
    let file = temp_doc(&["A", "B", "C"]);
    let mut app = app_for(&file);
    app.page_down();
    app.page_down();
    assert_eq!(app.viewport.offset(), 20);
    app.page_up();
    assert_eq!(app.viewport.offset(), 10);
    app.scroll_to_bottom();
    assert_eq!(app.viewport.offset(), 53);
}

#[test]
fn test_resize_reflows_anchors() {
    let file = temp_doc(&["A", "B", "C"]);
    let mut app = app_for(&file);
    app.scroll_to(21);
    app.tick();
    assert_eq!(app.tracker.active_id(), Some("b"));

    app.resize(10, 10);
    assert_eq!(app.viewport.layout().anchor_top("b"), Some(61));
    app.tick();
    assert_eq!(app.tracker.active_id(), Some("a"), "b moved below the activation line");
}

#[test]
fn test_contents_navigation_jumps_to_section() {
    let file = temp_doc(&["A", "B", "C"]);
    let mut app = app_for(&file);

    app.toggle_focus();
    assert_eq!(app.focus, Focus::Contents);
    app.toc_next();
    app.toc_next();
    app.toc_next();
    assert_eq!(app.toc_index, 2, "cursor stops at the last entry");
    app.toc_prev();
    app.jump_to_selected();
    assert_eq!(app.viewport.offset(), 21);
    app.tick();
    assert_eq!(app.tracker.active_id(), Some("b"));

    app.toggle_focus();
    app.toc_index = 0;
    app.toggle_focus();
    assert_eq!(app.toc_index, 1, "entering contents lands on the active section");
}

#[test]
fn test_reload_with_same_sections_keeps_tracker() {
    let file = temp_doc(&["A", "B", "C"]);
    let mut app = app_for(&file);
    let before = app.tracker.measurements();

    app.reload().unwrap();
    assert_eq!(app.message.as_deref(), Some("Reloaded"));
    app.tick();
    assert_eq!(app.tracker.measurements(), before + 1);
    assert_eq!(app.signals.live_count(), 3);
}

#[test]
fn test_reload_with_new_sections_remounts() {
    let file = temp_doc(&["A", "B", "C"]);
    let mut app = app_for(&file);
    fs::write(file.path(), fixture(&["A", "Z"])).unwrap();

    app.reload().unwrap();
    let ids: Vec<&str> = app.sections().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "z"]);
    assert_eq!(app.signals.live_count(), 3, "old listeners released");
    assert_eq!(app.tracker.active_id(), Some("a"));
}

#[test]
fn test_shutdown_releases_listeners() {
    let file = temp_doc(&["A", "B", "C"]);
    let mut app = app_for(&file);
    app.shutdown();
    assert_eq!(app.signals.live_count(), 0);

    app.scroll_to(42);
    assert!(app.tick().is_none());
    assert_eq!(app.tracker.active_id(), Some("a"));
}
