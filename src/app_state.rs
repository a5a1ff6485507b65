//! The viewer state bridging the laid-out document, the scroll position and the tracker.
//!
//! The viewer is the host the tracker measures against. [`Viewport`] is the surface:
//! it owns the layout and the scroll offset. [`AppState`] turns user actions into
//! trigger signals and runs one tracker frame per drawn frame, so a burst of scroll
//! input between two frames costs a single measurement.

use crate::config::Config;
use crate::document::Layout;
use crate::formats::markdown::MarkdownFormat;
use crate::input::{self, Document};
use crate::schedule::{Signal, SignalRegistry};
use crate::section::Section;
use crate::surface::{ScrollOffsets, Surface};
use crate::tracker::{ActiveChange, Tracker};
use std::io;
use std::path::PathBuf;

/// Scrollable window onto a laid-out document.
pub struct Viewport {
    layout: Layout,
    offset: i64,
    height: u16,
}

impl Viewport {
    #[must_use]
    /// Starts at the top of `layout` showing `height` rows.
    pub fn new(layout: Layout, height: u16) -> Self {
        Self {
            layout,
            offset: 0,
            height,
        }
    }

    #[must_use]
    /// Current layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    /// First visible row.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    #[must_use]
    /// Number of visible rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> i64 {
        let rows = i64::try_from(self.layout.row_count()).unwrap_or(i64::MAX);
        rows.saturating_sub(i64::from(self.height)).max(0)
    }

    /// Moves to `offset`, clamped to the scrollable range. Returns whether it moved.
    pub fn scroll_to(&mut self, offset: i64) -> bool {
        let clamped = offset.clamp(0, self.max_offset());
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }

    /// Swaps in a new layout and height, keeping the offset in range.
    pub fn relayout(&mut self, layout: Layout, height: u16) {
        self.layout = layout;
        self.height = height;
        self.offset = self.offset.clamp(0, self.max_offset());
    }
}

impl Surface for Viewport {
    fn scroll_offsets(&self) -> ScrollOffsets {
        ScrollOffsets::viewport(self.offset)
    }

    fn anchor_top(&self, id: &str) -> Option<i64> {
        self.layout
            .anchor_top(id)
            .and_then(|row| i64::try_from(row).ok())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which pane receives navigation keys.
pub enum Focus {
    /// Keys scroll the document.
    Document,
    /// Keys move the cursor in the contents list.
    Contents,
}

/// Single source of truth for one viewing session.
pub struct AppState {
    /// File being viewed.
    pub path: PathBuf,
    /// Source text and tracked headings.
    pub document: Document,
    /// Visible window onto the laid-out document.
    pub viewport: Viewport,
    /// Listener table standing in for the terminal's event sources.
    pub signals: SignalRegistry,
    /// Tracker for the current page view.
    pub tracker: Tracker,
    /// Pane receiving navigation keys.
    pub focus: Focus,
    /// Cursor in the contents list.
    pub toc_index: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    wrap_width: usize,
    lookahead: i64,
}

impl AppState {
    #[must_use]
    /// Lays out `document` for a `(width, height)` document pane and mounts a tracker.
    pub fn new(path: PathBuf, document: Document, cfg: &Config, size: (u16, u16)) -> Self {
        let (width, height) = size;
        let layout = Layout::build(
            &document.source,
            &document.headings,
            cfg.wrap_width.min(usize::from(width)),
        );
        let viewport = Viewport::new(layout, height);
        let mut signals = SignalRegistry::new();
        let mut tracker = Tracker::new(document.sections(), cfg.lookahead);
        tracker.mount(&viewport, &mut signals);

        Self {
            path,
            document,
            viewport,
            signals,
            tracker,
            focus: Focus::Document,
            toc_index: 0,
            message: None,
            wrap_width: cfg.wrap_width,
            lookahead: cfg.lookahead,
        }
    }

    #[must_use]
    /// Sections of the current page view.
    pub fn sections(&self) -> &[Section] {
        self.tracker.sections()
    }

    /// Scrolls by `delta` rows.
    pub fn scroll_by(&mut self, delta: i64) {
        self.scroll_to(self.viewport.offset().saturating_add(delta));
    }

    /// Scrolls so that `row` is the first visible row.
    pub fn scroll_to(&mut self, row: i64) {
        if self.viewport.scroll_to(row) {
            self.tracker.notify(Signal::Scroll);
        }
    }

    /// Scrolls down by one screen.
    pub fn page_down(&mut self) {
        self.scroll_by(i64::from(self.viewport.height().max(1)));
    }

    /// Scrolls up by one screen.
    pub fn page_up(&mut self) {
        self.scroll_by(-i64::from(self.viewport.height().max(1)));
    }

    /// Jumps to the start of the document.
    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0);
    }

    /// Jumps to the end of the document.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(self.viewport.max_offset());
    }

    /// Relayouts for a new document pane size.
    pub fn resize(&mut self, width: u16, height: u16) {
        let layout = self.layout_for(width);
        self.viewport.relayout(layout, height);
        self.tracker.notify(Signal::Resize);
    }

    /// Re-reads the file from disk.
    ///
    /// Unchanged headings keep the page view and only the layout settles anew. Changed
    /// headings make a new page view: the old tracker is torn down and a fresh one
    /// mounted over the new sections.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can no longer be read or parsed.
    pub fn reload(&mut self) -> io::Result<()> {
        let document = input::read_document(&self.path, &MarkdownFormat)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let width = u16::try_from(self.viewport.layout().width()).unwrap_or(u16::MAX);
        let same_sections = document.sections() == self.tracker.sections();
        self.document = document;

        let layout = self.layout_for(width);
        self.viewport.relayout(layout, self.viewport.height());

        if same_sections {
            self.tracker.notify(Signal::ContentSettled);
            self.message = Some("Reloaded".to_string());
        } else {
            self.tracker.teardown(&mut self.signals);
            self.tracker = Tracker::new(self.document.sections(), self.lookahead);
            self.tracker.mount(&self.viewport, &mut self.signals);
            self.toc_index = self.toc_index.min(self.sections().len().saturating_sub(1));
            self.message = Some(format!("Reloaded ({} sections)", self.sections().len()));
        }
        Ok(())
    }

    /// Runs one tracker frame. Call once per drawn frame.
    pub fn tick(&mut self) -> Option<ActiveChange> {
        self.tracker.run_frame(&self.viewport)
    }

    /// Moves the contents cursor down.
    pub fn toc_next(&mut self) {
        if self.toc_index + 1 < self.sections().len() {
            self.toc_index += 1;
        }
    }

    /// Moves the contents cursor up.
    pub fn toc_prev(&mut self) {
        self.toc_index = self.toc_index.saturating_sub(1);
    }

    /// Scrolls the section under the contents cursor to the top of the viewport.
    pub fn jump_to_selected(&mut self) {
        let Some(section) = self.sections().get(self.toc_index) else {
            return;
        };
        if let Some(top) = self.viewport.anchor_top(&section.id) {
            self.scroll_to(top);
        }
    }

    /// Switches focus between the document and the contents list.
    ///
    /// Entering the contents list puts the cursor on the active section.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Document => {
                if let Some(index) = self.tracker.active_index() {
                    self.toc_index = index;
                }
                Focus::Contents
            }
            Focus::Contents => Focus::Document,
        };
    }

    /// Releases the tracker's listeners. The state is inert afterwards.
    pub fn shutdown(&mut self) {
        self.tracker.teardown(&mut self.signals);
    }

    fn layout_for(&self, width: u16) -> Layout {
        Layout::build(
            &self.document.source,
            &self.document.headings,
            self.wrap_width.min(usize::from(width)),
        )
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
