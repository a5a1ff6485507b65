//! The viewing surface the tracker measures against.
//!
//! The tracker never owns layout. It asks a [`Surface`] for the current scroll
//! offset and for the top of each anchor, every time it measures, because fonts,
//! images and window size all move anchors around after the fact.

/// Scroll offsets as reported by each place a host might keep them.
///
/// Different hosts track scrolling on different objects, so the tracker takes all
/// of them and lets [`ScrollOffsets::resolve`] pick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollOffsets {
    /// Offset reported by the viewport itself.
    pub viewport: Option<i64>,
    /// Offset reported by the root document element.
    pub document: Option<i64>,
    /// Offset reported by the content body.
    pub body: Option<i64>,
}

impl ScrollOffsets {
    #[must_use]
    /// Offsets where only the viewport reports a value.
    pub const fn viewport(offset: i64) -> Self {
        Self {
            viewport: Some(offset),
            document: None,
            body: None,
        }
    }

    #[must_use]
    /// Walks viewport, document, body and takes the first defined nonzero offset.
    ///
    /// Falls back to `0` when nothing reports, which leaves the activation line at
    /// the lookahead margin alone.
    pub fn resolve(self) -> i64 {
        [self.viewport, self.document, self.body]
            .into_iter()
            .flatten()
            .find(|&offset| offset != 0)
            .unwrap_or(0)
    }
}

/// Rendered surface resolving section ids to positioned anchors.
pub trait Surface {
    /// Current scroll offsets of the surface.
    fn scroll_offsets(&self) -> ScrollOffsets;

    /// Top offset of the anchor named `id`, or `None` if it is not mounted.
    fn anchor_top(&self, id: &str) -> Option<i64>;
}

#[cfg(test)]
#[path = "tests/surface.rs"]
mod tests;
