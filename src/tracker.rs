//! The active-section tracker.
//!
//! Given the ordered sections of one document, the tracker keeps a best-effort answer
//! to "which section is the reader in" as the surface scrolls. It is owned per view:
//! construct it with the sections, [`mount`](Tracker::mount) it against a surface,
//! feed it signals with [`notify`](Tracker::notify), run it once per frame with
//! [`run_frame`](Tracker::run_frame), and [`teardown`](Tracker::teardown) when the
//! view goes away.
//!
//! # Measurement
//!
//! ```text
//! activation line = resolved scroll offset + lookahead
//! active          = last anchor (sorted by top) with top <= activation line
//!                   else the first anchor
//! ```
//!
//! The lookahead lets a section count as read slightly before its heading reaches
//! the very top edge.

use crate::schedule::{Coalescer, ListenerId, Notify, Signal, SignalSource};
use crate::section::Section;
use crate::surface::Surface;

/// A section id resolved to a position for one measurement cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor<'a> {
    /// Section id the anchor belongs to.
    pub id: &'a str,
    /// Top offset on the surface at measurement time.
    pub top: i64,
}

#[must_use]
/// Picks the active anchor for an activation line.
///
/// Sorts `anchors` by top (stable, so equal tops keep document order) and returns the
/// last one at or above the line. When every anchor is below the line the first one
/// is returned, so the reader above the first heading still sees a highlight.
pub fn select_active<'a, 'b>(
    anchors: &'b mut [Anchor<'a>],
    activation_line: i64,
) -> Option<&'b Anchor<'a>> {
    anchors.sort_by_key(|anchor| anchor.top);
    anchors
        .iter()
        .rev()
        .find(|anchor| anchor.top <= activation_line)
        .or_else(|| anchors.first())
}

/// A completed change of active section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveChange {
    /// Section active before the measurement.
    pub previous: Option<String>,
    /// Section active after it.
    pub current: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where a tracker is in its life.
pub enum Lifecycle {
    /// Constructed but not yet measuring.
    Unmounted,
    /// Listening and measuring.
    Mounted,
    /// Listeners released; inert from here on.
    TornDown,
}

type Observer = Box<dyn FnMut(&ActiveChange)>;

/// Maintains the active section of one document view.
pub struct Tracker {
    sections: Vec<Section>,
    lookahead: i64,
    active_id: Option<String>,
    lifecycle: Lifecycle,
    registrations: Vec<(Signal, ListenerId)>,
    coalescer: Coalescer,
    observers: Vec<Observer>,
    measurements: u64,
}

impl Tracker {
    #[must_use]
    /// Creates an unmounted tracker over `sections` in document order.
    pub fn new(sections: Vec<Section>, lookahead: i64) -> Self {
        Self {
            sections,
            lookahead,
            active_id: None,
            lifecycle: Lifecycle::Unmounted,
            registrations: Vec::new(),
            coalescer: Coalescer::new(),
            observers: Vec::new(),
            measurements: 0,
        }
    }

    /// Registers trigger listeners and takes the initial measurement.
    ///
    /// Listener registration is best effort: a host that cannot deliver some signal
    /// just leaves it out, and a host that delivers none leaves the tracker with the
    /// mount measurement only. An empty document registers nothing and never measures.
    pub fn mount<S, L>(&mut self, surface: &S, signals: &mut L) -> Option<ActiveChange>
    where
        S: Surface + ?Sized,
        L: SignalSource + ?Sized,
    {
        if self.lifecycle != Lifecycle::Unmounted {
            return None;
        }
        self.lifecycle = Lifecycle::Mounted;

        if self.sections.is_empty() {
            tracing::debug!("no sections to track");
            return None;
        }

        for signal in Signal::TRIGGERS {
            match signals.listen(signal) {
                Ok(id) => {
                    tracing::debug!(%signal, ?id, "listening");
                    self.registrations.push((signal, id));
                }
                Err(e) => tracing::warn!(%signal, "listener not registered: {e}"),
            }
        }
        if self.registrations.is_empty() {
            tracing::warn!("no trigger signals available, tracking mount position only");
        }

        self.coalescer.request(Signal::Mount);
        self.run_frame(surface)
    }

    /// Records a trigger signal for the next frame.
    ///
    /// At most one measurement is ever pending; signals arriving while one is already
    /// pending are dropped. Signals without a live registration are ignored, which
    /// includes everything after teardown.
    pub fn notify(&mut self, signal: Signal) -> Notify {
        if self.lifecycle != Lifecycle::Mounted
            || !self.registrations.iter().any(|(s, _)| *s == signal)
        {
            return Notify::Ignored;
        }
        let outcome = self.coalescer.request(signal);
        if outcome == Notify::Coalesced {
            tracing::trace!(%signal, "coalesced into pending measurement");
        }
        outcome
    }

    /// Runs the pending measurement, if any. Call once per rendered frame.
    pub fn run_frame<S: Surface + ?Sized>(&mut self, surface: &S) -> Option<ActiveChange> {
        let signal = self.coalescer.take()?;
        tracing::trace!(%signal, "measuring");
        self.measure(surface)
    }

    /// Measures the surface and updates the active section.
    ///
    /// Anchors that do not resolve are left out of this cycle. If none resolve the
    /// current answer is kept until a later trigger finds them. Returns the change,
    /// if the active section moved.
    pub fn measure<S: Surface + ?Sized>(&mut self, surface: &S) -> Option<ActiveChange> {
        if self.lifecycle != Lifecycle::Mounted || self.sections.is_empty() {
            return None;
        }
        self.measurements += 1;

        let activation_line = surface
            .scroll_offsets()
            .resolve()
            .saturating_add(self.lookahead);

        let mut anchors: Vec<Anchor<'_>> = self
            .sections
            .iter()
            .filter_map(|section| {
                surface.anchor_top(&section.id).map(|top| Anchor {
                    id: section.id.as_str(),
                    top,
                })
            })
            .collect();

        let chosen = select_active(&mut anchors, activation_line)?.id;
        if self.active_id.as_deref() == Some(chosen) {
            return None;
        }

        let change = ActiveChange {
            previous: self.active_id.replace(chosen.to_string()),
            current: chosen.to_string(),
        };
        tracing::debug!(
            previous = ?change.previous,
            current = %change.current,
            activation_line,
            "active section changed"
        );
        for observer in &mut self.observers {
            observer(&change);
        }
        Some(change)
    }

    /// Calls `observer` after every change of active section until teardown.
    pub fn observe(&mut self, observer: impl FnMut(&ActiveChange) + 'static) {
        if self.lifecycle != Lifecycle::TornDown {
            self.observers.push(Box::new(observer));
        }
    }

    /// Releases every listener and drops pending work and observers.
    pub fn teardown<L: SignalSource + ?Sized>(&mut self, signals: &mut L) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        for (signal, id) in self.registrations.drain(..) {
            tracing::debug!(%signal, ?id, "unlistening");
            signals.unlisten(id);
        }
        self.coalescer.cancel();
        self.observers.clear();
        self.lifecycle = Lifecycle::TornDown;
    }

    #[must_use]
    /// Id of the active section, unset until the first successful measurement.
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    #[must_use]
    /// Position of the active section in document order.
    pub fn active_index(&self) -> Option<usize> {
        let active = self.active_id.as_deref()?;
        self.sections.iter().position(|s| s.id == active)
    }

    #[must_use]
    /// Sections in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    /// Margin added to the scroll offset to form the activation line.
    pub fn lookahead(&self) -> i64 {
        self.lookahead
    }

    #[must_use]
    /// Measurement passes executed so far.
    pub fn measurements(&self) -> u64 {
        self.measurements
    }

    #[must_use]
    /// Signals folded into an already pending measurement.
    pub fn coalesced(&self) -> u64 {
        self.coalescer.coalesced()
    }

    #[must_use]
    /// Whether a measurement is waiting for the next frame.
    pub fn is_pending(&self) -> bool {
        self.coalescer.is_pending()
    }

    #[must_use]
    /// Current lifecycle stage.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    /// Signals with a live registration.
    pub fn listening(&self) -> Vec<Signal> {
        self.registrations.iter().map(|(signal, _)| *signal).collect()
    }
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;
