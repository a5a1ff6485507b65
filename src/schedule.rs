//! Trigger signals and the depth-1 coalescing that sits between them and measurement.
//!
//! Scroll events arrive far more often than frames are drawn. Rather than measure on
//! every one, each signal only raises a pending flag; the next frame takes the flag
//! and measures once. Signals arriving while the flag is already up are dropped, not
//! queued: only the final resting position matters.

use crate::error::ListenError;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Something that may have moved anchors or the scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Signal {
    /// The tracker was just mounted.
    Mount,
    /// The viewing surface scrolled.
    Scroll,
    /// The viewport changed size.
    Resize,
    /// Content under observation settled into a new layout.
    ContentSettled,
}

impl Signal {
    /// Signals a tracker listens for once mounted.
    pub const TRIGGERS: [Self; 3] = [Self::Scroll, Self::Resize, Self::ContentSettled];
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mount => "mount",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::ContentSettled => "content-settled",
        };
        f.write_str(name)
    }
}

/// Outcome of handing a signal to the coalescer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notify {
    /// A measurement is now pending for the next frame.
    Scheduled,
    /// A measurement was already pending; the signal was folded into it.
    Coalesced,
    /// Nobody is listening for this signal.
    Ignored,
}

#[derive(Debug, Default)]
/// Pending-work flag of depth one.
pub struct Coalescer {
    pending: Option<Signal>,
    coalesced: u64,
}

impl Coalescer {
    #[must_use]
    /// Starts with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the pending flag, or drops `signal` if it is already raised.
    pub fn request(&mut self, signal: Signal) -> Notify {
        if self.pending.is_some() {
            self.coalesced += 1;
            Notify::Coalesced
        } else {
            self.pending = Some(signal);
            Notify::Scheduled
        }
    }

    /// Takes the pending work, lowering the flag. Returns the signal that raised it.
    pub fn take(&mut self) -> Option<Signal> {
        self.pending.take()
    }

    /// Drops pending work without running it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    /// Whether a measurement is waiting for the next frame.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    /// Signals dropped because work was already pending.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

/// Handle for one registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Host seam for registering interest in trigger signals.
pub trait SignalSource {
    /// Registers a listener for `signal`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot deliver this kind of signal.
    fn listen(&mut self, signal: Signal) -> Result<ListenerId, ListenError>;

    /// Deregisters a listener. Unknown ids are ignored.
    fn unlisten(&mut self, id: ListenerId);
}

/// In-process [`SignalSource`] keeping a table of live listeners.
#[derive(Debug)]
pub struct SignalRegistry {
    supported: HashSet<Signal>,
    live: BTreeMap<ListenerId, Signal>,
    next_id: u64,
}

impl SignalRegistry {
    #[must_use]
    /// A registry that can deliver every trigger signal.
    pub fn new() -> Self {
        Self::with_support(Signal::TRIGGERS)
    }

    #[must_use]
    /// A registry that only delivers the given signals and refuses the rest.
    pub fn with_support(signals: impl IntoIterator<Item = Signal>) -> Self {
        Self {
            supported: signals.into_iter().collect(),
            live: BTreeMap::new(),
            next_id: 0,
        }
    }

    #[must_use]
    /// Whether `id` is still registered.
    pub fn is_live(&self, id: ListenerId) -> bool {
        self.live.contains_key(&id)
    }

    #[must_use]
    /// Number of listeners currently registered.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Listeners currently registered for `signal`.
    pub fn listeners(&self, signal: Signal) -> impl Iterator<Item = ListenerId> + '_ {
        self.live
            .iter()
            .filter(move |(_, s)| **s == signal)
            .map(|(id, _)| *id)
    }
}

impl Default for SignalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for SignalRegistry {
    fn listen(&mut self, signal: Signal) -> Result<ListenerId, ListenError> {
        if !self.supported.contains(&signal) {
            return Err(ListenError::Unsupported(signal));
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.live.insert(id, signal);
        Ok(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.live.remove(&id);
    }
}

#[cfg(test)]
#[path = "tests/schedule.rs"]
mod tests;
