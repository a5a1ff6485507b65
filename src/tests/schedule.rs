use super::{Coalescer, Notify, Signal, SignalRegistry, SignalSource};
use crate::error::ListenError;

#[test]
fn test_coalescer_holds_one_pending_signal() {
    let mut coalescer = Coalescer::new();
    assert_eq!(coalescer.request(Signal::Scroll), Notify::Scheduled);
    assert_eq!(coalescer.request(Signal::Resize), Notify::Coalesced);
    assert_eq!(coalescer.request(Signal::Scroll), Notify::Coalesced);

    assert_eq!(coalescer.take(), Some(Signal::Scroll), "first signal raised it");
    assert_eq!(coalescer.take(), None);
    assert_eq!(coalescer.coalesced(), 2);
}

#[test]
fn test_cancel_drops_pending_work() {
    let mut coalescer = Coalescer::new();
    coalescer.request(Signal::ContentSettled);
    coalescer.cancel();
    assert!(!coalescer.is_pending());
    assert_eq!(coalescer.request(Signal::Scroll), Notify::Scheduled);
}

#[test]
fn test_registry_tracks_live_listeners() {
    let mut registry = SignalRegistry::new();
    let scroll = registry.listen(Signal::Scroll).unwrap();
    let resize = registry.listen(Signal::Resize).unwrap();
    assert_ne!(scroll, resize);
    assert_eq!(registry.listeners(Signal::Scroll).collect::<Vec<_>>(), vec![scroll]);

    registry.unlisten(scroll);
    assert!(!registry.is_live(scroll));
    assert!(registry.is_live(resize));
    assert_eq!(registry.live_count(), 1);

    registry.unlisten(scroll);
    assert_eq!(registry.live_count(), 1, "unknown ids are ignored");
}

#[test]
fn test_registry_refuses_unsupported_signals() {
    let mut registry = SignalRegistry::with_support([Signal::Scroll]);
    assert_eq!(
        registry.listen(Signal::Resize),
        Err(ListenError::Unsupported(Signal::Resize))
    );
    assert_eq!(
        ListenError::Unsupported(Signal::ContentSettled).to_string(),
        "host does not deliver content-settled signals"
    );
}
