//! Library change events and the broadcast bus that carries them.
//!
//! Two event kinds cross this bus: a mutation performed by this context
//! (every successful store) and a rewrite of the persisted value by a
//! foreign context (another window sharing the same medium). Observers
//! treat both the same way: re-read and refresh. Delivery is
//! best-effort; a slow receiver that lags misses events, which is
//! acceptable for refresh signals where freshness matters more than
//! completeness.

use serde::Serialize;
use tokio::sync::broadcast;

/// A change to the persisted library.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum LibraryEvent {
    /// This context wrote the library. Carries the post-write collection
    /// sizes so simple observers can update counters without a re-read.
    LibraryUpdated { videos: usize, notes: usize },
    /// A foreign context rewrote the persisted value underneath us.
    StorageChanged,
}

impl LibraryEvent {
    /// Namespaced event type name (e.g. for logging or a wire protocol).
    pub fn event_type(&self) -> &'static str {
        match self {
            LibraryEvent::LibraryUpdated { .. } => "library.updated",
            LibraryEvent::StorageChanged => "storage.changed",
        }
    }
}

/// Broadcast-based event bus distributing library events to observers.
///
/// Uses `tokio::sync::broadcast` with a configurable buffer size. If
/// there are no active subscribers, emitted events are silently dropped.
pub struct EventBus {
    tx: broadcast::Sender<LibraryEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    ///
    /// Recommended: 64 for production, 8 for tests.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all subscribers.
    pub fn emit(&self, event: LibraryEvent) {
        tracing::debug!(
            event_type = event.event_type(),
            subscriber_count = self.tx.receiver_count(),
            "EventBus emit"
        );
        let _ = self.tx.send(event);
    }

    /// Subscribe to library events. Each receiver sees every event
    /// emitted after the subscription, subject to the lag contract.
    pub fn subscribe(&self) -> broadcast::Receiver<LibraryEvent> {
        self.tx.subscribe()
    }

    /// Number of currently attached receivers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_emitted_event() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        bus.emit(LibraryEvent::LibraryUpdated { videos: 2, notes: 5 });
        let event = rx.recv().await.unwrap();
        assert_eq!(event, LibraryEvent::LibraryUpdated { videos: 2, notes: 5 });
    }

    #[tokio::test]
    async fn test_both_event_kinds_reach_same_subscriber() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        bus.emit(LibraryEvent::LibraryUpdated { videos: 0, notes: 0 });
        bus.emit(LibraryEvent::StorageChanged);
        assert_eq!(
            rx.recv().await.unwrap().event_type(),
            "library.updated"
        );
        assert_eq!(rx.recv().await.unwrap(), LibraryEvent::StorageChanged);
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::new(8);
        assert_eq!(bus.subscriber_count(), 0);
        bus.emit(LibraryEvent::StorageChanged);
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json =
            serde_json::to_value(LibraryEvent::LibraryUpdated { videos: 1, notes: 2 }).unwrap();
        assert_eq!(json["type"], "LibraryUpdated");
        assert_eq!(json["videos"], 1);
    }
}
