//! Where the host delivers its events.
//!
//! The host owns a [`CallbackRegistry`] and calls [`emit`](CallbackRegistry::emit)
//! for every [`HostEvent`]. Listeners such as
//! [`CursorMemory::register`](crate::plugin::CursorMemory::register) subscribe
//! a callback and hand the event off; callbacks must not block.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::events::HostEvent;

/// Handle returned by [`CallbackRegistry::subscribe`].
pub type SubscriptionId = u64;

type Listener = Arc<dyn Fn(&HostEvent) + Send + Sync>;

/// Host-side list of [`HostEvent`] listeners.
#[derive(Default)]
pub struct CallbackRegistry {
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    last_id: AtomicU64,
}

impl CallbackRegistry {
    /// Create a registry with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener. Listeners are called in subscription order.
    pub fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Deliver `event` to every listener.
    ///
    /// A panicking listener is logged and skipped.
    pub fn emit(&self, event: &HostEvent) {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        for (id, listener) in listeners.iter() {
            let delivered = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener(event)
            }));
            if delivered.is_err() {
                log::error!("Listener {} panicked on {} event", id, event.event_type());
            }
        }
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("CallbackRegistry")
            .field("listeners", &listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder(registry: &CallbackRegistry) -> (SubscriptionId, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = registry.subscribe(Arc::new(move |event: &HostEvent| {
            sink.lock().unwrap().push(event.event_type().to_string());
        }));
        (id, seen)
    }

    #[test]
    fn test_emit_reaches_listener_until_unsubscribed() {
        let registry = CallbackRegistry::new();
        let (id, seen) = recorder(&registry);

        registry.emit(&HostEvent::document_opened("a.md"));
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.emit(&HostEvent::document_opened("b.md"));

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_ids_are_distinct() {
        let registry = CallbackRegistry::new();
        let (first, _) = recorder(&registry);
        let (second, _) = recorder(&registry);
        assert_ne!(first, second);
    }

    #[test]
    fn test_panicking_listener_does_not_stop_delivery() {
        let registry = CallbackRegistry::new();
        registry.subscribe(Arc::new(|_: &HostEvent| panic!("listener failed")));
        let (_, seen) = recorder(&registry);

        registry.emit(&HostEvent::delay_setting_changed(20));

        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
