use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use common_enums::ConnectivityEvent;
use dashmap::DashMap;

/// Callback invoked by the environment when a connectivity event fires.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned on subscription, used to deregister the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Connectivity signal supplied by the host runtime.
pub trait ConnectivityEnvironment: Send + Sync {
    /// Whether the network is reachable right now.
    fn is_online(&self) -> bool;

    fn subscribe(&self, event: ConnectivityEvent, listener: Listener) -> ListenerId;

    /// Removing an unknown or already removed listener is a no-op.
    fn unsubscribe(&self, event: ConnectivityEvent, id: ListenerId);
}

/// Subscription bookkeeping for environments that dispatch events themselves.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: DashMap<ConnectivityEvent, Vec<(ListenerId, Listener)>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, event: ConnectivityEvent, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.entry(event).or_default().push((id, listener));
        id
    }

    pub fn unsubscribe(&self, event: ConnectivityEvent, id: ListenerId) {
        if let Some(mut registered) = self.listeners.get_mut(&event) {
            registered.retain(|(registered_id, _)| *registered_id != id);
        }
    }

    /// Invokes every listener registered for `event`.
    ///
    /// The shard guard is released before any listener runs, so listeners may subscribe or
    /// unsubscribe re-entrantly.
    pub fn dispatch(&self, event: ConnectivityEvent) -> usize {
        let snapshot: Vec<Listener> = self
            .listeners
            .get(&event)
            .map(|registered| {
                registered
                    .iter()
                    .map(|(_, listener)| Arc::clone(listener))
                    .collect()
            })
            .unwrap_or_default();

        for listener in &snapshot {
            listener();
        }
        snapshot.len()
    }

    pub fn len(&self, event: ConnectivityEvent) -> usize {
        self.listeners
            .get(&event)
            .map_or(0, |registered| registered.len())
    }

    pub fn is_empty(&self) -> bool {
        self.listeners
            .iter()
            .all(|registered| registered.value().is_empty())
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("online", &self.len(ConnectivityEvent::BecameReachable))
            .field("offline", &self.len(ConnectivityEvent::BecameUnreachable))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn counting_listener(counter: &Arc<AtomicUsize>) -> Listener {
        let counter = Arc::clone(counter);
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn dispatch_reaches_only_listeners_of_that_event() {
        let registry = ListenerRegistry::new();
        let online = Arc::new(AtomicUsize::new(0));
        let offline = Arc::new(AtomicUsize::new(0));

        registry.subscribe(ConnectivityEvent::BecameReachable, counting_listener(&online));
        registry.subscribe(
            ConnectivityEvent::BecameUnreachable,
            counting_listener(&offline),
        );

        assert_eq!(registry.dispatch(ConnectivityEvent::BecameUnreachable), 1);
        assert_eq!(online.load(Ordering::SeqCst), 0);
        assert_eq!(offline.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribed_listeners_are_not_invoked() {
        let registry = ListenerRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let id = registry.subscribe(ConnectivityEvent::BecameReachable, counting_listener(&calls));
        registry.unsubscribe(ConnectivityEvent::BecameReachable, id);
        // second removal is a no-op
        registry.unsubscribe(ConnectivityEvent::BecameReachable, id);

        assert_eq!(registry.dispatch(ConnectivityEvent::BecameReachable), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn listener_ids_are_unique() {
        let registry = ListenerRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = registry.subscribe(ConnectivityEvent::BecameReachable, counting_listener(&calls));
        let second =
            registry.subscribe(ConnectivityEvent::BecameReachable, counting_listener(&calls));

        assert_ne!(first, second);
        assert_eq!(registry.len(ConnectivityEvent::BecameReachable), 2);
    }

    #[test]
    fn listeners_may_unsubscribe_while_being_dispatched() {
        let registry = Arc::new(ListenerRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let own_id = Arc::new(AtomicU64::new(u64::MAX));

        let listener: Listener = {
            let registry = Arc::clone(&registry);
            let calls = Arc::clone(&calls);
            let own_id = Arc::clone(&own_id);
            Arc::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                registry.unsubscribe(
                    ConnectivityEvent::BecameUnreachable,
                    ListenerId(own_id.load(Ordering::SeqCst)),
                );
                registry.subscribe(ConnectivityEvent::BecameReachable, Arc::new(|| {}));
            })
        };
        let id = registry.subscribe(ConnectivityEvent::BecameUnreachable, listener);
        own_id.store(id.0, Ordering::SeqCst);

        assert_eq!(registry.dispatch(ConnectivityEvent::BecameUnreachable), 1);
        assert_eq!(registry.dispatch(ConnectivityEvent::BecameUnreachable), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(ConnectivityEvent::BecameReachable), 1);
    }
}
