use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use common_enums::ConnectivityEvent;
use tokio::sync::mpsc;

use crate::environment::{ConnectivityEnvironment, Listener, ListenerId, ListenerRegistry};

/// Environment whose reachability signal is pushed in by the host.
///
/// Hosts without a native connectivity API call [`PushEnvironment::emit`] (or feed
/// [`pump_events`]) whenever they learn that reachability changed.
#[derive(Debug)]
pub struct PushEnvironment {
    online: AtomicBool,
    listeners: ListenerRegistry,
}

impl PushEnvironment {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Records the new reachability and notifies the listeners of `event`.
    pub fn emit(&self, event: ConnectivityEvent) {
        self.online
            .store(event.target_state().is_online(), Ordering::Release);
        let notified = self.listeners.dispatch(event);
        tracing::trace!(%event, notified, "connectivity event dispatched");
    }

    pub fn go_online(&self) {
        self.emit(ConnectivityEvent::BecameReachable);
    }

    pub fn go_offline(&self) {
        self.emit(ConnectivityEvent::BecameUnreachable);
    }

    pub fn listener_count(&self, event: ConnectivityEvent) -> usize {
        self.listeners.len(event)
    }
}

impl ConnectivityEnvironment for PushEnvironment {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    fn subscribe(&self, event: ConnectivityEvent, listener: Listener) -> ListenerId {
        self.listeners.subscribe(event, listener)
    }

    fn unsubscribe(&self, event: ConnectivityEvent, id: ListenerId) {
        self.listeners.unsubscribe(event, id);
    }
}

/// Forwards events received on `events` into `environment` until every sender is dropped.
pub async fn pump_events(
    environment: Arc<PushEnvironment>,
    mut events: mpsc::Receiver<ConnectivityEvent>,
) {
    while let Some(event) = events.recv().await {
        environment.emit(event);
    }
    tracing::debug!("connectivity event channel closed");
}
