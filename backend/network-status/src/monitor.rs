use std::sync::{Arc, Mutex, PoisonError};

use common_enums::{ConnectivityEvent, ErrorClassification, NetworkState};
use common_utils::consts;
use shared_metrics as metrics;
use tokio::sync::watch;

use crate::environment::{ConnectivityEnvironment, ListenerId};

const TRACKED_EVENTS: [ConnectivityEvent; 2] = [
    ConnectivityEvent::BecameReachable,
    ConnectivityEvent::BecameUnreachable,
];

/// Where a guarded navigation should go instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorRedirect {
    pub classification: ErrorClassification,
}

impl ErrorRedirect {
    pub fn redirect_path(&self) -> String {
        format!(
            "{}?{}={}",
            consts::ERROR_PAGE_PATH,
            consts::ERROR_TYPE_QUERY_PARAM,
            self.classification
        )
    }
}

/// Mirrors the environment's connectivity signal into an `Online`/`Offline` state.
///
/// Both listeners are registered on construction and removed by [`teardown`], which also
/// runs on drop.
///
/// [`teardown`]: NetworkStatusMonitor::teardown
pub struct NetworkStatusMonitor<E: ConnectivityEnvironment> {
    environment: Arc<E>,
    state: Arc<watch::Sender<NetworkState>>,
    registrations: Mutex<Option<[(ConnectivityEvent, ListenerId); 2]>>,
}

impl<E: ConnectivityEnvironment> NetworkStatusMonitor<E> {
    pub fn new(environment: Arc<E>) -> Self {
        let initial = NetworkState::from_reachable(environment.is_online());
        let state = Arc::new(watch::Sender::new(initial));

        let registrations = TRACKED_EVENTS.map(|event| {
            let state = Arc::clone(&state);
            let id = environment.subscribe(event, Arc::new(move || apply(&state, event)));
            (event, id)
        });

        tracing::debug!(%initial, "network status monitor attached");

        Self {
            environment,
            state,
            registrations: Mutex::new(Some(registrations)),
        }
    }

    pub fn status(&self) -> NetworkState {
        *self.state.borrow()
    }

    pub fn is_online(&self) -> bool {
        self.status().is_online()
    }

    /// Receiver that observes every state transition.
    pub fn watch(&self) -> watch::Receiver<NetworkState> {
        self.state.subscribe()
    }

    /// Returns `true` when navigation may proceed.
    ///
    /// While offline `navigate_to_error` is invoked once with the redirect and `false` is
    /// returned; performing the redirect is left to the caller.
    pub fn guard<F>(&self, navigate_to_error: F) -> bool
    where
        F: FnOnce(ErrorRedirect),
    {
        if self.is_online() {
            return true;
        }

        let redirect = ErrorRedirect {
            classification: ErrorClassification::Network,
        };
        tracing::warn!(
            classification = %redirect.classification,
            path = %redirect.redirect_path(),
            "network unreachable, redirecting navigation"
        );
        metrics::offline_navigation_redirects_total.inc();
        navigate_to_error(redirect);
        false
    }

    /// Deregisters both listeners. Calling it again is a no-op.
    pub fn teardown(&self) {
        let registrations = self
            .registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(registrations) = registrations {
            for (event, id) in registrations {
                self.environment.unsubscribe(event, id);
            }
            tracing::debug!("network status monitor detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<E: ConnectivityEnvironment> Drop for NetworkStatusMonitor<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<E: ConnectivityEnvironment> std::fmt::Debug for NetworkStatusMonitor<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkStatusMonitor")
            .field("status", &self.status())
            .field("attached", &self.is_attached())
            .finish()
    }
}

fn apply(state: &watch::Sender<NetworkState>, event: ConnectivityEvent) {
    let next = event.target_state();
    let changed = state.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });

    if changed {
        let label = next.to_string();
        tracing::info!(state = %label, "network status changed");
        metrics::connectivity_transitions_total
            .with_label_values(&[label.as_str()])
            .inc();
    }
}
