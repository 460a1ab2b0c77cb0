//! Connectivity tracking for checkout clients.
//!
//! The host runtime owns the actual reachability signal. It is consumed through
//! [`ConnectivityEnvironment`]: a synchronous "is the network reachable" query plus two
//! subscribable event channels. [`NetworkStatusMonitor`] mirrors that signal into a two-state
//! machine and guards navigation while offline.

pub mod environment;
pub mod monitor;
pub mod push;

pub use environment::{ConnectivityEnvironment, Listener, ListenerId, ListenerRegistry};
pub use monitor::{ErrorRedirect, NetworkStatusMonitor};
pub use push::{pump_events, PushEnvironment};
