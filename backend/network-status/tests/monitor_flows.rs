#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::{sync::Arc, time::Duration};

use common_enums::{ConnectivityEvent, ErrorClassification, NetworkState};
use network_status::{pump_events, ErrorRedirect, NetworkStatusMonitor, PushEnvironment};
use tokio::sync::mpsc;

fn attached(online: bool) -> (Arc<PushEnvironment>, NetworkStatusMonitor<PushEnvironment>) {
    let environment = Arc::new(PushEnvironment::new(online));
    let monitor = NetworkStatusMonitor::new(Arc::clone(&environment));
    (environment, monitor)
}

#[test]
fn online_offline_online_round_trip() {
    let (environment, monitor) = attached(true);
    assert_eq!(monitor.status(), NetworkState::Online);

    environment.go_offline();
    assert_eq!(monitor.status(), NetworkState::Offline);

    environment.go_online();
    assert_eq!(monitor.status(), NetworkState::Online);
}

#[test]
fn guard_while_offline_redirects_exactly_once() {
    let (environment, monitor) = attached(true);
    environment.go_offline();

    let mut redirects: Vec<ErrorRedirect> = Vec::new();
    let allowed = monitor.guard(|redirect| redirects.push(redirect));

    assert!(!allowed);
    assert_eq!(redirects.len(), 1);
    assert_eq!(redirects[0].classification, ErrorClassification::Network);
    assert_eq!(redirects[0].redirect_path(), "/error?type=network");
}

#[test]
fn guard_while_online_never_redirects() {
    let (_environment, monitor) = attached(true);

    let mut invoked = false;
    let allowed = monitor.guard(|_| invoked = true);

    assert!(allowed);
    assert!(!invoked);
}

#[test]
fn guard_reflects_initial_offline_state() {
    let (_environment, monitor) = attached(false);

    let mut invoked = 0;
    assert!(!monitor.guard(|_| invoked += 1));
    assert_eq!(invoked, 1);
}

#[test]
fn events_after_teardown_have_no_effect() {
    let (environment, monitor) = attached(true);

    monitor.teardown();
    environment.go_offline();

    assert_eq!(monitor.status(), NetworkState::Online);
    assert!(monitor.guard(|_| panic!("guard must not redirect")));
}

#[test]
fn teardown_before_any_event_is_safe() {
    let (environment, monitor) = attached(false);

    monitor.teardown();

    assert_eq!(monitor.status(), NetworkState::Offline);
    assert_eq!(
        environment.listener_count(ConnectivityEvent::BecameReachable),
        0
    );
    assert_eq!(
        environment.listener_count(ConnectivityEvent::BecameUnreachable),
        0
    );
}

#[test]
fn dropping_the_monitor_detaches_listeners() {
    let (environment, monitor) = attached(true);
    assert_eq!(
        environment.listener_count(ConnectivityEvent::BecameUnreachable),
        1
    );

    drop(monitor);

    assert_eq!(
        environment.listener_count(ConnectivityEvent::BecameReachable),
        0
    );
    assert_eq!(
        environment.listener_count(ConnectivityEvent::BecameUnreachable),
        0
    );
}

#[test]
fn independent_monitors_share_one_environment() {
    let environment = Arc::new(PushEnvironment::new(true));
    let first = NetworkStatusMonitor::new(Arc::clone(&environment));
    let second = NetworkStatusMonitor::new(Arc::clone(&environment));

    first.teardown();
    environment.go_offline();

    assert_eq!(first.status(), NetworkState::Online);
    assert_eq!(second.status(), NetworkState::Offline);
}

#[tokio::test]
async fn watchers_observe_events_pumped_from_a_channel() {
    let (environment, monitor) = attached(true);
    let mut receiver = monitor.watch();
    let (tx, rx) = mpsc::channel(8);
    let pump = tokio::spawn(pump_events(Arc::clone(&environment), rx));

    tx.send(ConnectivityEvent::BecameUnreachable).await.unwrap();
    tokio::time::timeout(Duration::from_secs(1), receiver.changed())
        .await
        .expect("state change not observed")
        .unwrap();
    assert_eq!(*receiver.borrow_and_update(), NetworkState::Offline);

    tx.send(ConnectivityEvent::BecameReachable).await.unwrap();
    tokio::time::timeout(Duration::from_secs(1), receiver.changed())
        .await
        .expect("state change not observed")
        .unwrap();
    assert_eq!(*receiver.borrow_and_update(), NetworkState::Online);

    drop(tx);
    pump.await.unwrap();
}
