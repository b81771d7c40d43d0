//! Tests for the existence gate.

mod test_utils;

use chrono::Utc;
use glean_batch::{BatchErrorKind, ExistenceGate};
use glean_core::{MediaObject, RunOptions, sidecar_key};
use std::sync::Arc;
use test_utils::{EventLog, FaultyStore, bucket};

fn object(key: &str) -> MediaObject {
    MediaObject::new(key, 1, Utc::now())
}

#[tokio::test]
async fn test_missing_sidecar_means_process() {
    let store = Arc::new(FaultyStore::new(bucket(&["a.jpg"]).await, EventLog::default()));
    let gate = ExistenceGate::new(store.clone());

    assert!(
        gate.should_process(&object("a.jpg"), &RunOptions::default())
            .await
            .unwrap()
    );
    assert_eq!(store.head_calls(), 1);
}

#[tokio::test]
async fn test_existing_sidecar_means_skip() {
    let inner = bucket(&["a.jpg", sidecar_key("a.jpg").as_str()]).await;
    let gate = ExistenceGate::new(Arc::new(FaultyStore::new(inner, EventLog::default())));

    assert!(
        !gate
            .should_process(&object("a.jpg"), &RunOptions::default())
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_force_never_probes() {
    let inner = bucket(&["a.jpg", sidecar_key("a.jpg").as_str()]).await;
    let store = Arc::new(
        FaultyStore::new(inner, EventLog::default()).failing_head_for(&[sidecar_key("a.jpg").as_str()]),
    );
    let gate = ExistenceGate::new(store.clone());

    assert!(
        gate.should_process(&object("a.jpg"), &RunOptions::forced())
            .await
            .unwrap()
    );
    assert_eq!(store.head_calls(), 0);
}

#[tokio::test]
async fn test_probe_failure_is_distinguishable() {
    let store = Arc::new(
        FaultyStore::new(bucket(&["a.jpg"]).await, EventLog::default())
            .failing_head_for(&[sidecar_key("a.jpg").as_str()]),
    );
    let gate = ExistenceGate::new(store);

    let err = gate
        .should_process(&object("a.jpg"), &RunOptions::default())
        .await
        .unwrap_err();

    match err.kind() {
        BatchErrorKind::ExistenceProbe { key, .. } => assert_eq!(key, "a.jpg"),
        other => panic!("unexpected error kind: {other}"),
    }
    assert!(!err.is_fatal());
}
