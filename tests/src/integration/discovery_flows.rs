//! Moderator discovery and registration over HTTP and the bus.

use super::harness::TestNode;
use axum::http::{Method, StatusCode};
use bz_03_moderator_discovery::domain::{encode_identity, pointer_for};
use bz_03_moderator_discovery::{PeerRecord, Profile, ProfileStore};
use node_runtime::NodeConfig;
use serde_json::json;
use shared_bus::{EventFilter, MarketEvent};
use shared_types::CorrelationId;
use std::time::Duration;

fn advertise(node: &TestNode, seed: &str, addrs: Vec<String>) {
    let pointer = node.container.config.discovery.pointer.clone();
    node.container
        .pointer_lookup
        .add(&pointer, PeerRecord::new(pointer_for(seed.as_bytes()), addrs));
}

fn ipfs_addr(seed: &str) -> String {
    let value = encode_identity(&pointer_for(seed.as_bytes())).unwrap();
    format!("/ip4/192.168.1.20/tcp/4001/ipfs/{value}")
}

#[tokio::test]
async fn test_synchronous_list_skips_undecodable_records() {
    let node = TestNode::start();
    advertise(&node, "alice", vec![ipfs_addr("alice")]);
    advertise(&node, "relay", vec!["/ip4/192.168.1.21/tcp/4001".into()]);
    advertise(
        &node,
        "bob",
        vec!["/dns4/example.org/tcp/443/wss".into(), ipfs_addr("bob")],
    );

    let (status, body) = node.get("/ob/moderators").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([pointer_for(b"alice"), pointer_for(b"bob")])
    );
}

#[tokio::test]
async fn test_async_search_streams_tagged_results() {
    let node = TestNode::start();
    advertise(&node, "alice", vec![ipfs_addr("alice")]);
    advertise(&node, "carol", vec![ipfs_addr("carol")]);
    let mut all = node.container.event_bus.subscribe(EventFilter::all());

    let (status, body) = node.get("/ob/moderators?async=1").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let id = CorrelationId::parse(body["id"].as_str().unwrap()).unwrap();

    let mut pushed = Vec::new();
    loop {
        let event = tokio::time::timeout(Duration::from_secs(2), all.recv())
            .await
            .unwrap()
            .unwrap();
        match &event {
            MarketEvent::ModeratorFound { .. } => pushed.push(event.to_client_json()),
            MarketEvent::ModeratorSearchFinished { delivered, .. } => {
                assert_eq!(*delivered, 2);
                break;
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    assert_eq!(pushed.len(), 2);
    for payload in &pushed {
        assert_eq!(payload["id"], id.to_string());
    }
    let mut moderators: Vec<_> = pushed.iter().map(|p| p["moderator"].clone()).collect();
    moderators.sort_by_key(|m| m.to_string());
    let mut expected = vec![json!(pointer_for(b"alice")), json!(pointer_for(b"carol"))];
    expected.sort_by_key(|m| m.to_string());
    assert_eq!(moderators, expected);

    node.settle().await;
    assert_eq!(node.metrics.moderators_discovered.get(), 2);
}

#[tokio::test]
async fn test_results_are_bounded_by_config() {
    let mut config = NodeConfig::default();
    config.discovery.max_results = 3;
    let node = TestNode::with_config(config);
    for i in 0..6 {
        let seed = format!("mod-{i}");
        advertise(&node, &seed, vec![ipfs_addr(&seed)]);
    }

    let (_, body) = node.get("/ob/moderators").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_registration_requires_profile() {
    let node = TestNode::start();
    let info = json!({
        "description": "Art and antiques",
        "fee": {"feeType": "FIXED", "fixedFee": {"currencyCode": "USD", "amount": 500}}
    });

    let (status, body) = node
        .request(Method::PUT, "/ob/moderator", Some(info.clone()))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["reason"], "Profile does not exist. Create one first.");

    node.container
        .profiles
        .update_profile(Profile {
            peer_id: pointer_for(b"node"),
            name: "Antiques Corner".into(),
            moderator: false,
            mod_info: None,
        })
        .await
        .unwrap();

    let (status, body) = node.request(Method::PUT, "/ob/moderator", Some(info)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    let profile = node.container.profiles.current().unwrap();
    assert!(profile.moderator);
    assert_eq!(profile.mod_info.unwrap().description, "Art and antiques");

    let (status, _) = node.request(Method::DELETE, "/ob/moderator", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!node.container.profiles.current().unwrap().moderator);
}
