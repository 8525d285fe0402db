//! Order and dispute scenarios over HTTP.

use super::harness::TestNode;
use bz_02_order_gateway::{CaseRecord, LedgerEntry, OrderRecord};
use serde_json::json;
use shared_bus::{EventFilter, EventTopic, MarketEvent};
use shared_types::{Contract, OrderId, OrderState, PaymentMethod, Side};
use axum::http::StatusCode;
use std::time::Duration;

fn moderated() -> Contract {
    Contract::new(PaymentMethod::Moderated)
}

fn rating(slug: &str) -> serde_json::Value {
    json!({
        "slug": slug,
        "overall": 5,
        "quality": 4,
        "description": 5,
        "deliverySpeed": 3,
        "customerService": 5,
        "review": "Arrived quickly"
    })
}

// =============================================================================
// CONFIRMATION
// =============================================================================

#[tokio::test]
async fn test_vendor_confirms_funded_order() {
    let node = TestNode::start();
    node.container
        .sales
        .insert(OrderRecord::new("QmOrder1", moderated(), OrderState::Pending).funded(true));
    let mut orders = node
        .container
        .event_bus
        .subscribe(EventFilter::topics(vec![EventTopic::Orders]));

    let (status, body) = node
        .post("/ob/orderconfirmation", json!({"orderId": "QmOrder1", "reject": false}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let event = tokio::time::timeout(Duration::from_secs(1), orders.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        event,
        MarketEvent::OrderTransitioned {
            order_id: OrderId::new("QmOrder1"),
            side: Side::Sale,
            from: OrderState::Pending,
            to: OrderState::Confirmed,
        }
    );
    assert_eq!(
        node.container.ledger.entries(),
        vec![LedgerEntry::Confirmed(OrderId::new("QmOrder1"))]
    );

    node.settle().await;
    assert_eq!(
        node.metrics
            .order_transitions
            .with_label_values(&["CONFIRMED"])
            .get(),
        1
    );
}

#[tokio::test]
async fn test_unfunded_confirmation_is_refused() {
    let node = TestNode::start();
    node.container
        .sales
        .insert(OrderRecord::new("QmOrder2", moderated(), OrderState::Pending));

    let (status, body) = node
        .post("/ob/orderconfirmation", json!({"orderId": "QmOrder2"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let stored = node.container.sales.get(&OrderId::new("QmOrder2")).unwrap();
    assert_eq!(stored.state, OrderState::Pending);
    assert!(node.container.ledger.entries().is_empty());
}

#[tokio::test]
async fn test_vendor_rejects_then_cannot_confirm() {
    let node = TestNode::start();
    node.container
        .sales
        .insert(OrderRecord::new("QmOrder3", moderated(), OrderState::Pending).funded(true));

    let (status, _) = node
        .post("/ob/orderconfirmation", json!({"orderId": "QmOrder3", "reject": true}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = node
        .post("/ob/orderconfirmation", json!({"orderId": "QmOrder3"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "order has already been confirmed");
    assert_eq!(
        node.container.sales.get(&OrderId::new("QmOrder3")).unwrap().state,
        OrderState::Rejected
    );
}

// =============================================================================
// DISPUTES
// =============================================================================

#[tokio::test]
async fn test_vendor_dispute_through_release() {
    let node = TestNode::start();
    node.container.sales.insert(
        OrderRecord::new("QmOrder4", moderated(), OrderState::Funded)
            .funded(true)
            .with_transaction("fund-1", 10_000),
    );

    let (status, _) = node
        .post(
            "/ob/orderfulfillment",
            json!({"orderId": "QmOrder4", "note": "Shipped via post"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = node
        .post(
            "/ob/opendispute",
            json!({"orderId": "QmOrder4", "claim": "Buyer stopped responding"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, case) = node.get("/ob/case/QmOrder4").await;
    assert_eq!(case["buyerOpened"], false);
    assert!(case["vendorContract"].is_object());
    assert!(case["buyerContract"].is_null());

    let (status, _) = node
        .post(
            "/ob/closedispute",
            json!({
                "orderId": "QmOrder4",
                "resolution": "Vendor shipped on time",
                "buyerPercentage": 25.0,
                "vendorPercentage": 75.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = node
        .post("/ob/releasefunds", json!({"orderId": "QmOrder4"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, order) = node.get("/ob/order/QmOrder4").await;
    assert_eq!(order["state"], "RESOLVED");

    let entries = node.container.ledger.entries();
    assert!(entries.contains(&LedgerEntry::FundsReleased {
        order_id: OrderId::new("QmOrder4"),
        to_buyer: 2_500,
        to_vendor: 7_500,
    }));

    node.settle().await;
    for state in ["FULFILLED", "DISPUTED", "DECIDED", "RESOLVED"] {
        assert_eq!(
            node.metrics
                .order_transitions
                .with_label_values(&[state])
                .get(),
            1,
            "{state}"
        );
    }
}

#[tokio::test]
async fn test_moderator_decides_case_without_local_order() {
    let node = TestNode::start();
    node.container.cases.insert(CaseRecord::open(
        OrderId::new("QmOrder5"),
        Side::Purchase,
        moderated(),
        "Never arrived".into(),
        chrono::Utc::now(),
    ));

    let (status, _) = node
        .post(
            "/ob/closedispute",
            json!({
                "orderId": "QmOrder5",
                "resolution": "Refund the buyer",
                "buyerPercentage": 100.0,
                "vendorPercentage": 0.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let case = node.container.cases.get(&OrderId::new("QmOrder5")).unwrap();
    assert_eq!(case.state, OrderState::Decided);
    assert_eq!(case.resolution.unwrap().resolution, "Refund the buyer");

    let (status, _) = node.get("/ob/order/QmOrder5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_direct_payment_cannot_be_disputed() {
    let node = TestNode::start();
    node.container.purchases.insert(
        OrderRecord::new("QmOrder6", Contract::new(PaymentMethod::Direct), OrderState::Fulfilled)
            .funded(true),
    );

    let (status, body) = node
        .post("/ob/opendispute", json!({"orderId": "QmOrder6", "claim": "broken"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "Only moderated orders can be disputed");
}

#[tokio::test]
async fn test_missing_case() {
    let node = TestNode::start();
    let (status, body) = node.get("/ob/case/QmUnknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "reason": "case not found"}));
}

// =============================================================================
// COMPLETION
// =============================================================================

#[tokio::test]
async fn test_buyer_completes_with_ratings() {
    let node = TestNode::start();
    node.container
        .purchases
        .insert(OrderRecord::new("QmOrder7", moderated(), OrderState::Fulfilled).funded(true));

    let (status, _) = node
        .post(
            "/ob/ordercompletion",
            json!({"orderId": "QmOrder7", "ratings": [rating("lamp"), rating("shade")]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        node.container.purchases.get(&OrderId::new("QmOrder7")).unwrap().state,
        OrderState::Completed
    );
    assert_eq!(
        node.container.ledger.entries(),
        vec![LedgerEntry::Completed {
            order_id: OrderId::new("QmOrder7"),
            ratings: 2,
        }]
    );
}

#[tokio::test]
async fn test_review_too_long_is_rejected() {
    let node = TestNode::start();
    node.container
        .purchases
        .insert(OrderRecord::new("QmOrder8", moderated(), OrderState::Fulfilled).funded(true));

    let mut long = rating("lamp");
    long["review"] = json!("x".repeat(3001));

    let (status, _) = node
        .post("/ob/ordercompletion", json!({"orderId": "QmOrder8", "ratings": [long]}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(node.container.ledger.entries().is_empty());
}
