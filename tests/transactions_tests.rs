mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration};
use sea_orm::Value as DbValue;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tower::ServiceExt;

use nft_mint_backend::entities::transactions;
use nft_mint_backend::router;

use crate::common::{mock_db, test_state};

const FROM: &str = "0x1111111111111111111111111111111111111111";
const TO: &str = "0x2222222222222222222222222222222222222222";
const CONTRACT: &str = "0x3333333333333333333333333333333333333333";

fn entry(id: i32, hash: &str) -> transactions::Model {
    let timestamp = DateTime::parse_from_rfc3339("2026-01-01T00:00:00+00:00").unwrap()
        + Duration::minutes(id as i64);
    transactions::Model {
        id,
        hash: hash.to_string(),
        tx_type: "mint".to_string(),
        token_id: id as i64,
        from_address: FROM.to_string(),
        to_address: TO.to_string(),
        price: None,
        status: "confirmed".to_string(),
        block_number: Some(100 + id as i64),
        gas_used: Some(21_000),
        timestamp,
        contract_address: CONTRACT.to_string(),
        created_at: timestamp,
    }
}

fn count_row(total: i64) -> BTreeMap<&'static str, DbValue> {
    BTreeMap::from([("num_items", DbValue::from(total))])
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn valid_payload() -> Value {
    json!({
        "hash": "0xhash1",
        "type": "mint",
        "tokenId": 1,
        "from": FROM,
        "to": TO,
        "contractAddress": CONTRACT
    })
}

#[tokio::test]
async fn create_transaction_stores_and_returns_entry() {
    let db = mock_db()
        .append_query_results([Vec::<transactions::Model>::new()])
        .append_query_results([vec![entry(1, "0xhash1")]])
        .into_connection();
    let app = router(test_state(db));

    let (status, body) = send(app, post_json("/api/transactions", valid_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["hash"], "0xhash1");
    assert_eq!(body["data"]["type"], "mint");
}

#[tokio::test]
async fn duplicate_hash_is_rejected() {
    let db = mock_db()
        .append_query_results([vec![entry(1, "0xhash1")]])
        .into_connection();
    let app = router(test_state(db));

    let (status, body) = send(app, post_json("/api/transactions", valid_payload())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn create_transaction_rejects_malformed_address() {
    let mut payload = valid_payload();
    payload["from"] = json!("0x123");
    let app = router(test_state(mock_db().into_connection()));

    let (status, _) = send(app, post_json("/api/transactions", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_transaction_rejects_unknown_type() {
    let mut payload = valid_payload();
    payload["type"] = json!("airdrop");
    let app = router(test_state(mock_db().into_connection()));

    let response = app
        .oneshot(post_json("/api/transactions", payload))
        .await
        .unwrap();
    // Serde rejects the enum value before the handler runs
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_transaction_by_hash() {
    let db = mock_db()
        .append_query_results([vec![entry(1, "0xhash1")]])
        .into_connection();
    let app = router(test_state(db));

    let (status, body) = send(app, get("/api/transactions/0xhash1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["hash"], "0xhash1");
    assert_eq!(body["data"]["from"], FROM);
}

#[tokio::test]
async fn missing_transaction_returns_not_found() {
    let db = mock_db()
        .append_query_results([Vec::<transactions::Model>::new()])
        .into_connection();
    let app = router(test_state(db));

    let (status, body) = send(app, get("/api/transactions/0xmissing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn first_page_carries_pagination_metadata() {
    let page: Vec<transactions::Model> = (0..10)
        .map(|i| entry(25 - i, &format!("0xhash{}", 25 - i)))
        .collect();
    let db = mock_db()
        .append_query_results([vec![count_row(25)]])
        .append_query_results([page])
        .into_connection();
    let app = router(test_state(db));

    let (status, body) = send(app, get("/api/transactions?page=1&limit=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["total"], 25);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["pages"], 3);
    assert_eq!(body["pagination"]["limit"], 10);
    // Newest first
    assert_eq!(body["data"][0]["hash"], "0xhash25");
}

#[tokio::test]
async fn last_page_holds_the_remainder() {
    let page: Vec<transactions::Model> = (1..=5)
        .map(|i| entry(i, &format!("0xhash{}", i)))
        .collect();
    let db = mock_db()
        .append_query_results([vec![count_row(25)]])
        .append_query_results([page])
        .into_connection();
    let app = router(test_state(db));

    let (status, body) = send(app, get("/api/transactions?page=3&limit=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["total"], 25);
    assert_eq!(body["pagination"]["pages"], 3);
}

#[tokio::test]
async fn list_rejects_malformed_address_filter() {
    let app = router(test_state(mock_db().into_connection()));

    let (status, _) = send(app, get("/api/transactions?address=nope")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
