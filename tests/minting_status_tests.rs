mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use nft_mint_backend::router;
use nft_mint_backend::services::address::normalize;

use crate::common::stateless_test_state;

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

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn stats_default_to_zero_before_initialization() {
    let app = router(stateless_test_state());

    let (status, body) = send(app, get("/api/minting-status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["totalSupply"], 0);
    assert_eq!(body["data"]["maxSupply"], 0);
    assert_eq!(body["data"]["totalOwners"], 0);
}

#[tokio::test]
async fn user_mint_count_rejects_malformed_address() {
    let app = router(stateless_test_state());

    let (status, body) = send(app, get("/api/minting-status/user/0x123")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn user_mint_count_ignores_address_casing() {
    let state = stateless_test_state();
    let owner = normalize("0xABCDabcd1234ABCDabcd1234ABCDabcd1234ABCD").unwrap();
    state.minting_stats.record_mint(1, &owner);
    let app = router(state);

    let (status, body) = send(
        app,
        get("/api/minting-status/user/0xABCDabcd1234ABCDabcd1234ABCDabcd1234ABCD"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["address"],
        "0xabcdabcd1234abcdabcd1234abcdabcd1234abcd"
    );
    assert_eq!(body["data"]["mintCount"], 1);
}

#[tokio::test]
async fn unknown_user_mint_count_is_zero() {
    let app = router(stateless_test_state());

    let (status, body) = send(
        app,
        get("/api/minting-status/user/0x1111111111111111111111111111111111111111"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["mintCount"], 0);
}

#[tokio::test]
async fn max_supply_update_is_validated_and_visible() {
    let state = stateless_test_state();
    let app = router(state.clone());

    let (status, _) = send(
        app.clone(),
        json_request("PUT", "/api/minting-status/max-supply", json!({"maxSupply": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        app.clone(),
        json_request("PUT", "/api/minting-status/max-supply", json!({"maxSupply": 500})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["maxSupply"], 500);

    let (_, body) = send(app, get("/api/minting-status")).await;
    assert_eq!(body["data"]["maxSupply"], 500);
}

#[tokio::test]
async fn reset_zeroes_counters_and_keeps_max_supply() {
    let state = stateless_test_state();
    state.minting_stats.set_max_supply(1000).unwrap();
    let owner = normalize("0x1111111111111111111111111111111111111111").unwrap();
    state.minting_stats.record_mint(1, &owner);
    state.minting_stats.record_mint(2, &owner);
    let app = router(state);

    let (status, body) = send(
        app,
        Request::builder()
            .method("POST")
            .uri("/api/minting-status/reset")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalSupply"], 0);
    assert_eq!(body["data"]["totalOwners"], 0);
    assert_eq!(body["data"]["maxSupply"], 1000);
    assert!(body["data"]["userMintCounts"]
        .as_object()
        .unwrap()
        .is_empty());
}
