//! `BinanceP2pClient` against the mock exchange.

use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;

use p2p_watch::exchange::binance::BinanceP2pClient;
use p2p_watch::exchange::{FetchError, OfferSource};
use p2p_watch::types::{Crypto, Fiat, OfferRequest, TradeQuestionAnswers, TradeType};

use crate::mock_exchange::{envelope, offer_json, refused_endpoint, MockExchange};

fn request() -> OfferRequest {
    let answers = TradeQuestionAnswers {
        crypto: Crypto::USDT,
        fiat: Fiat::THB,
        trade_type: TradeType::Buy,
        trans_amount: "1000".to_string(),
    };
    OfferRequest::from_answers(&answers, 20)
}

fn client(endpoint: &str) -> BinanceP2pClient {
    BinanceP2pClient::new(endpoint, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_decodes_offers_and_sends_expected_request() {
    let exchange = MockExchange::start(vec![(
        StatusCode::OK,
        envelope(vec![
            offer_json("35.10", 0.9, "alice", "u1"),
            offer_json("35.00", 1.0, "bob", "u2"),
        ]),
    )])
    .await;

    let resp = client(&exchange.endpoint()).fetch_offers(&request()).await.unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.data[0].advertiser.nick_name, "alice");
    assert_eq!(resp.data[1].adv.price, "35.00");

    let recorded = exchange.requests();
    assert_eq!(recorded.len(), 1);
    assert_eq!(
        recorded[0].body,
        json!({
            "page": 1,
            "rows": 20,
            "asset": "USDT",
            "tradeType": "Buy",
            "fiat": "THB",
            "transAmount": "1000"
        })
    );
    assert_eq!(recorded[0].cache_control.as_deref(), Some("no-cache"));
    assert_eq!(recorded[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_error_status_with_envelope_is_api_error() {
    let body = json!({"code": "083999", "message": "illegal parameter", "data": null, "success": false});
    let exchange = MockExchange::start(vec![(StatusCode::BAD_REQUEST, body.to_string())]).await;

    let err = client(&exchange.endpoint()).fetch_offers(&request()).await.unwrap_err();
    match err {
        FetchError::Api { status, body, .. } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.data.is_empty());
            assert_eq!(body.message.as_deref(), Some("illegal parameter"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_with_garbage_body_is_empty_api_error() {
    let exchange =
        MockExchange::start(vec![(StatusCode::TOO_MANY_REQUESTS, "slow down".to_string())]).await;

    let err = client(&exchange.endpoint()).fetch_offers(&request()).await.unwrap_err();
    match err {
        FetchError::Api { status, body, raw } => {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            assert!(body.data.is_empty());
            assert_eq!(raw, "slow down");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_success_status_with_garbage_body_is_decode_error() {
    let exchange = MockExchange::start(vec![(StatusCode::OK, "<html></html>".to_string())]).await;

    let err = client(&exchange.endpoint()).fetch_offers(&request()).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { status, .. } if status == StatusCode::OK));
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let err = client(&refused_endpoint()).fetch_offers(&request()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
