//! Mock P2P exchange for integration testing.
//!
//! Serves the offer search route from a queue of canned responses and
//! records every request body and its headers. When the queue runs dry
//! the last response is repeated.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const SEARCH_PATH: &str = "/bapi/c2c/v2/friendly/c2c/adv/search";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: Value,
    pub cache_control: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone, Default)]
struct MockState {
    responses: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    last: Arc<Mutex<Option<(StatusCode, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn search_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
        cache_control: header_str(header::CACHE_CONTROL),
        content_type: header_str(header::CONTENT_TYPE),
    });

    let next = state.responses.lock().unwrap().pop_front();
    let (status, text) = match next {
        Some(resp) => {
            *state.last.lock().unwrap() = Some(resp.clone());
            resp
        }
        None => state
            .last
            .lock()
            .unwrap()
            .clone()
            .unwrap_or((StatusCode::SERVICE_UNAVAILABLE, String::new())),
    };
    (status, [(header::CONTENT_TYPE, "application/json")], text)
}

pub struct MockExchange {
    addr: SocketAddr,
    state: MockState,
}

impl MockExchange {
    /// Start serving the given responses on an ephemeral port.
    pub async fn start(responses: Vec<(StatusCode, String)>) -> Self {
        let state = MockState {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..Default::default()
        };

        let app = Router::new()
            .route(SEARCH_PATH, post(search_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// An endpoint nothing listens on, so connections are refused.
pub fn refused_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn offer_json(price: &str, finish_rate: f64, nick: &str, user_no: &str) -> Value {
    json!({
        "adv": {
            "price": price,
            "surplusAmount": "2500.5",
            "tradeType": "SELL",
            "asset": "USDT",
            "fiatUnit": "THB"
        },
        "advertiser": {
            "nickName": nick,
            "userNo": user_no,
            "monthOrderCount": 1234,
            "monthFinishRate": finish_rate,
            "userType": "user"
        }
    })
}

pub fn envelope(offers: Vec<Value>) -> String {
    let total = offers.len();
    json!({
        "code": "000000",
        "message": null,
        "messageDetail": null,
        "data": offers,
        "total": total,
        "success": true
    })
    .to_string()
}
