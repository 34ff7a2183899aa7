// Mock brand API shared by the integration tests, bootstrapped once per test binary.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, Method, StatusCode, header},
    response::IntoResponse,
    routing::{any, get, post},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, OnceLock},
    time::Duration,
};

pub const EMAIL: &str = "brand@example.com";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "tok-123";

// Global base URL used by all tests after the mock publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str())
}

fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized" })),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> axum::response::Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        return Json(json!({ "token": TOKEN })).into_response();
    }
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "bad credentials" })),
    )
        .into_response()
}

async fn echo_headers(method: Method, headers: HeaderMap) -> Json<Value> {
    let read = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "method": method.as_str(),
        "authorization": read(header::AUTHORIZATION),
        "content_type": read(header::CONTENT_TYPE),
    }))
}

// Sends the raw request body straight back.
async fn echo_body(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], body)
}

async fn redemptions(headers: HeaderMap) -> axum::response::Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "totals": {
            "totalRedemptions": 40,
            "activeTokens": 12,
            "expiredTokens": 3,
            "redemptionRate": 0.25
        },
        "redemptionsByReward": [{ "reward_name": "Free drink", "count": 30 }],
        "redemptionsByPartner": [{ "partner_name": "Kiosk", "redemptions": 10 }]
    }))
    .into_response()
}

async fn traceability(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> axum::response::Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    // A date window narrows the data down to a single quiet day.
    if query.contains_key("from") || query.contains_key("to") {
        return Json(json!({
            "totalScans": 4,
            "validatedScans": 4,
            "ecoPointsIssued": 40,
            "redemptions": 0,
            "redemptionRate": 0.0,
            "geoBreakdown": []
        }))
        .into_response();
    }
    Json(json!({
        "totalScans": 160,
        "validatedScans": 150,
        "ecoPointsIssued": 1500,
        "redemptions": 40,
        "redemptionRate": 0.2667,
        "uniqueConsumers": 20,
        "avgUnitsPerConsumer": 7.5,
        "perProduct": [{ "product_id": "p1", "product_name": "Can 330ml", "units_recycled": 150 }],
        "dailyTrend": [{ "date": "2026-02-05", "units": 14 }],
        "geoBreakdown": [{ "city": "Málaga", "units": 150, "consumers": 20 }]
    }))
    .into_response()
}

fn app() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route(
            "/auth/login-without-token",
            post(|| async { Json(json!({ "ok": true })) }),
        )
        .route("/echo/headers", any(echo_headers))
        .route("/echo/body", post(echo_body))
        .route("/empty", get(|| async { StatusCode::OK }))
        .route("/no-content", get(|| async { StatusCode::NO_CONTENT }))
        .route("/plain-ok", get(|| async { "definitely not json" }))
        .route(
            "/broken",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "<html>upstream exploded</html>",
                )
            }),
        )
        .route(
            "/empty-error",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route("/brand/reports/redemptions", get(redemptions))
        .route("/brand/reports/traceability", get(traceability))
}

// Ensure the mock API is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // The mock API runs on its own thread and runtime, shared by every test in the binary.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Ephemeral port; the bound address is published once the listener is up.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                axum::serve(listener, app()).await.expect("mock server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Poll until the mock brand API accepts connections.
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("mock server did not become ready in time");
}

// Unique session file path under the OS temp dir.
pub fn temp_session_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("brand_dashboard-test-{}", uuid::Uuid::new_v4()))
        .join("session.json")
}
