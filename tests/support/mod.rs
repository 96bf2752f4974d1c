// Fake Graph API hosted on an ephemeral port for transport-level tests.
use std::{collections::HashMap, time::Duration};

use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
use serde_json::{Value, json};

pub const VALID_TOKEN: &str = "valid-token";
pub const SLOW_TOKEN: &str = "slow-token";

// Start the fake server inside the current test runtime and return its base URL.
pub async fn spawn_graph() -> String {
    let app = Router::new().route("/v2.5/me", get(me));

    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake graph failed");
    });

    format!("http://{addr}")
}

// Base URL of a port nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{addr}")
}

async fn me(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    match params.get("access_token").map(String::as_str) {
        Some(VALID_TOKEN) => (StatusCode::OK, Json(json!({ "id": "42", "name": "Pilot" }))),
        Some(SLOW_TOKEN) => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            (StatusCode::OK, Json(json!({ "id": "43" })))
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": {
                    "message": "Invalid OAuth access token.",
                    "type": "OAuthException",
                    "code": 190
                }
            })),
        ),
    }
}
