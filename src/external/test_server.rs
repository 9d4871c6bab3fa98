use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub(crate) const ACCEPTED_TOKEN: &str = "accepted-token";
pub(crate) const REJECTED_TOKEN: &str = "rejected-token";

pub(crate) type Inbox = Arc<Mutex<Vec<Value>>>;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub(crate) async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Bot API stand-in: records payloads sent with `ACCEPTED_TOKEN`,
/// answers 400 for `REJECTED_TOKEN`.
pub(crate) async fn telegram_api() -> (String, Inbox) {
    let inbox = Inbox::default();
    let router = Router::new()
        .route(
            &format!("/bot{ACCEPTED_TOKEN}/sendMessage"),
            post(|State(inbox): State<Inbox>, Json(body): Json<Value>| async move {
                inbox.lock().push(body);
                Json(json!({ "ok": true }))
            }),
        )
        .route(
            &format!("/bot{REJECTED_TOKEN}/sendMessage"),
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
                )
            }),
        )
        .with_state(inbox.clone());

    (spawn(router).await, inbox)
}
