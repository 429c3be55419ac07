//! Dummy message backend for local development.
//!
//! Answers `POST /message` by acknowledging the text it received. Useful for
//! exercising the networked widget without a real service behind it. It runs
//! on its own listener, at the address the widget's backend URL points to.

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use url::Url;

use crate::chat::{MessageReply, MessageRequest};

/// Router with `GET /` and `POST /message`, CORS open to any origin.
pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/message", post(send_message))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind the host and port of `base_url` and serve [`router`] there in the
/// background. Returns the bound address (useful when the port is 0).
pub async fn spawn(base_url: &str) -> anyhow::Result<SocketAddr> {
    let url = Url::parse(base_url).with_context(|| format!("Invalid backend URL: {base_url}"))?;
    let host = url
        .host_str()
        .with_context(|| format!("Backend URL has no host: {base_url}"))?;
    let port = url
        .port_or_known_default()
        .with_context(|| format!("Backend URL has no port: {base_url}"))?;

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind echo backend on {host}:{port}"))?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router().into_make_service()).await {
            error!(name: "echo.stopped", error = %e, "Echo backend stopped");
        }
    });

    info!(name: "echo.started", address = %addr, "Echo backend listening");
    Ok(addr)
}

/// GET / - Liveness greeting.
async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello, World!" }))
}

/// POST /message - Acknowledge the received text.
async fn send_message(Json(req): Json<MessageRequest>) -> Json<MessageReply> {
    tracing::debug!(name: "echo.message.received", len = req.text.len(), "Echoing message");
    Json(MessageReply {
        message: format!("Message received: {}", req.text),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_echo_message() {
        let response = router()
            .oneshot(
                Request::post("/message")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"text":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let reply: MessageReply = serde_json::from_slice(&body).unwrap();
        assert_eq!(reply.message, "Message received: hi");
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let response = router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "Hello, World!");
    }

    #[tokio::test]
    async fn test_missing_text_is_rejected() {
        let response = router()
            .oneshot(
                Request::post("/message")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_spawn_serves_on_base_url_address() {
        let addr = spawn("http://127.0.0.1:0").await.unwrap();
        assert_ne!(addr.port(), 0);

        let reply: MessageReply = reqwest::Client::new()
            .post(format!("http://{addr}/message"))
            .json(&MessageRequest {
                text: "over the wire".to_string(),
            })
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(reply.message, "Message received: over the wire");
    }

    #[tokio::test]
    async fn test_spawn_rejects_url_without_host() {
        assert!(spawn("unix:/tmp/socket").await.is_err());
    }
}
