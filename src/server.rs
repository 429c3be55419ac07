use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{error, info, warn};

use crate::AppState;
use crate::chat::{CompletionClient, HttpBackend, Message, MessageBackend, QuestionnaireBackend};
use crate::config::{AppConfig, BackendKind};
use crate::echo;
use crate::session::{SessionStore, WidgetSession};
use crate::ui::{self, chat::WidgetSnapshot};

/// Build the shared state from configuration.
pub fn build_state(config: Arc<AppConfig>) -> anyhow::Result<AppState> {
    let backend: Arc<dyn MessageBackend> = match config.backend.kind {
        BackendKind::Http => {
            let backend = match config.backend.timeout() {
                Some(timeout) => HttpBackend::with_timeout(&config.backend.base_url, timeout)?,
                None => HttpBackend::new(&config.backend.base_url)?,
            };
            info!(
                name: "backend.config.loaded",
                kind = "http",
                endpoint = %backend.endpoint(),
                mode = ?config.widget.mode,
                "Message backend configured"
            );
            Arc::new(backend)
        }
        BackendKind::Questionnaire => {
            let summarizer = CompletionClient::new(config.summary.settings())?;
            info!(
                name: "backend.config.loaded",
                kind = "questionnaire",
                endpoint = %summarizer.endpoint(),
                model = %config.summary.model,
                mode = ?config.widget.mode,
                "Message backend configured"
            );
            Arc::new(QuestionnaireBackend::new(summarizer))
        }
    };

    Ok(AppState {
        sessions: SessionStore::new(config.widget.mode),
        backend,
        config,
    })
}

/// Build the router for the page, the widget endpoints and static assets.
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/widget/{id}/draft", post(draft_handler))
        .route("/widget/{id}/submit", post(submit_handler))
        .route("/widget/{id}/reply/{seq}", post(reply_handler))
        .route("/widget/{id}/messages", get(messages_fragment_handler))
        .route("/api/widget/{id}/messages", get(api_get_messages))
        .nest_service("/static", ServeDir::new(&config.server.static_dir))
        .with_state(state);

    let timeout_duration = Duration::from_secs(config.server.request_timeout_secs);

    app.layer(DefaultBodyLimit::max(64 * 1024))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    if config.backend.serve_echo {
        echo::spawn(&config.backend.base_url).await?;
    }

    let state = build_state(Arc::clone(&config))?;

    spawn_session_cleanup(&state);

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Periodically drop sessions idle past the configured timeout, along with
/// any conversation state the backend keeps for them.
fn spawn_session_cleanup(state: &AppState) {
    let sessions = state.sessions.clone();
    let backend = Arc::clone(&state.backend);
    let idle = state.config.session.idle_timeout();
    let mut interval = tokio::time::interval(state.config.session.cleanup_interval());

    tokio::spawn(async move {
        loop {
            interval.tick().await;
            let removed = sessions.cleanup_expired_with_timeout(idle);
            if removed.is_empty() {
                continue;
            }
            for id in &removed {
                backend.end_conversation(id);
            }
            info!(
                name: "session.expired",
                removed = removed.len(),
                remaining = sessions.len(),
                "Expired sessions removed"
            );
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Form body posted by the widget input.
#[derive(Debug, Deserialize)]
struct DraftForm {
    #[serde(default)]
    text: String,
}

/// Rejection for unknown or expired sessions.
fn session_expired() -> Response {
    (StatusCode::NOT_FOUND, Html(ui::render_session_expired())).into_response()
}

fn lookup(state: &AppState, id: &str) -> Result<WidgetSession, Response> {
    state.sessions.get(id).ok_or_else(|| {
        warn!(name: "session.unknown", session_id = %id, "Unknown session");
        session_expired()
    })
}

async fn capture(state: &AppState, session: &WidgetSession) -> WidgetSnapshot {
    let guard = session.lock().await;
    WidgetSnapshot::capture(session.id(), &state.config.widget, &guard)
}

/// GET / - Create a page session and render the full page.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let session = state.sessions.create();
    info!(name: "session.created", session_id = %session.id(), "Session created");

    let snapshot = capture(&state, &session).await;
    Html(ui::render_page(snapshot, &state.config.widget.htmx_src))
}

/// GET /health - Liveness check.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /widget/:id/draft - Input change.
async fn draft_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DraftForm>,
) -> Result<StatusCode, Response> {
    let session = lookup(&state, &id)?;
    session.lock().await.form.on_input_change(form.text);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /widget/:id/submit - Submit the draft and re-render the widget.
async fn submit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DraftForm>,
) -> Result<Html<String>, Response> {
    let session = lookup(&state, &id)?;

    let snapshot = {
        let mut guard = session.lock().await;
        guard.form.on_input_change(form.text);
        guard.submit();
        WidgetSnapshot::capture(session.id(), &state.config.widget, &guard)
    };

    Ok(Html(ui::render_widget(snapshot)))
}

/// POST /widget/:id/reply/:seq - Send a queued message and render the reply.
///
/// Each queued message is dispatched at most once; later calls for the same
/// sequence number just re-render the list. The send runs in its own task, so
/// it still completes when this request is cancelled or times out.
async fn reply_handler(
    State(state): State<AppState>,
    Path((id, seq)): Path<(String, u64)>,
) -> Result<Html<String>, Response> {
    let session = lookup(&state, &id)?;

    let outgoing = session.lock().await.take_queued(seq);
    if let Some(outgoing) = outgoing {
        let backend = Arc::clone(&state.backend);
        let task_session = session.clone();
        let task = tokio::spawn(async move {
            // The session lock is released while the request is in flight.
            let result = backend.send(task_session.id(), &outgoing.text).await;
            task_session.lock().await.form.complete(&outgoing, result);
        });
        if let Err(e) = task.await {
            error!(name: "chat.reply.task_failed", session_id = %id, seq, error = %e, "Reply task failed");
        }
    }

    let snapshot = capture(&state, &session).await;
    Ok(Html(ui::render_message_list(snapshot)))
}

/// GET /widget/:id/messages - Current message list fragment.
async fn messages_fragment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, Response> {
    let session = lookup(&state, &id)?;
    let snapshot = capture(&state, &session).await;
    Ok(Html(ui::render_message_list(snapshot)))
}

/// GET /api/widget/:id/messages - History as JSON.
async fn api_get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    let session = state.sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let messages = session.lock().await.form.messages().to_vec();
    Ok(Json(messages))
}
