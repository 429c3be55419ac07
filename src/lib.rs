//! Chat widget
//!
//! A minimal browser chat widget: a text input, a submit button and a
//! scrolling list of messages. Submitted text is appended immediately and,
//! in networked mode, posted to a remote endpoint whose reply is appended
//! when it arrives.
//!
//! # Architecture
//!
//! - **Chat**: message model, form controller and the outbound endpoint
//! - **UI**: Leptos SSR components, wired in the browser with HTMX
//! - **Server**: Axum routes serving the page and the widget endpoints
//! - **Sessions**: one widget state per page load
//!
//! # Modules
//!
//! - [`chat`]: `Message`, `ChatForm`, `MessageBackend`
//! - [`ui`]: widget components and render helpers
//! - [`session`]: page sessions
//! - [`server`]: router and server startup
//! - [`echo`]: dummy `/message` backend
//! - [`config`]: layered configuration

pub mod chat;
pub mod config;
pub mod echo;
pub mod server;
pub mod session;
pub mod ui;

use std::sync::Arc;

use crate::chat::MessageBackend;
use crate::config::AppConfig;
use crate::session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Page sessions.
    pub sessions: SessionStore,
    /// Endpoint that answers submitted messages.
    pub backend: Arc<dyn MessageBackend>,
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
}
