//! Page session management.
//!
//! Every page load creates a session that owns one chat form. HTMX requests
//! from that page carry the session ID in their path.
//!
//! # Architecture
//!
//! - [`WidgetSession`]: one page's widget state behind an async lock
//! - [`SessionStore`]: thread-safe store for all active sessions
//!
//! # Example
//!
//! ```rust
//! use chat_widget::chat::ChatMode;
//! use chat_widget::session::SessionStore;
//!
//! let store = SessionStore::new(ChatMode::LocalEcho);
//! let session = store.create();
//! assert!(store.get(session.id()).is_some());
//! ```

mod thread;

pub use thread::{SessionStore, WidgetSession, WidgetState};
