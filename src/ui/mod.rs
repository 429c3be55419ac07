//! Server-rendered UI.
//!
//! Leptos components are rendered to HTML strings on each request; HTMX in
//! the browser swaps the returned fragments into the page.
//!
//! # Structure
//!
//! - [`app`]: the page document
//! - [`chat`]: widget components (header, message list, input area)
//! - [`components`]: small reusable building blocks

pub mod app;
pub mod chat;
pub mod components;

use leptos::prelude::*;

use app::{ChatPage, SessionExpired};
use chat::{ChatMessageList, ChatStatus, ChatWidget, WidgetSnapshot};

/// Render a view to an HTML string inside a fresh reactive owner.
fn render<F, V>(build: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView + 'static,
{
    Owner::new().with(|| build().to_html())
}

/// Full page for a freshly created session.
#[must_use]
pub fn render_page(snapshot: WidgetSnapshot, htmx_src: &str) -> String {
    let htmx_src = htmx_src.to_string();
    let body = render(move || view! { <ChatPage snapshot=snapshot htmx_src=htmx_src /> });
    format!("<!DOCTYPE html>{body}")
}

/// The whole widget, returned after a submit.
#[must_use]
pub fn render_widget(snapshot: WidgetSnapshot) -> String {
    render(move || view! { <ChatWidget snapshot=snapshot /> })
}

/// Message list plus an out-of-band status badge, returned after a reply.
#[must_use]
pub fn render_message_list(snapshot: WidgetSnapshot) -> String {
    let WidgetSnapshot {
        session_id,
        messages,
        awaiting,
        queued,
        ..
    } = snapshot;

    render(move || {
        view! {
            <ChatMessageList
                session_id=session_id
                messages=messages
                awaiting=awaiting
                queued=queued
            />
            <ChatStatus awaiting=awaiting oob=true />
        }
    })
}

/// Fragment for unknown sessions.
#[must_use]
pub fn render_session_expired() -> String {
    render(|| view! { <SessionExpired /> })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Message;

    fn snapshot(messages: Vec<Message>) -> WidgetSnapshot {
        WidgetSnapshot {
            session_id: "abc".to_string(),
            title: "Friendly Music AI".to_string(),
            placeholder: "Type your message...".to_string(),
            draft: String::new(),
            messages,
            awaiting: false,
            queued: Vec::new(),
        }
    }

    #[test]
    fn test_rows_follow_history_order() {
        let html = render_widget(snapshot(vec![
            Message::user("first"),
            Message::backend("second"),
            Message::user("third"),
        ]));

        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        let third = html.find("third").unwrap();
        assert!(first < second && second < third);

        assert_eq!(html.matches(r#"data-sender="user""#).count(), 2);
        assert_eq!(html.matches(r#"data-sender="backend""#).count(), 1);
        assert!(html.contains(r#"class="message backend""#));
        assert!(!html.contains("empty-state"));
    }

    #[test]
    fn test_empty_history_shows_hint() {
        let html = render_widget(snapshot(Vec::new()));
        assert!(html.contains("empty-state"));
        assert!(!html.contains("data-sender"));
    }

    #[test]
    fn test_custom_sender_tags_row() {
        let html = render_widget(snapshot(vec![Message::new("narrator", "once upon a time")]));
        assert!(html.contains(r#"class="message narrator""#));
        assert!(html.contains(r#"data-sender="narrator""#));
    }

    #[test]
    fn test_message_text_is_escaped() {
        let html = render_widget(snapshot(vec![Message::user("<b>bold</b>")]));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_widget_wires_session_endpoints() {
        let html = render_widget(snapshot(Vec::new()));
        assert!(html.contains(r#"id="chat-widget""#));
        assert!(html.contains(r#"hx-post="/widget/abc/submit""#));
        assert!(html.contains(r#"hx-post="/widget/abc/draft""#));
        assert!(html.contains(r#"placeholder="Type your message...""#));
    }

    #[test]
    fn test_queued_replies_render_triggers() {
        let mut snap = snapshot(vec![Message::user("hi")]);
        snap.awaiting = true;
        snap.queued = vec![1];

        let html = render_message_list(snap);
        assert!(html.contains(r#"hx-post="/widget/abc/reply/1""#));
        assert!(html.contains(r#"hx-trigger="load""#));
        assert!(html.contains("typing-indicator"));
        assert!(html.contains(r#"hx-get="/widget/abc/messages""#));
        assert!(html.contains(r#"hx-swap-oob="true""#));
        assert!(html.contains("Waiting"));
    }

    #[test]
    fn test_idle_list_has_no_indicator() {
        let html = render_message_list(snapshot(vec![Message::user("hi"), Message::backend("hello")]));
        assert!(!html.contains("typing-indicator"));
        assert!(!html.contains("reply-trigger"));
        assert!(!html.contains("hx-get"));
        assert!(html.contains("Ready"));
    }

    #[test]
    fn test_page_is_a_document() {
        let html = render_page(snapshot(Vec::new()), "/static/htmx.min.js");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title"));
        assert!(html.contains("Friendly Music AI"));
        assert!(html.contains(r#"src="/static/htmx.min.js""#));
    }
}
