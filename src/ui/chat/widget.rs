//! The complete chat widget.

use leptos::prelude::*;

use crate::chat::{Message, Phase};
use crate::config::WidgetConfig;
use crate::session::WidgetState;

use super::{ChatHeader, ChatInputArea, ChatMessageList};

/// Element id of the widget root; submits swap it in place.
pub const WIDGET_ID: &str = "chat-widget";

/// Owned copy of everything the widget renders.
///
/// Taken while the session lock is held so rendering happens without it.
#[derive(Debug, Clone)]
pub struct WidgetSnapshot {
    pub session_id: String,
    pub title: String,
    pub placeholder: String,
    pub draft: String,
    pub messages: Vec<Message>,
    pub awaiting: bool,
    pub queued: Vec<u64>,
}

impl WidgetSnapshot {
    #[must_use]
    pub fn capture(session_id: &str, widget: &WidgetConfig, state: &WidgetState) -> Self {
        Self {
            session_id: session_id.to_string(),
            title: widget.title.clone(),
            placeholder: widget.placeholder.clone(),
            draft: state.form.draft().to_string(),
            messages: state.form.messages().to_vec(),
            awaiting: state.form.phase() == Phase::AwaitingResponse,
            queued: state.queued().map(|o| o.seq).collect(),
        }
    }
}

/// Header, message list and input area for one session.
#[component]
pub fn ChatWidget(snapshot: WidgetSnapshot) -> impl IntoView {
    let WidgetSnapshot {
        session_id,
        title,
        placeholder,
        draft,
        messages,
        awaiting,
        queued,
    } = snapshot;

    view! {
        <div
            id=WIDGET_ID
            class="chat-widget flex flex-col h-[calc(100vh-4rem)] bg-panel border border-panelBorder rounded-2xl overflow-hidden"
            data-session-id=session_id.clone()
        >
            <ChatHeader title=title awaiting=awaiting />

            <ChatMessageList
                session_id=session_id.clone()
                messages=messages
                awaiting=awaiting
                queued=queued
            />

            <ChatInputArea session_id=session_id.clone() draft=draft placeholder=placeholder />
        </div>
    }
}
