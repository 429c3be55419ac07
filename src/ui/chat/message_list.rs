//! Chat message list component.

use leptos::prelude::*;

use crate::chat::{Message, Sender};
use crate::ui::components::{BotIcon, LoaderIcon, ScrollArea, UserIcon};

/// Element id of the message list; reply requests swap it in place.
pub const MESSAGE_LIST_ID: &str = "chat-messages";

/// Ordered list of messages, one row per message.
///
/// Each queued reply renders a hidden element that fires its reply request
/// as soon as it is loaded into the page. While a reply is outstanding the
/// typing indicator polls the list, so replies that finish after their
/// request was cut off still show up.
#[component]
pub fn ChatMessageList(
    /// Session the list belongs to.
    session_id: String,
    /// History in insertion order.
    messages: Vec<Message>,
    /// Whether a reply is still outstanding.
    #[prop(default = false)]
    awaiting: bool,
    /// Sequence numbers of replies the page still has to request.
    #[prop(default = Vec::new())]
    queued: Vec<u64>,
) -> impl IntoView {
    let empty = messages.is_empty();
    let poll_url = format!("/widget/{session_id}/messages");
    let rows = messages
        .into_iter()
        .map(|message| view! { <MessageRow message=message /> })
        .collect_view();

    let triggers = queued
        .into_iter()
        .map(|seq| {
            let url = format!("/widget/{session_id}/reply/{seq}");
            view! {
                <div
                    class="reply-trigger hidden"
                    hx-post=url
                    hx-trigger="load"
                    hx-target=format!("#{MESSAGE_LIST_ID}")
                    hx-swap="outerHTML"
                ></div>
            }
        })
        .collect_view();

    view! {
        <ScrollArea id=MESSAGE_LIST_ID class="chat flex-1 p-4 space-y-3">
            {empty.then(|| view! {
                <p class="empty-state text-sm text-textMuted text-center py-8">
                    "No messages yet. Say hello!"
                </p>
            })}
            {rows}
            {awaiting.then(|| view! { <TypingIndicator poll_url=poll_url /> })}
            {triggers}
        </ScrollArea>
    }
}

/// A single message row, tagged with its sender for styling.
#[component]
pub fn MessageRow(message: Message) -> impl IntoView {
    let sender = message.sender().to_string();
    let classes = format!("message {sender}");
    let avatar = if *message.sender() == Sender::User {
        view! { <UserIcon /> }.into_any()
    } else {
        view! { <BotIcon /> }.into_any()
    };
    let text = message.text().to_string();

    view! {
        <div class=classes data-sender=sender>
            <span class="message-avatar">{avatar}</span>
            <p class="message-text">{text}</p>
        </div>
    }
}

#[component]
fn TypingIndicator(poll_url: String) -> impl IntoView {
    view! {
        <div
            class="typing-indicator flex items-center gap-2 text-sm text-textMuted"
            hx-get=poll_url
            hx-trigger="every 2s"
            hx-target=format!("#{MESSAGE_LIST_ID}")
            hx-swap="outerHTML"
        >
            <LoaderIcon />
            <span>"Waiting for a reply..."</span>
        </div>
    }
}
