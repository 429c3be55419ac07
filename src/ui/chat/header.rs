//! Chat header component.

use leptos::prelude::*;

use crate::ui::components::{Badge, BadgeVariant, ButtonVariant, MusicIcon};

/// Element id of the status badge wrapper.
pub const STATUS_ID: &str = "chat-status";

/// Chat header with title, status and a new-chat link.
#[component]
pub fn ChatHeader(
    /// Title displayed in the header.
    title: String,
    /// Whether a reply is outstanding.
    #[prop(default = false)]
    awaiting: bool,
) -> impl IntoView {
    let new_chat_classes = format!(
        "inline-flex items-center rounded-lg h-8 px-3 text-xs {}",
        ButtonVariant::Ghost.classes()
    );

    view! {
        <header class="flex items-center justify-between px-4 py-3 border-b border-panelBorder bg-panel/50">
            <div class="flex items-center gap-2">
                <MusicIcon class="h-5 w-5 text-primary" />
                <h1 class="font-semibold text-lg">{title}</h1>
            </div>

            <div class="flex items-center gap-2">
                <ChatStatus awaiting=awaiting />
                <a href="/" class=new_chat_classes>"New chat"</a>
            </div>
        </header>
    }
}

/// Status badge: "Ready" or "Waiting".
///
/// With `oob` set the element carries `hx-swap-oob`, so it can ride along in
/// a message list response and replace the badge in the header.
#[component]
pub fn ChatStatus(
    awaiting: bool,
    #[prop(default = false)] oob: bool,
) -> impl IntoView {
    let badge = if awaiting {
        view! { <Badge variant=BadgeVariant::Warning>"Waiting"</Badge> }.into_any()
    } else {
        view! { <Badge variant=BadgeVariant::Secondary>"Ready"</Badge> }.into_any()
    };

    view! {
        <span id=STATUS_ID hx-swap-oob=oob.then_some("true")>
            {badge}
        </span>
    }
}
