//! Page-level components.

use leptos::prelude::*;

use crate::ui::chat::{ChatWidget, WidgetSnapshot};
use crate::ui::components::{Button, ButtonVariant};

/// Full HTML document hosting one chat widget.
#[component]
pub fn ChatPage(
    /// Widget state to render.
    snapshot: WidgetSnapshot,
    /// Where to load HTMX from.
    htmx_src: String,
) -> impl IntoView {
    let title = snapshot.title.clone();

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
                <script src=htmx_src></script>
                <link rel="stylesheet" href="/static/widget.css"/>
            </head>

            <body class="min-h-screen bg-background text-textPrimary antialiased">
                <main id="app" class="container mx-auto px-4 py-6 max-w-3xl">
                    <ChatWidget snapshot=snapshot />
                </main>
            </body>
        </html>
    }
}

/// Shown when a widget request names an unknown or expired session.
#[component]
pub fn SessionExpired() -> impl IntoView {
    view! {
        <div id="session-expired" class="flex flex-col items-center justify-center py-20">
            <p class="text-textMuted mb-6">"This chat session has expired."</p>
            <a href="/">
                <Button variant=ButtonVariant::Primary>"Start a new chat"</Button>
            </a>
        </div>
    }
}
