//! Inline SVG icons (lucide outlines).

use leptos::prelude::*;

/// Common icon size class.
const ICON_SIZE: &str = "h-4 w-4";

/// Shared 24x24 stroked SVG frame.
#[component]
fn IconFrame(
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// SVG shapes.
    children: Children,
) -> impl IntoView {
    let classes = format!("{ICON_SIZE} {class}");

    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            class=classes
        >
            {children()}
        </svg>
    }
}

/// Paper plane, used on the submit button.
#[component]
pub fn SendIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconFrame class=class>
            <line x1="22" y1="2" x2="11" y2="13" />
            <polygon points="22 2 15 22 11 13 2 9 22 2" />
        </IconFrame>
    }
}

/// Spinning arc shown while a reply is pending.
#[component]
pub fn LoaderIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <span class="inline-flex animate-spin">
            <IconFrame class=class>
                <path d="M21 12a9 9 0 1 1-6.219-8.56" />
            </IconFrame>
        </span>
    }
}

#[component]
pub fn UserIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconFrame class=class>
            <path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2" />
            <circle cx="12" cy="7" r="4" />
        </IconFrame>
    }
}

#[component]
pub fn BotIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconFrame class=class>
            <rect x="3" y="11" width="18" height="10" rx="2" />
            <circle cx="12" cy="5" r="2" />
            <path d="M12 7v4" />
            <line x1="8" y1="16" x2="8" y2="16" />
            <line x1="16" y1="16" x2="16" y2="16" />
        </IconFrame>
    }
}

/// Music note, used as the widget logo.
#[component]
pub fn MusicIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconFrame class=class>
            <path d="M9 18V5l12-2v13" />
            <circle cx="6" cy="18" r="3" />
            <circle cx="18" cy="16" r="3" />
        </IconFrame>
    }
}
