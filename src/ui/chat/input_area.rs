//! Chat input area component.

use leptos::prelude::*;

use crate::ui::components::{Button, ButtonSize, ButtonVariant, SendIcon};

use super::widget::WIDGET_ID;

/// Text input plus submit button.
///
/// Typing posts the draft to the session (debounced); submitting posts the
/// form and swaps the whole widget with the response.
#[component]
pub fn ChatInputArea(
    /// Session ID for the chat.
    session_id: String,
    /// Current draft, echoed back into the input.
    #[prop(default = String::new())]
    draft: String,
    /// Placeholder text.
    #[prop(into, default = "Type your message...".to_string())]
    placeholder: String,
) -> impl IntoView {
    let submit_url = format!("/widget/{session_id}/submit");
    let draft_url = format!("/widget/{session_id}/draft");

    view! {
        <div class="border-t border-panelBorder p-4 bg-panel/50">
            <form
                id="chat-form"
                class="flex gap-2"
                hx-post=submit_url
                hx-target=format!("#{WIDGET_ID}")
                hx-swap="outerHTML"
            >
                <input
                    type="text"
                    name="text"
                    value=draft
                    placeholder=placeholder
                    autocomplete="off"
                    autofocus=true
                    class="flex-1 h-11 px-4 rounded-xl border border-panelBorder bg-background \
                           text-textPrimary placeholder:text-textMuted \
                           focus:outline-none focus:ring-2 focus:ring-primary"
                    hx-post=draft_url
                    hx-trigger="input changed delay:200ms"
                    hx-swap="none"
                />

                <Button
                    variant=ButtonVariant::Primary
                    size=ButtonSize::Icon
                    button_type="submit"
                    label="Send"
                    class="shrink-0 h-11 w-11 rounded-xl"
                >
                    <SendIcon class="h-5 w-5" />
                </Button>
            </form>
        </div>
    }
}
