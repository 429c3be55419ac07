//! Scrollable area component.

use leptos::prelude::*;

/// Scrollable container.
///
/// `id` is required because HTMX swaps the message list by id.
#[component]
pub fn ScrollArea(
    /// Element id.
    id: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Scrollable content.
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "scroll-area relative overflow-y-auto scrollbar-thin scrollbar-thumb-panelBorder \
         scrollbar-track-transparent {class}"
    );

    view! {
        <div id=id class=classes aria-live="polite">
            {children()}
        </div>
    }
}
