//! Badge component for status indicators.

use leptos::prelude::*;

/// Badge visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Muted neutral badge.
    #[default]
    Secondary,
    /// Amber badge for in-progress states.
    Warning,
}

impl BadgeVariant {
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Secondary => "bg-panel text-textPrimary border border-panelBorder",
            Self::Warning => "bg-warning text-black",
        }
    }
}

/// Small rounded label.
#[component]
pub fn Badge(
    #[prop(default = BadgeVariant::Secondary)] variant: BadgeVariant,
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "badge inline-flex items-center gap-1 rounded-full px-2.5 py-0.5 text-xs font-semibold {}",
        variant.classes()
    );

    view! {
        <span class=classes>
            {children()}
        </span>
    }
}
