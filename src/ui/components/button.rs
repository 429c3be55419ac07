//! Button component.

use leptos::prelude::*;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Filled accent button for the main action.
    #[default]
    Primary,
    /// Transparent button for secondary actions.
    Ghost,
}

impl ButtonVariant {
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "bg-primary text-white hover:bg-primaryMuted",
            Self::Ghost => "bg-transparent text-textPrimary hover:bg-panel",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Text button.
    #[default]
    Md,
    /// Square icon-only button.
    Icon,
}

impl ButtonSize {
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Md => "h-10 px-4 text-sm",
            Self::Icon => "h-10 w-10",
        }
    }
}

/// Styled `<button>`.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Button button_type="submit" label="Send">
///         "Send"
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    #[prop(default = ButtonVariant::Primary)] variant: ButtonVariant,
    #[prop(default = ButtonSize::Md)] size: ButtonSize,
    /// Button type attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    /// Accessible label, needed for icon-only buttons.
    #[prop(default = "")]
    label: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "inline-flex items-center justify-center gap-2 rounded-lg font-medium \
         transition-colors focus-visible:outline-none focus-visible:ring-2 \
         focus-visible:ring-primary disabled:pointer-events-none disabled:opacity-50 {} {} {}",
        variant.classes(),
        size.classes(),
        class
    );

    view! {
        <button type=button_type class=classes aria-label=label>
            {children()}
        </button>
    }
}
