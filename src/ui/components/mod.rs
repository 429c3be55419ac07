//! Reusable UI building blocks, rendered via Leptos SSR.
//!
//! - [`Button`]: clickable button with variants
//! - [`Badge`]: status badge
//! - [`ScrollArea`]: scrollable container
//! - [`icons`]: inline SVG icons

mod badge;
mod button;
mod icons;
mod scroll_area;

pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use icons::*;
pub use scroll_area::ScrollArea;
