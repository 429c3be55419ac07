//! Chat widget components.
//!
//! HTMX swaps two regions by id: the whole widget after a submit
//! ([`WIDGET_ID`]) and the message list after a reply ([`MESSAGE_LIST_ID`]).

mod header;
mod input_area;
mod message_list;
mod widget;

pub use header::{ChatHeader, ChatStatus, STATUS_ID};
pub use input_area::ChatInputArea;
pub use message_list::{ChatMessageList, MESSAGE_LIST_ID, MessageRow};
pub use widget::{ChatWidget, WIDGET_ID, WidgetSnapshot};
