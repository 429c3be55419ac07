//! Chat widget state and the outbound message endpoint.
//!
//! # Architecture
//!
//! - [`Message`] / [`History`]: immutable messages in an append-only list
//! - [`ChatForm`]: the form controller owning the draft and the history
//! - [`MessageBackend`]: where submitted messages go. [`HttpBackend`] makes
//!   the `POST /message` call; [`QuestionnaireBackend`] runs a question flow
//!   and summarizes the answers through [`CompletionClient`]
//!
//! # Example
//!
//! ```rust
//! use chat_widget::chat::{ChatForm, Message, Submission};
//!
//! let mut form = ChatForm::local_echo();
//! form.on_input_change("Hello!");
//! assert_eq!(form.begin_submit(), Submission::Local);
//!
//! assert_eq!(form.draft(), "");
//! assert_eq!(form.messages(), &[Message::user("Hello!")]);
//! ```

mod backend;
mod completion;
mod form;
mod message;
mod questionnaire;

pub use backend::{BackendError, HttpBackend, MESSAGE_PATH, MessageBackend, MessageReply, MessageRequest};
pub use completion::{COMPLETIONS_PATH, CompletionClient, CompletionSettings};
pub use form::{ChatForm, ChatMode, Outgoing, Phase, Submission};
pub use message::{History, Message, Sender};
pub use questionnaire::{DEFAULT_QUESTIONS, QuestionnaireBackend};
