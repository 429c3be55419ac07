//! Chat form controller.
//!
//! [`ChatForm`] owns the draft and the history and implements the two event
//! handlers of the widget: input change and submit. Submit is split into a
//! synchronous half ([`ChatForm::begin_submit`]) that performs the optimistic
//! append, and a completion half ([`ChatForm::complete`]) that records the
//! outcome of the outbound request. [`ChatForm::on_submit`] runs both.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::backend::{BackendError, MessageBackend};
use super::message::{History, Message};

/// Which variant of the widget is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Submit posts the draft to the backend and appends its reply.
    #[default]
    Networked,
    /// Submit only appends the user's own message.
    LocalEcho,
}

/// Request-level state of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No outbound request pending.
    Idle,
    /// At least one outbound request has not completed yet.
    AwaitingResponse,
}

/// An outbound request owed after an optimistic append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    /// Per-form sequence number, starting at 1.
    pub seq: u64,
    /// Draft text exactly as submitted.
    pub text: String,
}

/// Result of the synchronous half of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Draft was blank; nothing changed.
    Ignored,
    /// User message appended, no request needed.
    Local,
    /// User message appended, the request still has to be sent.
    Outgoing(Outgoing),
}

/// The chat form controller.
#[derive(Debug, Clone, Default)]
pub struct ChatForm {
    mode: ChatMode,
    draft: String,
    history: History,
    in_flight: usize,
    next_seq: u64,
}

impl ChatForm {
    #[must_use]
    pub fn new(mode: ChatMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Form that posts every submit to a backend.
    #[must_use]
    pub fn networked() -> Self {
        Self::new(ChatMode::Networked)
    }

    /// Form that only echoes submits into the history.
    #[must_use]
    pub fn local_echo() -> Self {
        Self::new(ChatMode::LocalEcho)
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        self.history.as_slice()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.in_flight == 0 {
            Phase::Idle
        } else {
            Phase::AwaitingResponse
        }
    }

    /// Replace the draft. No validation, no length limit.
    pub fn on_input_change(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Optimistically append the draft as a user message and clear it.
    ///
    /// Blank drafts (empty after trimming) leave both draft and history
    /// untouched.
    pub fn begin_submit(&mut self) -> Submission {
        if self.draft.trim().is_empty() {
            debug!(name: "chat.submit.ignored", "Ignoring blank submit");
            return Submission::Ignored;
        }

        let text = std::mem::take(&mut self.draft);
        self.history.push(Message::user(text.clone()));

        match self.mode {
            ChatMode::LocalEcho => {
                info!(name: "chat.submit.accepted", mode = "local_echo", "Message appended");
                Submission::Local
            }
            ChatMode::Networked => {
                self.next_seq += 1;
                self.in_flight += 1;
                info!(
                    name: "chat.submit.accepted",
                    mode = "networked",
                    seq = self.next_seq,
                    "Message appended, awaiting reply"
                );
                Submission::Outgoing(Outgoing {
                    seq: self.next_seq,
                    text,
                })
            }
        }
    }

    /// Record the outcome of the request for `outgoing`.
    ///
    /// A reply is appended as a backend message. A failure is logged and
    /// swallowed; the optimistic user message stays. Returns `true` when a
    /// message was appended.
    pub fn complete(&mut self, outgoing: &Outgoing, result: Result<String, BackendError>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(reply) => {
                info!(name: "chat.reply.received", seq = outgoing.seq, "Reply appended");
                self.history.push(Message::backend(reply));
                true
            }
            Err(e) => {
                error!(
                    name: "chat.reply.failed",
                    seq = outgoing.seq,
                    error = %e,
                    "Error calling the backend"
                );
                false
            }
        }
    }

    /// Full submit: optimistic append, then (networked) one request and its
    /// completion. `conversation` is passed through to the backend.
    pub async fn on_submit<B>(&mut self, backend: &B, conversation: &str) -> Submission
    where
        B: MessageBackend + ?Sized,
    {
        let submission = self.begin_submit();
        if let Submission::Outgoing(outgoing) = &submission {
            let result = backend.send(conversation, &outgoing.text).await;
            self.complete(outgoing, result);
        }
        submission
    }
}
