//! Question-flow backend.
//!
//! Walks each conversation through a fixed list of questions. The first
//! message of a conversation only starts it and is answered with the first
//! question. Every later message is recorded as the answer to the question
//! before it. Once every question has an answer, the answers are summarized
//! by a completion model and the conversation starts over.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::backend::{BackendError, MessageBackend};
use super::completion::CompletionClient;

/// Questions asked by default, in order.
pub const DEFAULT_QUESTIONS: [&str; 4] = [
    "Hi there! I'm here to help you find your perfect playlist. Which artists do you \
     listen to at the moment, which tracks are your favorites, and which genres do you \
     prefer? Up to 5 of each is plenty.",
    "What's your current mood or activity (relaxing, working out, studying, celebrating)? \
     Are you after upbeat, chill or emotional tracks?",
    "How energetic should the music feel? Do you want tracks you can dance to, or \
     something more laid-back?",
    "Do you prefer instrumental music, or would you like vocals to stand out?",
];

/// What a message moved the conversation to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Ask(String),
    Summarize(Vec<String>),
}

/// [`MessageBackend`] that asks questions and summarizes the answers.
#[derive(Debug)]
pub struct QuestionnaireBackend {
    questions: Vec<String>,
    summarizer: CompletionClient,
    /// Answers collected so far, per conversation.
    conversations: Mutex<HashMap<String, Vec<String>>>,
}

impl QuestionnaireBackend {
    /// Backend asking [`DEFAULT_QUESTIONS`].
    #[must_use]
    pub fn new(summarizer: CompletionClient) -> Self {
        let questions = DEFAULT_QUESTIONS.iter().map(ToString::to_string).collect();
        Self::with_questions(questions, summarizer)
    }

    #[must_use]
    pub fn with_questions(questions: Vec<String>, summarizer: CompletionClient) -> Self {
        Self {
            questions,
            summarizer,
            conversations: Mutex::new(HashMap::new()),
        }
    }

    /// Number of answers recorded for `conversation`, `None` if it has not
    /// started.
    #[must_use]
    pub fn answers_collected(&self, conversation: &str) -> Option<usize> {
        self.conversations().get(conversation).map(Vec::len)
    }

    fn conversations(&self) -> MutexGuard<'_, HashMap<String, Vec<String>>> {
        self.conversations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn advance(&self, conversation: &str, text: &str) -> Step {
        let mut conversations = self.conversations();
        let started = conversations.contains_key(conversation);
        let answers = conversations.entry(conversation.to_string()).or_default();
        if started {
            answers.push(text.to_string());
        }

        if let Some(next) = self.questions.get(answers.len()) {
            return Step::Ask(next.clone());
        }

        Step::Summarize(conversations.remove(conversation).unwrap_or_default())
    }

    /// Put a conversation back one answer short, so resending the last
    /// answer retries the summary.
    fn rewind(&self, conversation: &str, mut answers: Vec<String>) {
        answers.pop();
        self.conversations()
            .entry(conversation.to_string())
            .or_insert(answers);
    }

    fn summary_prompt(&self, answers: &[String]) -> String {
        let mut prompt = String::from(
            "Suggest music for a listener based on the questions and answers below.\n\
             1. Describe what kind of music suits them and explain your reasoning. \
             Feel free to give them a playful music personality.\n\
             2. Then return a JSON object with up to 5 seed artists, seed tracks and \
             seed genres, plus target danceability, energy, tempo and mood between 0 and 1.\n\n",
        );
        for (question, answer) in self.questions.iter().zip(answers) {
            prompt.push_str(&format!("Q: {question}\nA: {answer}\n\n"));
        }
        prompt
    }
}

#[async_trait]
impl MessageBackend for QuestionnaireBackend {
    async fn send(&self, conversation: &str, text: &str) -> Result<String, BackendError> {
        match self.advance(conversation, text) {
            Step::Ask(question) => {
                debug!(
                    name: "questionnaire.question",
                    conversation,
                    answered = self.answers_collected(conversation).unwrap_or(0),
                    "Asking next question"
                );
                Ok(question)
            }
            Step::Summarize(answers) => {
                info!(
                    name: "questionnaire.summary.requested",
                    conversation,
                    answers = answers.len(),
                    "All questions answered, requesting summary"
                );
                let prompt = self.summary_prompt(&answers);
                match self.summarizer.complete(&prompt).await {
                    Ok(summary) => Ok(summary),
                    Err(e) => {
                        warn!(
                            name: "questionnaire.summary.failed",
                            conversation,
                            error = %e,
                            "Summary failed, last answer can be resent"
                        );
                        self.rewind(conversation, answers);
                        Err(e)
                    }
                }
            }
        }
    }

    fn end_conversation(&self, conversation: &str) {
        self.conversations().remove(conversation);
    }
}
