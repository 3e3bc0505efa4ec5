//! Caller-owned record of a question session.

use serde::Serialize;

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatEntry {
    pub question: String,
    pub answer: String,
}

/// Append-only list of answered questions for one session.
///
/// Lives entirely in the caller; the retrieval core never reads or writes it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatHistory {
    entries: Vec<ChatEntry>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a question and its rendered answer. Blank answers are not recorded.
    pub fn record(&mut self, question: impl Into<String>, answer: impl Into<String>) -> bool {
        let answer = answer.into();
        if answer.trim().is_empty() {
            return false;
        }
        self.entries.push(ChatEntry { question: question.into(), answer });
        true
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `You: <question>` followed by the answer, oldest first.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("You: {}\n{}", entry.question, entry.answer))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
