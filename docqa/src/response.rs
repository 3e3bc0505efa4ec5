//! Plain-text rendering of answers for chat-style callers.

use crate::document::ResponseItem;

/// Marker placed before each answer line.
pub const ANSWER_MARKER: &str = "📌";

/// Label placed before each context line.
pub const CONTEXT_LABEL: &str = "💡 Context:";

/// Render response items as free text, one answer/context pair per item.
///
/// Each item becomes `"📌 {answer}\n💡 Context: {context}"`; items are
/// separated by a newline. No items renders as an empty string.
pub fn render_response_text(items: &[ResponseItem]) -> String {
    items
        .iter()
        .map(|item| format!("{ANSWER_MARKER} {}\n{CONTEXT_LABEL} {}", item.answer, item.context))
        .collect::<Vec<_>>()
        .join("\n")
}
