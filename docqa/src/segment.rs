//! Sentence segmentation.
//!
//! This module provides the [`Segmenter`] trait and [`SentenceSegmenter`],
//! a punctuation-based splitter with a small abbreviation guard. The guard
//! is a heuristic: decimal numbers, ellipses and quoted dialogue are not
//! handled specially and may be split or kept together imperfectly.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex must compile"));

static TERMINAL_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s").expect("boundary regex must compile"));

/// A strategy for splitting document text into candidate sentences.
pub trait Segmenter: Send + Sync {
    /// Split text into trimmed sentences, in document order.
    ///
    /// Returns an empty `Vec` for empty input.
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Collapse newlines, carriage returns and whitespace runs to single spaces.
///
/// Leading and trailing whitespace is reduced to one space, not removed.
pub fn normalize_whitespace(text: &str) -> String {
    let flattened = text.replace(['\n', '\r'], " ");
    WHITESPACE_RUN.replace_all(&flattened, " ").into_owned()
}

/// Splits on `.`, `!` or `?` followed by whitespace.
///
/// The punctuation and the single whitespace character after it are
/// consumed by the split. A boundary is skipped when the text just before
/// the punctuation looks like:
///
/// - a dotted abbreviation such as `e.g` or `U.S` (word char, `.`, word char
///   starting at a word boundary),
/// - a lone capital initial followed by a period (`A.`),
/// - a lone lowercase letter after whitespace followed by a period (` a.`).
///
/// Fragments whose trimmed length is at most `min_chars` characters are
/// discarded.
///
/// # Example
///
/// ```rust,ignore
/// use docqa::{Segmenter, SentenceSegmenter};
///
/// let sentences = SentenceSegmenter::default().segment("We use tools, e.g. saws. Fine work.");
/// ```
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    min_chars: usize,
}

impl SentenceSegmenter {
    /// Create a segmenter that keeps fragments longer than `min_chars`.
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Segmenter for SentenceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let normalized = normalize_whitespace(text);
        split_sentences(&normalized)
            .into_iter()
            .map(str::trim)
            .filter(|fragment| fragment.chars().count() > self.min_chars)
            .map(str::to_string)
            .collect()
    }
}

/// Split normalized text at every unguarded sentence boundary.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;

    for boundary in TERMINAL_PUNCTUATION.find_iter(text) {
        if is_guarded(&text[..boundary.start()]) {
            continue;
        }
        fragments.push(&text[start..boundary.start()]);
        start = boundary.end();
    }
    fragments.push(&text[start..]);
    fragments
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `before` (the text preceding a terminal punctuation mark) ends
/// in one of the abbreviation patterns.
fn is_guarded(before: &str) -> bool {
    // Last four chars, nearest first.
    let mut tail = before.chars().rev();
    let c1 = tail.next();
    let c2 = tail.next();
    let c3 = tail.next();
    let c4 = tail.next();

    // word boundary, word char, '.', word char
    if let (Some(last), Some('.'), Some(first)) = (c1, c2, c3) {
        if is_word_char(last) && is_word_char(first) && !c4.is_some_and(is_word_char) {
            return true;
        }
    }

    // word boundary, capital letter, '.'
    if let (Some('.'), Some(letter)) = (c1, c2) {
        if letter.is_ascii_uppercase() && !c3.is_some_and(is_word_char) {
            return true;
        }
    }

    // whitespace, lowercase letter, '.'
    if let (Some('.'), Some(letter), Some(space)) = (c1, c2, c3) {
        if letter.is_ascii_lowercase() && space.is_whitespace() {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Vec<String> {
        SentenceSegmenter::default().segment(text)
    }

    #[test]
    fn splits_on_terminal_punctuation_and_drops_short_fragments() {
        let sentences = segment(
            "The cat sat on the mat today. Dogs are loyal companions indeed! Is the mat soft? Yes.",
        );
        assert_eq!(
            sentences,
            vec!["The cat sat on the mat today", "Dogs are loyal companions indeed", "Is the mat soft"]
        );
    }

    #[test]
    fn final_sentence_keeps_its_punctuation() {
        let sentences = segment("Version 2.5 was released. It fixed many bugs indeed.");
        assert_eq!(sentences, vec!["Version 2.5 was released", "It fixed many bugs indeed."]);
    }

    #[test]
    fn dotted_abbreviation_does_not_split() {
        let sentences =
            segment("We use tools, e.g. hammers and saws, for building. Another sentence is here.");
        assert_eq!(
            sentences,
            vec!["We use tools, e.g. hammers and saws, for building", "Another sentence is here."]
        );

        let sentences = segment("He lives in the U.S. and works remotely every day. Short. Tiny bit.");
        assert_eq!(sentences, vec!["He lives in the U.S. and works remotely every day"]);
    }

    #[test]
    fn capital_initial_guard() {
        let sentences = segment("Plan A.. then the next one starts here. Final words go here.");
        assert_eq!(sentences, vec!["Plan A.. then the next one starts here", "Final words go here."]);
    }

    #[test]
    fn newlines_and_runs_of_whitespace_are_collapsed() {
        let sentences = segment(
            "Line one is long enough\nand continues here.\r\nSecond    sentence  is spaced out.",
        );
        assert_eq!(
            sentences,
            vec!["Line one is long enough and continues here", "Second sentence is spaced out."]
        );
    }

    #[test]
    fn ellipsis_fragment_is_dropped() {
        let sentences = segment("Wait... what happened here? Nobody knows the answer.");
        assert_eq!(sentences, vec!["what happened here", "Nobody knows the answer."]);
    }

    #[test]
    fn empty_and_short_input_yield_nothing() {
        assert!(segment("").is_empty());
        assert!(segment("short.").is_empty());
        assert!(segment("   \n\r  ").is_empty());
    }

    #[test]
    fn normalize_collapses_all_whitespace() {
        assert_eq!(normalize_whitespace("a\n\nb\r\tc   d"), "a b c d");
    }

    #[test]
    fn min_chars_is_exclusive() {
        let segmenter = SentenceSegmenter::new(5);
        assert_eq!(segmenter.segment("abcde. abcdef."), vec!["abcdef."]);
    }
}
