//! Case-insensitive emphasis of the active query inside result text.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Compiled matcher for one query.
///
/// The query is escaped before compilation, so user input is always matched
/// literally.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Build a highlighter; an empty or whitespace-only query matches nothing.
    #[must_use]
    pub fn new(query: &str) -> Self {
        if query.trim().is_empty() {
            return Self { pattern: None };
        }
        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .ok();
        Self { pattern }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Byte ranges of every non-overlapping match in `text`.
    #[must_use]
    pub fn ranges(&self, text: &str) -> Vec<Range<usize>> {
        match &self.pattern {
            Some(pattern) => pattern.find_iter(text).map(|m| m.range()).collect(),
            None => Vec::new(),
        }
    }

    /// Wrap every match in [`MARK_OPEN`]/[`MARK_CLOSE`].
    #[must_use]
    pub fn emphasize(&self, text: &str) -> String {
        let ranges = self.ranges(text);
        if ranges.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(
            text.len() + ranges.len() * (MARK_OPEN.len() + MARK_CLOSE.len()),
        );
        let mut cursor = 0;
        for range in ranges {
            out.push_str(&text[cursor..range.start]);
            out.push_str(MARK_OPEN);
            out.push_str(&text[range.clone()]);
            out.push_str(MARK_CLOSE);
            cursor = range.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

/// Wrap every case-insensitive occurrence of `query` in `text` with emphasis markers.
#[must_use]
pub fn emphasize(text: &str, query: &str) -> String {
    Highlighter::new(query).emphasize(text)
}

/// Byte ranges of every case-insensitive occurrence of `query` in `text`.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    Highlighter::new(query).ranges(text)
}
