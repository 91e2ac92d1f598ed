//! Comment ranges.
//!
//! Comments are not tokens. The scanner records every comment it skips so
//! the parser can attach doc comments to declarations afterwards.

use serde::Serialize;

/// A comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset, exclusive)
    pub end: u32,
    /// 1-based line of the first character
    pub line: u32,
    /// 1-based line of the last character
    pub end_line: u32,
    /// Whether this is a `/* */` comment
    pub is_multi_line: bool,
}

impl Comment {
    /// Get the comment text from source, including the `//` or `/*` markers.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.pos as usize;
        let end = self.end as usize;
        if end <= source.len() && start < end {
            &source[start..end]
        } else {
            ""
        }
    }
}
