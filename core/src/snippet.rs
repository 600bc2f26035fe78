//! Snippets as ordered text segments, each flagged as highlighted or not.
//!
//! Highlighting passes work on segments rather than on marked-up strings;
//! markup is only produced by [`Snippet::render`].

use serde::Serialize;
use std::fmt;

/// Emphasis marker wrapped around highlighted segments when rendering.
pub const EMPHASIS: &str = "**";
/// Marker for text cut off before or after the snippet window.
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), highlighted: false }
    }

    pub fn highlighted(text: impl Into<String>) -> Self {
        Self { text: text.into(), highlighted: true }
    }
}

/// A window of document words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snippet {
    /// The window starts after the beginning of the document.
    pub truncated_start: bool,
    /// The window ends before the end of the document.
    pub truncated_end: bool,
    pub segments: Vec<Segment>,
}

impl Snippet {
    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    /// Segment texts joined by spaces, without any markup.
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Words of the window with highlighting dropped.
    ///
    /// A highlighted phrase splits back into its words.
    pub fn words(&self) -> Vec<&str> {
        self.segments
            .iter()
            .flat_map(|s| s.text.split_whitespace())
            .collect()
    }

    /// Markdown-style rendering: `**hit**` for highlights, `...` on cut edges.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let body = self
            .segments
            .iter()
            .map(|s| {
                if s.highlighted {
                    format!("{EMPHASIS}{}{EMPHASIS}", s.text)
                } else {
                    s.text.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let mut out = String::with_capacity(body.len() + 2 * ELLIPSIS.len());
        if self.truncated_start {
            out.push_str(ELLIPSIS);
        }
        out.push_str(&body);
        if self.truncated_end {
            out.push_str(ELLIPSIS);
        }
        out
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_marks_highlights_and_cut_edges() {
        let s = Snippet {
            truncated_start: true,
            truncated_end: true,
            segments: vec![
                Segment::plain("the"),
                Segment::highlighted("black cat"),
                Segment::plain("sat"),
            ],
        };
        assert_eq!(s.render(), "...the **black cat** sat...");
        assert_eq!(s.plain_text(), "the black cat sat");
        assert_eq!(s.words(), vec!["the", "black", "cat", "sat"]);
    }

    #[test]
    fn empty_snippet_renders_nothing() {
        let s = Snippet { truncated_start: true, truncated_end: true, segments: vec![] };
        assert_eq!(s.render(), "");
    }
}
