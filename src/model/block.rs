//! Block and run types.

use serde::{Deserialize, Serialize};

/// One semantic unit of parsed input. Every source line maps to exactly one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A `#`-prefixed heading line.
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Heading text without markers
        text: String,
    },

    /// A `*`-prefixed bullet line.
    BulletItem {
        /// 0 for top-level bullets, 1 for sub-bullets
        indent_level: u8,
        /// Bullet text without markers
        text: String,
    },

    /// Any other non-blank line, split into plain and bold runs.
    Paragraph {
        /// Runs in left-to-right order
        runs: Vec<Run>,
    },

    /// An empty or whitespace-only line.
    BlankLine,
}

impl Block {
    /// Create a heading block, clamping the level into 1..=6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create a bullet block. Any level above 1 is treated as 1.
    pub fn bullet(indent_level: u8, text: impl Into<String>) -> Self {
        Block::BulletItem {
            indent_level: indent_level.min(1),
            text: text.into(),
        }
    }

    /// Create a paragraph from runs.
    pub fn paragraph(runs: Vec<Run>) -> Self {
        Block::Paragraph { runs }
    }

    /// Create a paragraph with a single plain run.
    pub fn plain(text: impl Into<String>) -> Self {
        Block::Paragraph {
            runs: vec![Run::plain(text)],
        }
    }

    /// Text of the block with all formatting markers removed.
    ///
    /// Blank lines yield an empty string.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::BulletItem { text, .. } => text.clone(),
            Block::Paragraph { runs } => runs.iter().map(|r| r.text.as_str()).collect(),
            Block::BlankLine => String::new(),
        }
    }

    /// Check if this block is a blank line.
    pub fn is_blank(&self) -> bool {
        matches!(self, Block::BlankLine)
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this block is a bullet item.
    pub fn is_bullet(&self) -> bool {
        matches!(self, Block::BulletItem { .. })
    }
}

/// A contiguous span of text sharing one bold/plain attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// The text content, without bold markers
    pub text: String,

    /// Whether the span was enclosed in `**` markers
    pub bold: bool,
}

impl Run {
    /// Create a run with an explicit bold flag.
    pub fn new(text: impl Into<String>, bold: bool) -> Self {
        Self {
            text: text.into(),
            bold,
        }
    }

    /// Create a plain run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(Block::heading(0, "x"), Block::heading(1, "x"));
        assert!(matches!(Block::heading(9, "x"), Block::Heading { level: 6, .. }));
    }

    #[test]
    fn test_bullet_level_capped() {
        assert!(matches!(
            Block::bullet(3, "x"),
            Block::BulletItem { indent_level: 1, .. }
        ));
    }

    #[test]
    fn test_paragraph_plain_text() {
        let block = Block::paragraph(vec![
            Run::plain("Hello "),
            Run::bold("world"),
            Run::plain("!"),
        ]);
        assert_eq!(block.plain_text(), "Hello world!");
        assert_eq!(Block::BlankLine.plain_text(), "");
    }

    #[test]
    fn test_block_serializes_tagged() {
        let json = serde_json::to_string(&Block::heading(2, "Skills")).unwrap();
        assert_eq!(json, r#"{"type":"heading","level":2,"text":"Skills"}"#);
    }
}
