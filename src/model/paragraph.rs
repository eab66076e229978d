//! Coordinate-free paragraph types for word-processor output.

use super::{Block, Run};
use serde::{Deserialize, Serialize};

/// Semantic role of a structured paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphRole {
    /// Heading, `level` is 1-6
    Heading,
    /// Bullet item, `level` is the indent level
    Bullet,
    /// Ordinary body text
    Body,
    /// Inter-paragraph space with no text
    Spacer,
}

/// A paragraph of the semantic tree handed to a word-processor backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredParagraph {
    /// Paragraph role
    pub role: ParagraphRole,

    /// Heading level or bullet indent level; 0 for body and spacer
    pub level: u8,

    /// Styled runs; empty for spacers
    pub runs: Vec<Run>,
}

impl StructuredParagraph {
    /// Create a heading paragraph.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            role: ParagraphRole::Heading,
            level: level.clamp(1, 6),
            runs: vec![Run::plain(text)],
        }
    }

    /// Create a bullet paragraph.
    pub fn bullet(level: u8, text: impl Into<String>) -> Self {
        Self {
            role: ParagraphRole::Bullet,
            level: level.min(1),
            runs: vec![Run::plain(text)],
        }
    }

    /// Create a body paragraph from runs.
    pub fn body(runs: Vec<Run>) -> Self {
        Self {
            role: ParagraphRole::Body,
            level: 0,
            runs,
        }
    }

    /// Create a spacer paragraph.
    pub fn spacer() -> Self {
        Self {
            role: ParagraphRole::Spacer,
            level: 0,
            runs: Vec::new(),
        }
    }

    /// Map one block to its structured paragraph.
    pub fn from_block(block: &Block) -> Self {
        match block {
            Block::Heading { level, text } => Self::heading(*level, text.clone()),
            Block::BulletItem { indent_level, text } => Self::bullet(*indent_level, text.clone()),
            Block::Paragraph { runs } => Self::body(runs.clone()),
            Block::BlankLine => Self::spacer(),
        }
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if this is a spacer.
    pub fn is_spacer(&self) -> bool {
        self.role == ParagraphRole::Spacer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_block_roles() {
        let heading = StructuredParagraph::from_block(&Block::heading(2, "Skills"));
        assert_eq!(heading.role, ParagraphRole::Heading);
        assert_eq!(heading.level, 2);

        let spacer = StructuredParagraph::from_block(&Block::BlankLine);
        assert!(spacer.is_spacer());
        assert!(spacer.runs.is_empty());
    }

    #[test]
    fn test_body_keeps_runs() {
        let block = Block::paragraph(vec![Run::bold("Bold"), Run::plain(" and normal")]);
        let para = StructuredParagraph::from_block(&block);
        assert_eq!(para.role, ParagraphRole::Body);
        assert_eq!(para.runs.len(), 2);
        assert!(para.runs[0].bold);
        assert_eq!(para.plain_text(), "Bold and normal");
    }
}
