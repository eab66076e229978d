//! Document-level types.

use super::Block;
use crate::parser;
use serde::{Deserialize, Serialize};

/// A parsed draft: the ordered block sequence of one export invocation.
///
/// Block order is the source line order. Blocks are never reordered,
/// merged across lines or dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Blocks in source order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Parse raw notation text into a document.
    pub fn parse(text: &str) -> Self {
        Self {
            blocks: parser::parse(text),
        }
    }

    /// Get the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over blocks in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Get the formatting-free text of the document.
    pub fn plain_text(&self) -> String {
        crate::render::to_plain_text(&self.blocks)
    }

    /// First heading text, if any. Used as a title fallback.
    pub fn first_heading(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading { text, .. } if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        })
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_document_parse_and_plain_text() {
        let doc = Document::parse("# Jane Doe\n\n**Rust** engineer");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.plain_text(), "Jane Doe\n\nRust engineer");
    }

    #[test]
    fn test_first_heading() {
        let doc = Document::parse("Intro\n#\n## Experience\n# Later");
        assert_eq!(doc.first_heading(), Some("Experience"));
        assert_eq!(Document::parse("no headings").first_heading(), None);
    }
}
