//! Block to structured paragraph mapping.

use crate::model::{Block, StructuredParagraph};

/// Build the paragraph tree for word-processor output.
///
/// One paragraph per block, in order. Blank lines become spacer paragraphs.
pub fn build_paragraphs(blocks: &[Block]) -> Vec<StructuredParagraph> {
    blocks.iter().map(StructuredParagraph::from_block).collect()
}
