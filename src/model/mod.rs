//! Document model types for the export pipeline.
//!
//! This module defines the intermediate representation shared by every
//! backend: the parsed [`Block`] sequence, the positioned output of the
//! pagination engine and the coordinate-free paragraph tree used for
//! word-processor output.

mod block;
mod document;
mod page;
mod paragraph;

pub use block::{Block, Run};
pub use document::Document;
pub use page::{LayoutPage, PositionedFragment};
pub use paragraph::{ParagraphRole, StructuredParagraph};
