//! Rendering module for converting parsed blocks to output formats.
//!
//! - [`to_pdf`] writes laid-out pages as a print-ready PDF.
//! - [`build_paragraphs`] and [`to_docx`] produce a reflowable word-processor
//!   document.
//! - [`to_plain_text`] strips all formatting for the remote document service.
//! - [`to_json`] dumps any intermediate stage for inspection.

mod docx;
mod json;
mod options;
mod pdf;
mod structured;
mod text;

pub use docx::{escape_xml, to_docx};
pub use json::{to_json, JsonFormat};
pub use options::{DocumentInfo, DocxOptions, DEFAULT_PRODUCER};
pub use pdf::{encode_win_ansi, to_pdf};
pub use structured::build_paragraphs;
pub use text::to_plain_text;
