//! # draftpress
//!
//! Deterministic export of AI-drafted documents.
//!
//! Drafts are written in a small line-oriented notation (`#` headings, `*`
//! bullets with an extra leading space for a sub-level, `**bold**` spans).
//! This library parses that notation once and renders it to a paginated PDF,
//! a reflowable DOCX document, or a plain-text document on a remote
//! collaborative service.
//!
//! ## Quick Start
//!
//! ```no_run
//! use draftpress::{parse, to_pdf_bytes};
//!
//! fn main() -> draftpress::Result<()> {
//!     let doc = parse("# Jane Doe\n**Senior Engineer**\n* Rust\n*  Tokio");
//!     println!("{} blocks", doc.len());
//!
//!     let pdf = to_pdf_bytes("# Jane Doe\n* Rust")?;
//!     std::fs::write("resume.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One parser for every backend**: headings, bullets and bold runs are
//!   decided in one place
//! - **Pure pagination**: layout is a fold over an explicit state
//! - **Injected metrics**: any [`layout::TextMeasure`] drives print layout
//! - **Byte-identical output**: no timestamps unless configured

pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod parser;
pub mod remote;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{
    DocumentKind, ExportArtifact, ExportFormat, ExportOptions, ExportRequest, ExportedFile,
    Exporter,
};
pub use layout::{LayoutOptions, PageSize, StandardFontMetrics, TextExtent, TextMeasure};
pub use model::{
    Block, Document, LayoutPage, ParagraphRole, PositionedFragment, Run, StructuredParagraph,
};
pub use remote::{DocumentCollaborator, RemoteDocument, RemoteDocumentRequest};
pub use render::{DocumentInfo, DocxOptions, JsonFormat};

#[cfg(feature = "remote")]
pub use remote::HttpDocumentCollaborator;

/// Parse notation text into a document.
///
/// Parsing never fails: unrecognized or malformed notation is kept as plain
/// text.
///
/// # Example
///
/// ```
/// use draftpress::{parse, Block};
///
/// let doc = parse("# Skills\n* Rust");
/// assert_eq!(doc.blocks[0], Block::heading(1, "Skills"));
/// ```
pub fn parse(text: &str) -> Document {
    Document::parse(text)
}

/// Lay out notation text on pages using the default options and metrics.
pub fn layout_pages(text: &str) -> Vec<LayoutPage> {
    Draftpress::new().parse(text).layout()
}

/// Render notation text to PDF bytes with default options.
///
/// # Example
///
/// ```no_run
/// let pdf = draftpress::to_pdf_bytes("# Title\nBody text").unwrap();
/// std::fs::write("out.pdf", pdf).unwrap();
/// ```
pub fn to_pdf_bytes(text: &str) -> Result<Vec<u8>> {
    Draftpress::new().parse(text).to_pdf()
}

/// Render notation text to DOCX bytes with default options.
pub fn to_docx_bytes(text: &str) -> Result<Vec<u8>> {
    Draftpress::new().parse(text).to_docx()
}

/// Convert notation text to formatting-free text.
///
/// # Example
///
/// ```
/// let text = draftpress::to_plain_text("# Title\n**Bold** and normal");
/// assert_eq!(text, "Title\nBold and normal");
/// ```
pub fn to_plain_text(text: &str) -> String {
    parse(text).plain_text()
}

/// Convert notation text to JSON blocks.
pub fn to_json(text: &str, format: JsonFormat) -> Result<String> {
    render::to_json(&parse(text), format)
}

/// Builder for parsing and rendering drafts.
///
/// # Example
///
/// ```no_run
/// use draftpress::{Draftpress, PageSize};
///
/// let pdf = Draftpress::new()
///     .with_page_size(PageSize::Letter)
///     .with_title("Cover letter")
///     .parse("Dear team,\n\n**Thank you.**")
///     .to_pdf()?;
/// # Ok::<(), draftpress::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Draftpress {
    layout_options: LayoutOptions,
    docx_options: DocxOptions,
    info: DocumentInfo,
}

impl Draftpress {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size for both print and word-processor output.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.layout_options = self.layout_options.with_page_size(page_size);
        self.docx_options = self.docx_options.with_page_size(page_size);
        self
    }

    /// Set the print layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Set the word-processor options.
    pub fn with_docx_options(mut self, options: DocxOptions) -> Self {
        self.docx_options = options;
        self
    }

    /// Set the document title written into metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.info = self.info.with_title(title);
        self
    }

    /// Set the document metadata.
    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    /// Parse notation text and return a result wrapper.
    pub fn parse(self, text: &str) -> DraftpressResult {
        DraftpressResult {
            document: Document::parse(text),
            layout_options: self.layout_options,
            docx_options: self.docx_options,
            info: self.info,
        }
    }
}

/// A parsed draft ready to render.
#[derive(Debug, Clone)]
pub struct DraftpressResult {
    /// The parsed document
    pub document: Document,
    layout_options: LayoutOptions,
    docx_options: DocxOptions,
    info: DocumentInfo,
}

impl DraftpressResult {
    /// Lay out pages with the standard font metrics.
    pub fn layout(&self) -> Vec<LayoutPage> {
        self.layout_with(&StandardFontMetrics)
    }

    /// Lay out pages with custom metrics.
    pub fn layout_with<M: TextMeasure + ?Sized>(&self, measure: &M) -> Vec<LayoutPage> {
        layout::layout(&self.document.blocks, &self.layout_options, measure)
    }

    /// Render to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        render::to_pdf(&self.layout(), self.layout_options.page_size, &self.info)
    }

    /// Render to DOCX bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        let paragraphs = render::build_paragraphs(&self.document.blocks);
        render::to_docx(&paragraphs, &self.docx_options, &self.info)
    }

    /// Get formatting-free text.
    pub fn to_text(&self) -> String {
        self.document.plain_text()
    }

    /// Convert the blocks to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_page_size() {
        let builder = Draftpress::new().with_page_size(PageSize::Letter);
        assert_eq!(builder.layout_options.page_size, PageSize::Letter);
        assert_eq!(builder.docx_options.page_size, PageSize::Letter);
    }

    #[test]
    fn test_builder_title() {
        let result = Draftpress::new().with_title("blog_Rust").parse("Hello");
        assert_eq!(result.info.title.as_deref(), Some("blog_Rust"));
        assert_eq!(result.document().len(), 1);
    }

    #[test]
    fn test_to_plain_text() {
        assert_eq!(to_plain_text("# Title\n**Bold** and normal"), "Title\nBold and normal");
    }

    #[test]
    fn test_to_pdf_bytes() {
        let bytes = to_pdf_bytes("# Title\nBody").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_to_docx_bytes() {
        let bytes = to_docx_bytes("# Title\nBody").unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_layout_pages_empty() {
        let pages = layout_pages("");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json("* a", JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"blocks":[{"type":"bullet_item","indent_level":0,"text":"a"}]}"#
        );
    }

    #[test]
    fn test_layout_with_custom_metrics() {
        let result = Draftpress::new().parse("Hello world");
        let narrow = |text: &str, size: f32, _bold: bool| {
            TextExtent::new(text.len() as f32, size * 0.35)
        };
        let pages = result.layout_with(&narrow);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].plain_text(), "Hello world");
    }
}
