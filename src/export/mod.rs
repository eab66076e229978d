//! Export dispatcher.
//!
//! An [`Exporter`] validates a request, parses its content once and routes the
//! blocks to one of three backends: the pagination engine plus PDF writer, the
//! paragraph builder plus DOCX writer, or the remote plain-text adapter.
//!
//! # Example
//!
//! ```no_run
//! use draftpress::export::{ExportArtifact, ExportFormat, ExportRequest, Exporter};
//!
//! fn main() -> draftpress::Result<()> {
//!     let exporter = Exporter::new();
//!     let request = ExportRequest::new("# Jane Doe\n* Rust", ExportFormat::Print, "Jane Doe");
//!     let file = exporter.export_file(&request)?;
//!     file.write_to(".")?;
//!     Ok(())
//! }
//! ```

mod format;
mod title;

pub use format::{DocumentKind, ExportFormat};
pub use title::{sanitize_title, DEFAULT_TITLE};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::layout::{layout, LayoutOptions, StandardFontMetrics, TextMeasure};
use crate::model::Block;
use crate::parser::parse;
use crate::remote::{self, DocumentCollaborator, RemoteDocument};
use crate::render::{build_paragraphs, to_docx, to_pdf, DocumentInfo, DocxOptions, DEFAULT_PRODUCER};

/// Options shared by every export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Print layout options
    pub layout: LayoutOptions,

    /// Word-processor options
    pub docx: DocxOptions,

    /// Creation timestamp written into file metadata
    pub created: Option<DateTime<Utc>>,

    /// Producer written into file metadata
    pub producer: String,
}

impl ExportOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the print layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set the word-processor options.
    pub fn with_docx(mut self, docx: DocxOptions) -> Self {
        self.docx = docx;
        self
    }

    /// Record a creation timestamp in file metadata.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Set the producer string.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    fn document_info(&self, title: &str) -> DocumentInfo {
        DocumentInfo {
            title: Some(title.to_string()),
            producer: self.producer.clone(),
            created: self.created,
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            docx: DocxOptions::default(),
            created: None,
            producer: DEFAULT_PRODUCER.to_string(),
        }
    }
}

/// A single export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Notation text to export
    pub content: String,

    /// Output target
    pub format: ExportFormat,

    /// Free-form title hint
    pub title: String,

    /// Kind of drafted document
    pub kind: Option<DocumentKind>,
}

impl ExportRequest {
    /// Create a new request.
    pub fn new(content: impl Into<String>, format: ExportFormat, title: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format,
            title: title.into(),
            kind: None,
        }
    }

    /// Set the document kind, which prefixes the output name.
    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Get the sanitized title used for filenames and metadata.
    pub fn resolved_title(&self) -> String {
        let stem = sanitize_title(&self.title);
        match self.kind {
            Some(kind) => format!("{}{}", kind.prefix(), stem),
            None => stem,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(Error::MissingField("content"));
        }
        Ok(())
    }
}

/// A generated file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Suggested filename (`<title>.pdf` or `<title>.docx`)
    pub filename: String,

    /// MIME type of the content
    pub mime_type: &'static str,

    /// File content
    pub bytes: Vec<u8>,

    /// Format that produced the file
    pub format: ExportFormat,
}

impl ExportedFile {
    /// Get the content length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the file into `dir` under its filename.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        log::debug!("Wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}

/// Result of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportArtifact {
    /// A generated file
    File(ExportedFile),
    /// A document created on the remote service
    Remote(RemoteDocument),
}

impl ExportArtifact {
    /// Get the generated file, if any.
    pub fn as_file(&self) -> Option<&ExportedFile> {
        match self {
            ExportArtifact::File(file) => Some(file),
            ExportArtifact::Remote(_) => None,
        }
    }

    /// Get the remote document, if any.
    pub fn as_remote(&self) -> Option<&RemoteDocument> {
        match self {
            ExportArtifact::File(_) => None,
            ExportArtifact::Remote(document) => Some(document),
        }
    }
}

/// Routes export requests to the matching backend.
///
/// `Exporter` holds no mutable state and can be shared behind an `Arc`.
#[derive(Clone)]
pub struct Exporter {
    options: ExportOptions,
    measure: Arc<dyn TextMeasure + Send + Sync>,
    collaborator: Option<Arc<dyn DocumentCollaborator>>,
}

impl Exporter {
    /// Create an exporter with default options and the standard font metrics.
    pub fn new() -> Self {
        Self {
            options: ExportOptions::default(),
            measure: Arc::new(StandardFontMetrics),
            collaborator: None,
        }
    }

    /// Set export options.
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the text measurer used for print layout.
    pub fn with_measure(mut self, measure: Arc<dyn TextMeasure + Send + Sync>) -> Self {
        self.measure = measure;
        self
    }

    /// Set the remote document collaborator.
    pub fn with_collaborator(mut self, collaborator: Arc<dyn DocumentCollaborator>) -> Self {
        self.collaborator = Some(collaborator);
        self
    }

    /// Get the export options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Check if remote export is available.
    pub fn has_collaborator(&self) -> bool {
        self.collaborator.is_some()
    }

    /// Export a request to any format.
    pub async fn export(&self, request: &ExportRequest) -> Result<ExportArtifact> {
        request.validate()?;

        if request.format.is_remote() {
            let collaborator = self.collaborator.as_deref().ok_or(Error::NoCollaborator)?;
            let title = request.resolved_title();
            let blocks = parse(&request.content);
            let document = remote::publish(collaborator, &title, &blocks).await?;
            log::info!("Exported '{}' to {}", title, document.document_url);
            return Ok(ExportArtifact::Remote(document));
        }

        self.export_file(request).map(ExportArtifact::File)
    }

    /// Export a request to a local file format.
    ///
    /// Remote requests are rejected with [`Error::UnsupportedFormat`].
    pub fn export_file(&self, request: &ExportRequest) -> Result<ExportedFile> {
        let render: fn(&Self, &[Block], &str) -> Result<ExportedFile> = match request.format {
            ExportFormat::Print => Self::render_print,
            ExportFormat::WordProcessor => Self::render_word,
            ExportFormat::Remote => {
                return Err(Error::UnsupportedFormat(
                    "remote export is not a local file format".to_string(),
                ))
            }
        };
        request.validate()?;

        let title = request.resolved_title();
        let blocks = parse(&request.content);
        let file = render(self, &blocks, &title)?;

        log::info!(
            "Exported '{}' ({}, {} bytes)",
            file.filename,
            file.format,
            file.bytes.len()
        );
        Ok(file)
    }

    fn render_print(&self, blocks: &[Block], title: &str) -> Result<ExportedFile> {
        let layout_options = &self.options.layout;
        let pages = layout(blocks, layout_options, self.measure.as_ref());
        let bytes = to_pdf(&pages, layout_options.page_size, &self.options.document_info(title))?;
        Ok(file_for(ExportFormat::Print, title, bytes))
    }

    fn render_word(&self, blocks: &[Block], title: &str) -> Result<ExportedFile> {
        let paragraphs = build_paragraphs(blocks);
        let bytes = to_docx(&paragraphs, &self.options.docx, &self.options.document_info(title))?;
        Ok(file_for(ExportFormat::WordProcessor, title, bytes))
    }
}

fn file_for(format: ExportFormat, title: &str, bytes: Vec<u8>) -> ExportedFile {
    let extension = format.extension().unwrap_or("bin");
    ExportedFile {
        filename: format!("{}.{}", title, extension),
        mime_type: format.mime_type().unwrap_or("application/octet-stream"),
        bytes,
        format,
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Exporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exporter")
            .field("options", &self.options)
            .field("has_collaborator", &self.collaborator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_title_with_kind() {
        let request = ExportRequest::new("x", ExportFormat::Print, "Senior Engineer")
            .with_kind(DocumentKind::Resume);
        assert_eq!(request.resolved_title(), "resume_Senior_Engineer");

        let request = ExportRequest::new("x", ExportFormat::Print, "");
        assert_eq!(request.resolved_title(), "document");
    }

    #[test]
    fn test_empty_content_rejected() {
        let exporter = Exporter::new();
        let request = ExportRequest::new(" \n ", ExportFormat::Print, "t");
        let err = exporter.export_file(&request).unwrap_err();
        assert!(matches!(err, Error::MissingField("content")));
    }

    #[test]
    fn test_export_print() {
        let exporter = Exporter::new();
        let request = ExportRequest::new("# Hello\nWorld", ExportFormat::Print, "Greeting");
        let file = exporter.export_file(&request).unwrap();

        assert_eq!(file.filename, "Greeting.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert!(file.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_word() {
        let exporter = Exporter::new();
        let request = ExportRequest::new("# Hello\n* World", ExportFormat::WordProcessor, "Greeting")
            .with_kind(DocumentKind::Email);
        let file = exporter.export_file(&request).unwrap();

        assert_eq!(file.filename, "email_Greeting.docx");
        assert_eq!(file.format, ExportFormat::WordProcessor);
        assert!(file.bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_export_file_rejects_remote() {
        let exporter = Exporter::new();
        let request = ExportRequest::new("Hello", ExportFormat::Remote, "t");
        assert!(matches!(
            exporter.export_file(&request),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_export_file_checks_format_first() {
        let exporter = Exporter::new();
        let request = ExportRequest::new("   ", ExportFormat::Remote, "t");
        assert!(matches!(
            exporter.export_file(&request),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_remote_without_collaborator() {
        let exporter = Exporter::new();
        let request = ExportRequest::new("Hello", ExportFormat::Remote, "t");
        let err = exporter.export(&request).await.unwrap_err();
        assert!(matches!(err, Error::NoCollaborator));
    }

    #[test]
    fn test_custom_measure() {
        let wide = |text: &str, size: f32, _bold: bool| {
            crate::layout::TextExtent::new(text.chars().count() as f32 * 50.0, size * 0.5)
        };
        let exporter = Exporter::new().with_measure(Arc::new(wide));
        let request = ExportRequest::new("one two three four", ExportFormat::Print, "t");
        assert!(exporter.export_file(&request).is_ok());
    }

    #[test]
    fn test_exporter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Exporter>();
    }
}
