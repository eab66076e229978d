//! Rendering options and document metadata.

use crate::layout::PageSize;
use chrono::{DateTime, Utc};

/// Default producer string written into PDF and DOCX metadata.
pub const DEFAULT_PRODUCER: &str = concat!("draftpress ", env!("CARGO_PKG_VERSION"));

/// Metadata embedded in generated files.
///
/// `created` is `None` by default so output stays byte-identical across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,

    /// Producing application
    pub producer: String,

    /// Creation timestamp
    pub created: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    /// Create metadata with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the producer.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    /// Set the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: None,
            producer: DEFAULT_PRODUCER.to_string(),
            created: None,
        }
    }
}

/// Options for word-processor output.
///
/// Spacing values are twentieths of a point, as stored in WordprocessingML.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxOptions {
    /// Page size of the single section
    pub page_size: PageSize,

    /// Page margin in millimetres
    pub margin: f32,

    /// Space after headings
    pub heading_spacing_after: u32,

    /// Space after body paragraphs
    pub body_spacing_after: u32,

    /// Space after bullet items
    pub bullet_spacing_after: u32,

    /// Space after spacer paragraphs
    pub spacer_spacing_after: u32,
}

impl DocxOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }
}

impl Default for DocxOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 20.0,
            heading_spacing_after: 200,
            body_spacing_after: 100,
            bullet_spacing_after: 100,
            spacer_spacing_after: 200,
        }
    }
}
