//! Export targets and document kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Output target of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Paginated print document (PDF)
    Print,
    /// Reflowable word-processor document (DOCX)
    WordProcessor,
    /// Plain-text document on a remote collaborative service
    Remote,
}

impl ExportFormat {
    /// File extension for file-producing formats.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ExportFormat::Print => Some("pdf"),
            ExportFormat::WordProcessor => Some("docx"),
            ExportFormat::Remote => None,
        }
    }

    /// MIME type for file-producing formats.
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            ExportFormat::Print => Some("application/pdf"),
            ExportFormat::WordProcessor => Some(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
            ExportFormat::Remote => None,
        }
    }

    /// Check if the format needs a remote collaborator.
    pub fn is_remote(&self) -> bool {
        matches!(self, ExportFormat::Remote)
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "print" | "pdf" => Ok(ExportFormat::Print),
            "word" | "docx" | "word-processor" | "wordprocessor" => Ok(ExportFormat::WordProcessor),
            "remote" | "google-docs" | "gdocs" => Ok(ExportFormat::Remote),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Print => "pdf",
            ExportFormat::WordProcessor => "docx",
            ExportFormat::Remote => "remote",
        };
        f.write_str(name)
    }
}

/// Kind of drafted document, used to prefix output names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Email,
    Resume,
    CoverLetter,
    BlogPost,
}

impl DocumentKind {
    /// Filename prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Email => "email_",
            DocumentKind::Resume => "resume_",
            DocumentKind::CoverLetter => "cover_letter_",
            DocumentKind::BlogPost => "blog_",
        }
    }
}

impl FromStr for DocumentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "email" => Ok(DocumentKind::Email),
            "resume" => Ok(DocumentKind::Resume),
            "cover_letter" | "coverletter" => Ok(DocumentKind::CoverLetter),
            "blog" | "blog_post" | "blogpost" => Ok(DocumentKind::BlogPost),
            _ => Err(Error::UnsupportedFormat(format!("document kind '{}'", s))),
        }
    }
}
