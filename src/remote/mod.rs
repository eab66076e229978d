//! Remote collaborative document service.
//!
//! The service only accepts plain text, so every block is flattened with
//! [`to_plain_text`](crate::render::to_plain_text) before it is sent. The
//! transport is abstracted behind [`DocumentCollaborator`] so hosts can inject
//! their own client; [`HttpDocumentCollaborator`] covers the JSON endpoint.

#[cfg(feature = "remote")]
mod http;

#[cfg(feature = "remote")]
pub use http::HttpDocumentCollaborator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Block;
use crate::render::to_plain_text;

/// Request body for creating a remote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDocumentRequest {
    /// Document title
    pub title: String,

    /// Formatting-free document text
    pub content: String,
}

impl RemoteDocumentRequest {
    /// Create a new request.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A document created by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    /// Service-assigned identifier
    pub document_id: String,

    /// URL where the document can be opened
    pub document_url: String,
}

/// Creates documents on a remote collaborative service.
#[async_trait]
pub trait DocumentCollaborator: Send + Sync {
    /// Create a document from plain text.
    async fn create_document(&self, request: &RemoteDocumentRequest) -> Result<RemoteDocument>;
}

/// Flatten `blocks` to plain text and create a remote document from them.
///
/// Failures from the collaborator are returned unchanged; there are no
/// retries.
pub async fn publish(
    collaborator: &dyn DocumentCollaborator,
    title: &str,
    blocks: &[Block],
) -> Result<RemoteDocument> {
    if title.trim().is_empty() {
        return Err(Error::MissingField("title"));
    }

    let request = RemoteDocumentRequest::new(title, to_plain_text(blocks));
    log::debug!(
        "Publishing '{}' ({} bytes of text)",
        request.title,
        request.content.len()
    );

    match collaborator.create_document(&request).await {
        Ok(document) => {
            log::info!("Created remote document {}", document.document_id);
            Ok(document)
        }
        Err(e) => {
            log::warn!("Remote document creation failed: {}", e);
            Err(e)
        }
    }
}
