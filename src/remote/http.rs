//! JSON-over-HTTP document collaborator.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{DocumentCollaborator, RemoteDocument, RemoteDocumentRequest};
use crate::error::{Error, Result};

/// Response envelope returned by the document service.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    data: Option<RemoteDocument>,
    message: Option<String>,
}

impl Envelope {
    fn into_document(self) -> Result<RemoteDocument> {
        match (self.success, self.data) {
            (true, Some(document)) => Ok(document),
            (true, None) => Err(Error::Remote(
                "response did not include a document".to_string(),
            )),
            (false, _) => Err(Error::Remote(
                self.message
                    .unwrap_or_else(|| "document service reported failure".to_string()),
            )),
        }
    }
}

/// Posts `{title, content}` to a document service endpoint.
///
/// Credentials are sent as a bearer token. The client is constructed
/// explicitly and injected into an [`Exporter`](crate::export::Exporter).
#[derive(Debug, Clone)]
pub struct HttpDocumentCollaborator {
    client: reqwest::Client,
    endpoint: String,
    credentials: String,
}

impl HttpDocumentCollaborator {
    /// Create a collaborator for `endpoint` authenticated with `credentials`.
    pub fn new(endpoint: impl Into<String>, credentials: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            credentials: credentials.into(),
        }
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DocumentCollaborator for HttpDocumentCollaborator {
    async fn create_document(&self, request: &RemoteDocumentRequest) -> Result<RemoteDocument> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.credentials)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or(body);
            return Err(Error::Remote(format!("{}: {}", status, message)));
        }

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| Error::Remote(format!("Failed to parse response: {}", e)))?;
        envelope.into_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<RemoteDocument> {
        serde_json::from_str::<Envelope>(body).unwrap().into_document()
    }

    #[test]
    fn test_success_envelope() {
        let document = parse(
            r#"{"success":true,"data":{"documentId":"42","documentUrl":"https://docs.example.com/d/42/edit"}}"#,
        )
        .unwrap();
        assert_eq!(document.document_id, "42");
        assert_eq!(document.document_url, "https://docs.example.com/d/42/edit");
    }

    #[test]
    fn test_failure_envelope() {
        let err = parse(r#"{"success":false,"message":"Content and title are required"}"#)
            .unwrap_err();
        assert!(
            matches!(err, Error::Remote(ref msg) if msg == "Content and title are required")
        );
    }

    #[test]
    fn test_success_without_data() {
        assert!(matches!(
            parse(r#"{"success":true}"#),
            Err(Error::Remote(_))
        ));
    }

    /// Serve one request with a canned response and return the raw request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/documents", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length || n == 0 {
                        break;
                    }
                } else if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8(raw).unwrap()
        });

        (endpoint, handle)
    }

    #[tokio::test]
    async fn test_posts_json_with_bearer_token() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"success":true,"data":{"documentId":"7","documentUrl":"https://docs.example.com/d/7/edit"}}"#,
        )
        .await;
        let collaborator = HttpDocumentCollaborator::new(endpoint, "secret-token");

        let document = collaborator
            .create_document(&RemoteDocumentRequest::new("Weekly update", "Title\nBody"))
            .await
            .unwrap();
        assert_eq!(document.document_id, "7");
        assert_eq!(document.document_url, "https://docs.example.com/d/7/edit");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /documents HTTP/1.1\r\n"));
        let lower = raw.to_ascii_lowercase();
        assert!(lower.contains("authorization: bearer secret-token"));
        assert!(lower.contains("content-type: application/json"));

        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Weekly update", "content": "Title\nBody"})
        );
    }

    #[tokio::test]
    async fn test_error_status_reports_message() {
        let (endpoint, server) = serve_once(
            "400 Bad Request",
            r#"{"success":false,"message":"Content and title are required"}"#,
        )
        .await;
        let collaborator = HttpDocumentCollaborator::new(endpoint, "token");

        let err = collaborator
            .create_document(&RemoteDocumentRequest::new("t", "c"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, Error::Remote(ref msg) if msg == "400 Bad Request: Content and title are required"),
            "unexpected error: {}",
            err
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_with_plain_body() {
        let (endpoint, server) = serve_once("502 Bad Gateway", "upstream down").await;
        let collaborator = HttpDocumentCollaborator::new(endpoint, "token");

        let err = collaborator
            .create_document(&RemoteDocumentRequest::new("t", "c"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Remote(ref msg) if msg == "502 Bad Gateway: upstream down"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_success_status_with_failure_envelope() {
        let (endpoint, server) =
            serve_once("200 OK", r#"{"success":false,"message":"quota exceeded"}"#).await;
        let collaborator = HttpDocumentCollaborator::new(endpoint, "token");

        let err = collaborator
            .create_document(&RemoteDocumentRequest::new("t", "c"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Remote(ref msg) if msg == "quota exceeded"));
        server.await.unwrap();
    }

    #[test]
    fn test_with_timeout() {
        let collaborator = HttpDocumentCollaborator::new("http://localhost:9/docs", "token")
            .with_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(collaborator.endpoint(), "http://localhost:9/docs");
    }
}
