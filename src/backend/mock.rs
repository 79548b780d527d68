//! Mock backend for testing without a live generation service.
//!
//! [`MockBackend`] replays scripted responses in order, allowing
//! deterministic end-to-end runs. Cycles back to the beginning when all
//! responses have been consumed.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;

use super::{Backend, ByteStream};
use crate::error::{LoreError, Result};

/// One scripted reply from the mock service.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Streamed reply delivered as these raw chunks.
    Chunks(Vec<Vec<u8>>),
    /// Whole-body reply.
    Body(String),
    /// Non-success HTTP status.
    Status(u16, String),
}

impl MockResponse {
    /// Streamed reply with one newline-terminated `data: ` line per entry.
    pub fn data_lines(lines: &[&str]) -> Self {
        MockResponse::Chunks(
            lines
                .iter()
                .map(|l| format!("data: {}\n", l).into_bytes())
                .collect(),
        )
    }
}

/// A test backend that returns canned responses in order.
#[derive(Debug)]
pub struct MockBackend {
    responses: Vec<MockResponse>,
    index: AtomicUsize,
}

impl MockBackend {
    /// Create a mock backend with the given scripted responses.
    ///
    /// Responses are returned in call order. When exhausted, cycles from
    /// the beginning.
    pub fn new(responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "MockBackend requires at least one response"
        );
        Self {
            responses,
            index: AtomicUsize::new(0),
        }
    }

    /// Create a mock that always returns the same whole-body response.
    pub fn fixed(body: impl Into<String>) -> Self {
        Self::new(vec![MockResponse::Body(body.into())])
    }

    fn next_response(&self) -> MockResponse {
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % self.responses.len();
        self.responses[idx].clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn begin_stream(
        &self,
        _client: &Client,
        _base_url: &str,
        _prompt: &str,
    ) -> Result<ByteStream> {
        match self.next_response() {
            MockResponse::Chunks(chunks) => {
                Ok(futures::stream::iter(chunks.into_iter().map(Ok)).boxed())
            }
            MockResponse::Body(body) => {
                Ok(futures::stream::iter(vec![Ok(body.into_bytes())]).boxed())
            }
            MockResponse::Status(status, body) => Err(LoreError::Http { status, body }),
        }
    }

    async fn complete(&self, _client: &Client, _base_url: &str, _prompt: &str) -> Result<String> {
        match self.next_response() {
            MockResponse::Body(body) => Ok(body),
            MockResponse::Chunks(chunks) => {
                Ok(String::from_utf8_lossy(&chunks.concat()).into_owned())
            }
            MockResponse::Status(status, body) => Err(LoreError::Http { status, body }),
        }
    }

    async fn segment(&self, _client: &Client, _base_url: &str, _text: &str) -> Result<()> {
        match self.next_response() {
            MockResponse::Status(status, body) => Err(LoreError::Http { status, body }),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn client() -> Client {
        Client::new()
    }

    #[tokio::test]
    async fn test_mock_fixed_body() {
        let mock = MockBackend::fixed("hello");
        let body = mock.complete(&client(), "http://unused", "p").await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_mock_cycles_responses() {
        let mock = MockBackend::new(vec![
            MockResponse::Body("first".into()),
            MockResponse::Body("second".into()),
        ]);
        let c = client();
        assert_eq!(mock.complete(&c, "u", "p").await.unwrap(), "first");
        assert_eq!(mock.complete(&c, "u", "p").await.unwrap(), "second");
        assert_eq!(mock.complete(&c, "u", "p").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_mock_streams_chunks() {
        let mock = MockBackend::new(vec![MockResponse::Chunks(vec![
            b"ab".to_vec(),
            b"cd".to_vec(),
        ])]);
        let mut stream = mock
            .begin_stream(&client(), "http://unused", "p")
            .await
            .unwrap();
        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend(chunk.unwrap());
        }
        assert_eq!(collected, b"abcd");
    }

    #[tokio::test]
    async fn test_mock_status_is_http_error() {
        let mock = MockBackend::new(vec![MockResponse::Status(500, "boom".into())]);
        let result = mock.begin_stream(&client(), "u", "p").await;
        match result {
            Err(LoreError::Http { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Http error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_data_lines_helper() {
        let resp = MockResponse::data_lines(&[r#"{"text":"a"}"#, r#"{"text":"b"}"#]);
        match resp {
            MockResponse::Chunks(chunks) => {
                assert_eq!(chunks.len(), 2);
                assert_eq!(chunks[0], b"data: {\"text\":\"a\"}\n".to_vec());
            }
            _ => panic!("expected chunks"),
        }
    }
}
