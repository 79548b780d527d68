//! Backend talking to the hosted generation service over HTTP.
//!
//! Routes: `/api/generate` takes `{"prompt": ...}` and answers with either
//! a streamed body or one complete message; `/api/segment_paragraphs` takes
//! `{"text": ...}` and is consumed only for its status.

use super::{Backend, ByteStream};
use crate::error::{LoreError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};

/// The live HTTP backend.
#[derive(Debug, Clone, Default)]
pub struct HttpBackend;

impl HttpBackend {
    /// POST a JSON body and check the status before handing the response back.
    async fn post(client: &Client, url: &str, body: &Value) -> Result<reqwest::Response> {
        let resp = client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| LoreError::Other(format!("Failed to connect to {}: {}", url, e)))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LoreError::Http { status, body });
        }
        Ok(resp)
    }

    fn route(base_url: &str, path: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn begin_stream(
        &self,
        client: &Client,
        base_url: &str,
        prompt: &str,
    ) -> Result<ByteStream> {
        let url = Self::route(base_url, "/api/generate");
        let resp = Self::post(client, &url, &json!({ "prompt": prompt })).await?;
        let stream = resp
            .bytes_stream()
            .map(|chunk| chunk.map(|b| b.to_vec()).map_err(LoreError::Request));
        Ok(stream.boxed())
    }

    async fn complete(&self, client: &Client, base_url: &str, prompt: &str) -> Result<String> {
        let url = Self::route(base_url, "/api/generate");
        let resp = Self::post(client, &url, &json!({ "prompt": prompt })).await?;
        Ok(resp.text().await?)
    }

    async fn segment(&self, client: &Client, base_url: &str, text: &str) -> Result<()> {
        let url = Self::route(base_url, "/api/segment_paragraphs");
        Self::post(client, &url, &json!({ "text": text })).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_joins_single_slash() {
        assert_eq!(
            HttpBackend::route("http://localhost:3000", "/api/generate"),
            "http://localhost:3000/api/generate"
        );
        assert_eq!(
            HttpBackend::route("http://localhost:3000/", "/api/generate"),
            "http://localhost:3000/api/generate"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connect_error() {
        let backend = HttpBackend;
        let client = Client::new();
        // Port 1 on localhost should refuse immediately
        let result = backend.complete(&client, "http://127.0.0.1:1", "hi").await;
        assert!(matches!(result, Err(LoreError::Other(_))));
    }
}
