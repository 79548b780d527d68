//! Backend trait over the generation and segmentation routes.
//!
//! The [`Backend`] trait abstracts the hosted service behind the two routes
//! the client touches, so runs can execute against a live HTTP service
//! ([`HttpBackend`]) or canned responses ([`MockBackend`]) without the
//! orchestration layer knowing the difference.
//!
//! ```text
//! generator ──► Backend::begin_stream() ──► byte chunks ──► StreamAssembler
//!          └──► Backend::complete()     ──► whole body
//!          └──► Backend::segment()      ──► success/failure only
//! ```

pub mod http;
pub mod mock;

pub use http::HttpBackend;
pub use mock::{MockBackend, MockResponse};

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use reqwest::Client;

/// Raw response-body chunks, delivered as the server paces them.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>>>;

/// Abstraction over the generation service.
///
/// Object-safe and designed to be used as `Arc<dyn Backend>`. A non-success
/// status from any route surfaces as [`LoreError::Http`](crate::LoreError::Http)
/// and is fatal for that call; no retry is attempted.
#[async_trait]
pub trait Backend: Send + Sync {
    /// POST the prompt to the generation route and hand back the response
    /// body as a chunk stream. The stream ends when the server closes it;
    /// no terminator token is checked.
    async fn begin_stream(
        &self,
        client: &Client,
        base_url: &str,
        prompt: &str,
    ) -> Result<ByteStream>;

    /// Non-streaming variant: the whole response body awaited as one message.
    async fn complete(&self, client: &Client, base_url: &str, prompt: &str) -> Result<String>;

    /// Fire the segmentation route; only the success/failure signal is used.
    async fn segment(&self, client: &Client, base_url: &str, text: &str) -> Result<()>;

    /// Human-readable name for diagnostics.
    fn name(&self) -> &'static str;
}
