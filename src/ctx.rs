//! Run context shared across generation calls.
//!
//! [`RunCtx`] carries the HTTP client, service base URL, backend, pacing
//! delays, and optional event handler. Construct one and share it across
//! every call for a story. There is deliberately no cancellation handle:
//! once a run starts, it runs to completion or error.

use crate::backend::{Backend, HttpBackend};
use crate::events::EventHandler;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Fixed waits inserted into the per-sentence loop.
///
/// These are plain settle delays, not a backpressure protocol: the stream
/// itself already signals completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Wait between sending a request and reading its stream.
    pub pre_read: Duration,
    /// Wait after each sentence completes.
    pub post_scene: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            pre_read: Duration::from_millis(100),
            post_scene: Duration::from_millis(1000),
        }
    }
}

impl Pacing {
    /// No waits at all. Intended for tests and mock backends.
    pub fn none() -> Self {
        Self {
            pre_read: Duration::ZERO,
            post_scene: Duration::ZERO,
        }
    }
}

/// Shared context for generation runs.
///
/// # Example
///
/// ```
/// use lore_machine::RunCtx;
///
/// let ctx = RunCtx::builder("http://localhost:3000").build();
/// ```
pub struct RunCtx {
    /// HTTP client (cheap to clone -- uses `Arc` internally).
    pub client: Client,
    /// Base URL of the generation service.
    pub base_url: String,
    /// Service backend. Default: [`HttpBackend`].
    pub backend: Arc<dyn Backend>,
    /// Fixed per-sentence waits. Default: [`Pacing::default`].
    pub pacing: Pacing,
    /// Optional event handler for run lifecycle events.
    pub event_handler: Option<Arc<dyn EventHandler>>,
}

impl RunCtx {
    /// Create a new builder.
    pub fn builder(base_url: impl Into<String>) -> RunCtxBuilder {
        RunCtxBuilder {
            client: None,
            base_url: base_url.into(),
            backend: None,
            pacing: None,
            event_handler: None,
            timeout: None,
        }
    }
}

impl std::fmt::Debug for RunCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunCtx")
            .field("base_url", &self.base_url)
            .field("backend", &self.backend.name())
            .field("pacing", &self.pacing)
            .field("has_event_handler", &self.event_handler.is_some())
            .finish()
    }
}

/// Builder for [`RunCtx`].
pub struct RunCtxBuilder {
    client: Option<Client>,
    base_url: String,
    backend: Option<Arc<dyn Backend>>,
    pacing: Option<Pacing>,
    event_handler: Option<Arc<dyn EventHandler>>,
    timeout: Option<Duration>,
}

impl RunCtxBuilder {
    /// Set the HTTP client. If not set, a default client is created.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the backend. Default: [`HttpBackend`].
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the per-sentence pacing. Default: [`Pacing::default`].
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Set the event handler.
    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Set the request timeout. Default: 60 seconds.
    ///
    /// Applies only to the default client; a custom client passed via
    /// [`client`](Self::client) keeps its own timeout. Note the timeout
    /// covers the whole request including the body read, so a long stream
    /// needs a generous value.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the run context.
    pub fn build(self) -> RunCtx {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(60));
        let client = self.client.unwrap_or_else(|| {
            Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client")
        });
        RunCtx {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            backend: self.backend.unwrap_or_else(|| Arc::new(HttpBackend)),
            pacing: self.pacing.unwrap_or_default(),
            event_handler: self.event_handler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let ctx = RunCtx::builder("http://localhost:3000").build();
        assert_eq!(ctx.base_url, "http://localhost:3000");
        assert_eq!(ctx.backend.name(), "http");
        assert_eq!(ctx.pacing, Pacing::default());
        assert!(ctx.event_handler.is_none());
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let ctx = RunCtx::builder("http://localhost:3000/").build();
        assert_eq!(ctx.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_pacing_defaults() {
        let pacing = Pacing::default();
        assert_eq!(pacing.pre_read, Duration::from_millis(100));
        assert_eq!(pacing.post_scene, Duration::from_millis(1000));
    }

    #[test]
    fn test_pacing_none_is_zero() {
        let pacing = Pacing::none();
        assert_eq!(pacing.pre_read, Duration::ZERO);
        assert_eq!(pacing.post_scene, Duration::ZERO);
    }

    #[test]
    fn test_debug_does_not_require_handler() {
        let ctx = RunCtx::builder("http://x").pacing(Pacing::none()).build();
        let debug = format!("{:?}", ctx);
        assert!(debug.contains("http://x"));
        assert!(debug.contains("http"));
    }
}
