//! Stream assembly for the generation route's chunked response body.
//!
//! The service streams newline-delimited lines, each optionally prefixed
//! with `data: ` and carrying a JSON payload. A line's payload contributes
//! to the assembled text buffer when it is either an object with a string
//! `text` field or a bare JSON string; anything else is dropped with a
//! diagnostic. Lines are framed across chunk boundaries, so a JSON payload
//! split over two TCP chunks still parses.

use serde_json::Value;
use tracing::{debug, warn};

/// Buffered assembler for the generation stream.
///
/// Feed raw chunks as they arrive, then call [`finish`](Self::finish) once
/// the stream reports completion to obtain the assembled buffer. There is
/// no timeout and no cap on buffer growth; pacing is entirely the server's.
///
/// # Example
///
/// ```
/// use lore_machine::StreamAssembler;
///
/// let mut assembler = StreamAssembler::new();
/// assembler.feed(b"data: {\"text\":\"ab\"}\n");
/// assembler.feed(b"data: {\"text\":\"cd\"}\n");
/// assert_eq!(assembler.finish(), "abcd");
/// ```
#[derive(Debug, Default)]
pub struct StreamAssembler {
    /// Partial line carried over between chunks.
    pending: String,
    /// Text fragments recovered so far.
    buffer: String,
}

impl StreamAssembler {
    /// Create a new empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw chunk and return the text fragments it completed.
    ///
    /// Incomplete trailing lines are buffered until the next chunk (or
    /// [`finish`](Self::finish)). Fragments are also appended to the
    /// internal buffer, so the return value is only needed for progress
    /// reporting.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = String::from_utf8_lossy(chunk);
        self.pending.push_str(&text);

        let mut fragments = Vec::new();
        while let Some(pos) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=pos).collect();
            if let Some(fragment) = self.consume_line(&line) {
                fragments.push(fragment);
            }
        }
        fragments
    }

    /// The text assembled so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Drain any trailing unterminated line and return the assembled buffer.
    ///
    /// Call once the underlying stream signals no more data.
    pub fn finish(mut self) -> String {
        let trailing = std::mem::take(&mut self.pending);
        self.consume_line(&trailing);
        self.buffer
    }

    /// Process one decoded line: strip the `data: ` marker if present,
    /// parse as JSON, and append any recovered text to the buffer.
    fn consume_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let payload = line
            .strip_prefix("data: ")
            .or_else(|| line.strip_prefix("data:"))
            .unwrap_or(line)
            .trim();
        if payload.is_empty() {
            return None;
        }

        match serde_json::from_str::<Value>(payload) {
            Ok(Value::String(text)) => {
                self.buffer.push_str(&text);
                Some(text)
            }
            Ok(value) => match value.get("text").and_then(|t| t.as_str()) {
                Some(text) => {
                    self.buffer.push_str(text);
                    Some(text.to_string())
                }
                None => {
                    debug!(line = payload, "stream line carries no text field, dropped");
                    None
                }
            },
            Err(err) => {
                warn!(%err, line = payload, "invalid JSON stream line dropped");
                None
            }
        }
    }
}
