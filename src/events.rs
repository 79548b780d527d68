//! Event system for run lifecycle and streaming hooks.
//!
//! Provides an optional, non-intrusive way to observe a generation run.
//! The run emits events as sentences start, fragments arrive, and scenes
//! are accepted or skipped. Implement [`EventHandler`] to receive them for
//! progress display or logging; runs work without a handler.

use std::sync::Arc;

/// Events emitted during a generation run.
#[derive(Debug, Clone)]
pub enum Event {
    /// A run has started.
    RunStart {
        /// Number of sentences the story split into.
        sentences: usize,
    },
    /// Work on one sentence has started.
    SentenceStart {
        /// 1-based sentence index.
        id: usize,
        /// The sentence text.
        sentence: String,
    },
    /// A text fragment was recovered from the stream.
    Fragment {
        /// 1-based sentence index the fragment belongs to.
        id: usize,
        /// The fragment text.
        text: String,
    },
    /// A sentence's buffer parsed into a scene.
    SceneAccepted {
        /// 1-based sentence index.
        id: usize,
        /// Whether brace patching was needed before the parse.
        repaired: bool,
    },
    /// A sentence's buffer did not parse even after repair; the run continues.
    SceneSkipped {
        /// 1-based sentence index.
        id: usize,
        /// Why the scene was dropped.
        reason: String,
    },
    /// The run has finished.
    RunEnd {
        /// Number of scenes accepted into the lore.
        accepted: usize,
    },
}

/// Handler for run lifecycle events.
///
/// # Example
///
/// ```
/// use lore_machine::events::{Event, EventHandler};
///
/// struct PrintHandler;
///
/// impl EventHandler for PrintHandler {
///     fn on_event(&self, event: Event) {
///         if let Event::SceneAccepted { id, .. } = event {
///             println!("scene {} accepted", id);
///         }
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// Called when the run emits an event.
    fn on_event(&self, event: Event);
}

/// Emit an event if a handler is present. No-op otherwise.
pub(crate) fn emit(handler: &Option<Arc<dyn EventHandler>>, event: Event) {
    if let Some(ref h) = handler {
        h.on_event(event);
    }
}

/// An [`EventHandler`] backed by a closure.
///
/// # Example
///
/// ```
/// use lore_machine::events::{Event, FnEventHandler};
/// use std::sync::Arc;
///
/// let handler = Arc::new(FnEventHandler(|event: Event| {
///     if let Event::Fragment { text, .. } = event {
///         print!("{}", text);
///     }
/// }));
/// ```
pub struct FnEventHandler<F: Fn(Event) + Send + Sync>(pub F);

impl<F: Fn(Event) + Send + Sync> EventHandler for FnEventHandler<F> {
    fn on_event(&self, event: Event) {
        (self.0)(event);
    }
}
