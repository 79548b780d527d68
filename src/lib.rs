//! # Lore Machine
//!
//! Client for turning a free-text story into "lore": an ordered collection
//! of per-sentence scene objects produced by a hosted generation service.
//!
//! The crate covers everything between the story text and the lore file:
//! **prompt building**, **request dispatch** to the generation route,
//! **stream assembly** of the chunked response, heuristic **buffer repair**,
//! and the **scene accumulator** that serializes the result.
//!
//! ## Core concepts
//!
//! - **[`RunCtx`]** — shared context (HTTP client, base URL, backend,
//!   pacing, optional event handler) built once per story.
//! - **[`generate_lore`]** — the streaming variant: one request per
//!   sentence, strictly sequential, scenes accumulated into a [`Lore`].
//! - **[`generate_json`]** — the non-streaming variant: one whole-story
//!   request parsed directly.
//! - **[`StreamAssembler`]** / **[`repair`]** — chunked-line salvage and the
//!   brace patch applied before the final parse.
//! - **[`Backend`]** — seam over the service routes; [`MockBackend`] makes
//!   runs deterministic in tests.
//!
//! ## Quick start
//!
//! ```no_run
//! use lore_machine::{generate_lore, RunCtx};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = RunCtx::builder("http://localhost:3000").build();
//!     let lore = generate_lore(&ctx, "A cat sat. It slept.").await?;
//!     lore.save("lore.json").await?;
//!     println!("{}", lore.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod backend;
pub mod ctx;
pub mod error;
pub mod events;
pub mod generator;
pub mod lore;
pub mod prompt;
pub mod render;
pub mod repair;
pub mod scene;

pub use assembler::StreamAssembler;
pub use backend::{Backend, ByteStream, HttpBackend, MockBackend, MockResponse};
pub use ctx::{Pacing, RunCtx, RunCtxBuilder};
pub use error::{LoreError, Result};
pub use events::{Event, EventHandler, FnEventHandler};
pub use generator::{generate_json, generate_lore, segment_remote, segment_sentences, GeneratedJson};
pub use lore::Lore;
pub use repair::{parse_patched, patch_braces, Patch};
pub use scene::{Character, Scene};
