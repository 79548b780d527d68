//! Sequential run orchestration.
//!
//! One logical thread of control: sentences are processed strictly in
//! order, one request in flight at a time. Each sentence moves through
//! `sent → reading → repaired → accepted | skipped`. A non-success HTTP
//! status aborts the whole run with no partial lore; a buffer that fails
//! to parse after repair only drops that sentence.

use crate::assembler::StreamAssembler;
use crate::ctx::RunCtx;
use crate::error::{LoreError, Result};
use crate::events::{emit, Event};
use crate::lore::Lore;
use crate::prompt;
use crate::repair;
use crate::scene::Scene;
use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Split a story into sentences on `". "`.
///
/// Whitespace-only pieces are dropped; the final sentence keeps its period.
pub fn segment_sentences(story: &str) -> Vec<String> {
    story
        .split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run the streaming variant: one model call per sentence, in order,
/// accumulating the scenes that parse into a [`Lore`].
///
/// Errors with [`LoreError::Http`] (or a transport failure) abort the run
/// immediately; nothing accumulated so far is returned.
pub async fn generate_lore(ctx: &RunCtx, story: &str) -> Result<Lore> {
    let sentences = segment_sentences(story);
    info!(sentences = sentences.len(), "starting lore run");
    emit(
        &ctx.event_handler,
        Event::RunStart {
            sentences: sentences.len(),
        },
    );

    let mut lore = Lore::new();

    for (idx, sentence) in sentences.iter().enumerate() {
        let id = idx + 1;
        emit(
            &ctx.event_handler,
            Event::SentenceStart {
                id,
                sentence: sentence.clone(),
            },
        );

        let prompt = prompt::scene_prompt(sentence, id);
        let mut stream = ctx
            .backend
            .begin_stream(&ctx.client, &ctx.base_url, &prompt)
            .await?;

        tokio::time::sleep(ctx.pacing.pre_read).await;

        let mut assembler = StreamAssembler::new();
        while let Some(chunk) = stream.next().await {
            for fragment in assembler.feed(&chunk?) {
                emit(&ctx.event_handler, Event::Fragment { id, text: fragment });
            }
        }
        let buffer = assembler.finish();
        debug!(id, buffer = %buffer, "assembled scene buffer");

        match repair::parse_patched::<Scene>(&buffer) {
            Ok((scene, patch)) => {
                if patch.touched() {
                    warn!(id, "scene buffer needed brace patching; fields may be incomplete");
                }
                emit(
                    &ctx.event_handler,
                    Event::SceneAccepted {
                        id,
                        repaired: patch.touched(),
                    },
                );
                lore.push(scene);
            }
            Err(err) => {
                warn!(id, %err, "dropping sentence: buffer did not parse after repair");
                emit(
                    &ctx.event_handler,
                    Event::SceneSkipped {
                        id,
                        reason: err.to_string(),
                    },
                );
            }
        }

        tokio::time::sleep(ctx.pacing.post_scene).await;
    }

    info!(accepted = lore.len(), "lore run finished");
    emit(
        &ctx.event_handler,
        Event::RunEnd {
            accepted: lore.len(),
        },
    );
    Ok(lore)
}

/// Result of the non-streaming whole-story variant.
#[derive(Debug, Clone)]
pub struct GeneratedJson {
    /// The raw response text, byte for byte.
    pub raw: String,
    /// The parsed JSON value.
    pub value: Value,
}

/// Run the non-streaming variant: one whole-story request, body awaited as
/// a single message and parsed directly.
///
/// Text that is not valid JSON surfaces as [`LoreError::InvalidJson`]
/// carrying the raw response for inspection.
pub async fn generate_json(ctx: &RunCtx, story: &str) -> Result<GeneratedJson> {
    let prompt = prompt::story_prompt(story);
    let raw = ctx
        .backend
        .complete(&ctx.client, &ctx.base_url, &prompt)
        .await?;

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Ok(GeneratedJson { raw, value }),
        Err(err) => {
            warn!(%err, "whole-story response is not valid JSON");
            Err(LoreError::InvalidJson { raw })
        }
    }
}

/// Fire the segmentation route; only the success/failure signal is used.
pub async fn segment_remote(ctx: &RunCtx, story: &str) -> Result<()> {
    ctx.backend
        .segment(&ctx.client, &ctx.base_url, story)
        .await
}
