//! Brace patching for assembled scene buffers.
//!
//! The stream frequently delivers an object body with its outer braces
//! missing. The patch is structural, not a validator: it inserts a leading
//! `{` or trailing `}` when absent and makes one parse attempt. Text
//! truncated mid-object can still come out parseable with fields silently
//! missing, which is why the [`Patch`] record is surfaced to callers.

use crate::error::{LoreError, Result};
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// What [`patch_braces`] inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Patch {
    /// A leading `{` was prepended.
    pub opened: bool,
    /// A trailing `}` was appended.
    pub closed: bool,
}

impl Patch {
    /// Whether any insertion happened.
    pub fn touched(&self) -> bool {
        self.opened || self.closed
    }
}

/// Insert a leading `{` / trailing `}` when the buffer lacks them.
///
/// Empty buffers are left untouched. Buffers already starting with `{` and
/// ending with `}` pass through borrowed, with no insertion on either end.
pub fn patch_braces(buffer: &str) -> (Cow<'_, str>, Patch) {
    let mut patch = Patch::default();
    if buffer.is_empty() {
        return (Cow::Borrowed(buffer), patch);
    }

    let mut patched = Cow::Borrowed(buffer);
    if !patched.starts_with('{') {
        patched = Cow::Owned(format!("{{{}", patched));
        patch.opened = true;
    }
    if !patched.ends_with('}') {
        patched = Cow::Owned(format!("{}}}", patched));
        patch.closed = true;
    }
    (patched, patch)
}

/// Patch the buffer and make the single post-repair parse attempt.
///
/// On success returns the parsed value together with the [`Patch`] record;
/// on failure returns [`LoreError::Unparseable`] and the caller decides
/// whether to skip or abort.
pub fn parse_patched<T: DeserializeOwned>(buffer: &str) -> Result<(T, Patch)> {
    let (patched, patch) = patch_braces(buffer);
    match serde_json::from_str(&patched) {
        Ok(value) => Ok((value, patch)),
        Err(err) => Err(LoreError::Unparseable(format!(
            "{} (buffer: {})",
            err,
            &patched[..patched.len().min(200)]
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use serde_json::Value;

    #[test]
    fn test_noop_on_braced_buffer() {
        let (patched, patch) = patch_braces(r#"{"id":"1"}"#);
        assert_eq!(patched, r#"{"id":"1"}"#);
        assert!(!patch.touched());
        assert!(matches!(patched, Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_buffer_untouched() {
        let (patched, patch) = patch_braces("");
        assert_eq!(patched, "");
        assert!(!patch.opened);
        assert!(!patch.closed);
    }

    #[test]
    fn test_prepends_missing_open() {
        let (patched, patch) = patch_braces(r#""id":"1"}"#);
        assert_eq!(patched, r#"{"id":"1"}"#);
        assert!(patch.opened);
        assert!(!patch.closed);
    }

    #[test]
    fn test_appends_missing_close() {
        let (patched, patch) = patch_braces(r#"{"id":"1""#);
        assert_eq!(patched, r#"{"id":"1"}"#);
        assert!(!patch.opened);
        assert!(patch.closed);
    }

    #[test]
    fn test_patches_both_ends() {
        let (patched, patch) = patch_braces(r#""id":"1""#);
        assert_eq!(patched, r#"{"id":"1"}"#);
        assert!(patch.opened);
        assert!(patch.closed);
    }

    #[test]
    fn test_parse_patched_scene() {
        let buffer = r#""id":"2","sentence":"It slept.","prompt":"","characters":[],"location":"","mood":"serene","camera_angle":"wide""#;
        let (scene, patch): (Scene, Patch) = parse_patched(buffer).unwrap();
        assert_eq!(scene.id, "2");
        assert_eq!(scene.mood, "serene");
        assert!(patch.opened);
        assert!(patch.closed);
    }

    #[test]
    fn test_parse_patched_rejects_garbage() {
        let result: Result<(Value, Patch)> = parse_patched("not json at all");
        assert!(matches!(result, Err(LoreError::Unparseable(_))));
    }

    #[test]
    fn test_parse_patched_empty_buffer_fails() {
        let result: Result<(Value, Patch)> = parse_patched("");
        assert!(result.is_err());
    }

    #[test]
    fn test_truncation_can_patch_to_incomplete_scene() {
        // A buffer cut off after a complete field still patches into valid
        // JSON with the tail fields missing. The patch record is the only
        // signal that this happened.
        let (scene, patch): (Scene, Patch) = parse_patched(r#"{"id":"1","mood":"tense""#).unwrap();
        assert_eq!(scene.id, "1");
        assert!(scene.sentence.is_empty());
        assert!(patch.closed);
    }

    #[test]
    fn test_truncation_mid_string_still_fails() {
        // Cut inside a string value: the appended brace cannot save it.
        let result: Result<(Value, Patch)> = parse_patched(r#"{"id":"1","mood":"ten"#);
        assert!(result.is_err());
    }
}
