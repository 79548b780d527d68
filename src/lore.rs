//! The scene accumulator.
//!
//! [`Lore`] collects successfully parsed scenes in submission order and
//! serializes them as one JSON array. A sentence that failed to parse is
//! simply absent, so the array can be shorter than the sentence count.

use crate::error::Result;
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The full ordered collection of scenes for one story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lore {
    scenes: Vec<Scene>,
}

impl Lore {
    /// Create an empty lore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scene. Order of insertion is preserved; nothing is
    /// deduplicated or validated.
    pub fn push(&mut self, scene: Scene) {
        self.scenes.push(scene);
    }

    /// Number of accepted scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene was accepted.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// The accepted scenes, in submission order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Serialize the full collection to one JSON-array string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.scenes)?)
    }

    /// Write the JSON-array string to a file (conventionally `lore.json`).
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

impl FromIterator<Scene> for Lore {
    fn from_iter<I: IntoIterator<Item = Scene>>(iter: I) -> Self {
        Self {
            scenes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(id: &str) -> Scene {
        Scene {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_push_preserves_submission_order() {
        let mut lore = Lore::new();
        for id in ["1", "2", "3"] {
            lore.push(scene(id));
        }
        let ids: Vec<_> = lore.scenes().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_missing_scene_just_shortens_array() {
        let mut lore = Lore::new();
        lore.push(scene("1"));
        lore.push(scene("3")); // sentence 2 failed to parse upstream
        assert_eq!(lore.len(), 2);
        let json = lore.to_json().unwrap();
        let parsed: Vec<Scene> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1].id, "3");
    }

    #[test]
    fn test_serializes_as_json_array() {
        let mut lore = Lore::new();
        lore.push(scene("1"));
        let json = lore.to_json().unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }

    #[test]
    fn test_empty_lore_is_empty_array() {
        let lore = Lore::new();
        assert!(lore.is_empty());
        assert_eq!(lore.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_collect_from_scene_iterator() {
        let lore: Lore = ["1", "2"].into_iter().map(scene).collect();
        assert_eq!(lore.len(), 2);
        assert_eq!(lore.scenes()[0].id, "1");
    }

    #[tokio::test]
    async fn test_save_writes_lore_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lore.json");

        let mut lore = Lore::new();
        lore.push(scene("1"));
        lore.push(scene("2"));
        lore.save(&path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: Vec<Scene> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, "1");
    }
}
