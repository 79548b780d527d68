//! Scene and character data model.
//!
//! A [`Scene`] is one structured unit derived from a single story sentence.
//! The model produces these as JSON; every field is `#[serde(default)]`
//! because responses are frequently incomplete and a missing field should
//! yield an empty value, not a rejected scene.

use serde::{Deserialize, Serialize};

/// One structured unit derived from a single story sentence.
///
/// The `id` is intended to equal the 1-based index of the sentence within
/// the story. Nothing enforces that: the value is whatever the model echoed
/// back, so duplicates or gaps are possible when a sentence fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub id: String,
    /// The sentence this scene was derived from.
    #[serde(default)]
    pub sentence: String,
    /// A text-to-image prompt describing the scene.
    #[serde(default)]
    pub prompt: String,
    /// Characters present in the sentence, embedded by value.
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub camera_angle: String,
}

impl Scene {
    /// Skeleton scene with the given 1-based id, used as the JSON example
    /// embedded in generation prompts.
    pub fn shape(id: usize) -> Self {
        Scene {
            id: id.to_string(),
            characters: vec![Character::default()],
            ..Default::default()
        }
    }
}

/// A character appearing in a scene.
///
/// Only `name` is requested from the model; the descriptive fields are
/// accepted when a richer response volunteers them and omitted from
/// serialization otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    /// Free-text notes about the character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
