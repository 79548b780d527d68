//! Prompt construction for the generation route.
//!
//! Pure string formatting: a template with `{key}` placeholders is rendered
//! with the sentence (or story), the 1-based scene id, and a JSON example of
//! the expected [`Scene`](crate::scene::Scene) shape. Use `{{` / `}}` for
//! literal braces in templates.

use crate::scene::Scene;

/// Sentinel that should never appear in real templates.
const ESCAPE_SENTINEL: &str = "\x00LBRACE\x00";
/// Sentinel for escaped closing brace.
const ESCAPE_SENTINEL_CLOSE: &str = "\x00RBRACE\x00";

/// Camera angles the model is allowed to pick from.
pub const CAMERA_ANGLES: &str = "close-up, medium, long, wide, extreme-close-up, \
point-of-view, birds-eye-view, low-angle, high-angle, dolly, establishing, \
extreme-long-shot";

/// Moods the model is allowed to pick from.
pub const MOODS: &str = "cheerful, melancholic, tense, mysterious, romantic, \
foreboding, humorous, serene, furious, nostalgic, pensive, euphoric, \
despairing, suspenseful, inspirational";

const SCENE_TEMPLATE: &str = "\
Generate one scene object from the following sentence.

Here are the possible camera angles:
{camera_angles}

Here are the possible moods:
{moods}

The scene object must contain the following properties:
- 'id': the unique identifier, {id}
- 'sentence': the single sentence from the story.
- 'prompt': a text-to-image prompt for the scene.
- 'characters': an array of characters present in the sentence.
- 'location': the location where the sentence is set.
- 'mood': the mood of the scene. Always include a mood.
- 'camera_angle': the camera angle of the scene. Always include a camera angle.

Now, transform the following sentence into the described JSON format: {sentence}
Don't add any breaks or newlines in your response.
Return the response as a single JSON object in the shape of {shape}.";

const STORY_TEMPLATE: &str = "\
Generate one object from the following story.

Here are the possible camera angles:
{camera_angles}

Here are the possible moods:
{moods}

The scene object must contain the following properties:
- 'id': a unique identifier for the scene.
- 'sentence': a single sentence from the story.
- 'prompt': a text-to-image prompt for the scene.
- 'characters': an array of characters present in the sentence.
- 'location': the location where the sentence is set.
- 'mood': the mood of the scene. Always include a mood.
- 'camera_angle': the camera angle of the scene. Always include a camera angle.

Now, transform the following story into the described JSON format: {story}
Don't add any breaks or newlines in your response.
Return the response filled out with the story in the shape of {shape}.";

/// Render a template, substituting each `{key}` placeholder with its value.
///
/// Use `{{` to insert a literal `{` and `}}` to insert a literal `}`.
/// Braces inside substituted values pass through untouched.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    // Pass 1: protect escaped braces
    let mut rendered = template.replace("{{", ESCAPE_SENTINEL);
    rendered = rendered.replace("}}", ESCAPE_SENTINEL_CLOSE);

    // Pass 2: substitute placeholders
    for (key, value) in vars {
        let placeholder = format!("{{{}}}", key);
        rendered = rendered.replace(&placeholder, value);
    }

    // Pass 3: restore escaped braces
    rendered = rendered.replace(ESCAPE_SENTINEL, "{");
    rendered = rendered.replace(ESCAPE_SENTINEL_CLOSE, "}");
    rendered
}

/// Instruction string for one sentence, embedding the expected scene shape
/// with the given 1-based id.
pub fn scene_prompt(sentence: &str, id: usize) -> String {
    let shape = shape_json(id);
    let id = id.to_string();
    render(
        SCENE_TEMPLATE,
        &[
            ("camera_angles", CAMERA_ANGLES),
            ("moods", MOODS),
            ("id", id.as_str()),
            ("sentence", sentence),
            ("shape", shape.as_str()),
        ],
    )
}

/// Whole-story instruction string for the non-streaming variant.
pub fn story_prompt(story: &str) -> String {
    let shape = shape_json(1);
    render(
        STORY_TEMPLATE,
        &[
            ("camera_angles", CAMERA_ANGLES),
            ("moods", MOODS),
            ("story", story),
            ("shape", shape.as_str()),
        ],
    )
}

/// JSON example of the expected scene shape.
fn shape_json(id: usize) -> String {
    serde_json::to_string(&Scene::shape(id)).expect("scene shape serializes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let result = render("Hello {name}, process {input}", &[("name", "Alice"), ("input", "data")]);
        assert_eq!(result, "Hello Alice, process data");
    }

    #[test]
    fn test_render_no_placeholders() {
        let result = render("static prompt", &[("unused", "x")]);
        assert_eq!(result, "static prompt");
    }

    #[test]
    fn test_render_escaped_braces() {
        let result = render("JSON: {{\"key\": \"val\"}}", &[]);
        assert_eq!(result, r#"JSON: {"key": "val"}"#);
    }

    #[test]
    fn test_render_braces_in_values_survive() {
        let result = render("shape {shape}", &[("shape", r#"{"id":"1"}"#)]);
        assert_eq!(result, r#"shape {"id":"1"}"#);
    }

    #[test]
    fn test_scene_prompt_embeds_sentence_and_id() {
        let prompt = scene_prompt("A cat sat", 2);
        assert!(prompt.contains("A cat sat"));
        assert!(prompt.contains("'id': the unique identifier, 2"));
        assert!(prompt.contains(r#""id":"2""#));
        assert!(prompt.contains("close-up"));
        assert!(prompt.contains("melancholic"));
    }

    #[test]
    fn test_scene_prompt_embeds_serialized_shape() {
        let prompt = scene_prompt("x", 1);
        let shape_str = serde_json::to_string(&Scene::shape(1)).unwrap();
        assert!(prompt.contains(&shape_str));
    }

    #[test]
    fn test_story_prompt_embeds_story() {
        let prompt = story_prompt("Once upon a time.");
        assert!(prompt.contains("Once upon a time."));
        assert!(prompt.contains("camera angles"));
    }
}
