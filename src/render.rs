//! Text renderings of a generated JSON value.
//!
//! Three redundant views of the same value: the raw string the model sent,
//! a pretty-printed form, and a recursively rendered key/value tree.

use serde_json::Value;

/// Pretty-printed JSON.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Recursive key/value tree: objects as `key: value` lines, arrays as
/// `-` items, nesting shown by two-space indentation.
pub fn tree(value: &Value) -> String {
    let mut out = String::new();
    write_node(&mut out, value, 0);
    out
}

fn write_node(out: &mut String, value: &Value, depth: usize) {
    let pad = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                if val.is_object() || val.is_array() {
                    out.push_str(&format!("{}{}:\n", pad, key));
                    write_node(out, val, depth + 1);
                } else {
                    out.push_str(&format!("{}{}: {}\n", pad, key, scalar(val)));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    out.push_str(&format!("{}-\n", pad));
                    write_node(out, item, depth + 1);
                } else {
                    out.push_str(&format!("{}- {}\n", pad, scalar(item)));
                }
            }
        }
        other => {
            out.push_str(&format!("{}{}\n", pad, scalar(other)));
        }
    }
}

/// Strings without their quotes; everything else in JSON form.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tree_flat_object() {
        let value = json!({"id": "1", "mood": "tense"});
        let rendered = tree(&value);
        assert_eq!(rendered, "id: 1\nmood: tense\n");
    }

    #[test]
    fn test_tree_nested_object_indents() {
        let value = json!({"scene": {"mood": "serene"}});
        let rendered = tree(&value);
        assert_eq!(rendered, "scene:\n  mood: serene\n");
    }

    #[test]
    fn test_tree_array_of_objects() {
        let value = json!({"characters": [{"name": "cat"}, {"name": "dog"}]});
        let rendered = tree(&value);
        assert_eq!(rendered, "characters:\n  -\n    name: cat\n  -\n    name: dog\n");
    }

    #[test]
    fn test_tree_scalar_array() {
        let value = json!(["a", 2, true]);
        let rendered = tree(&value);
        assert_eq!(rendered, "- a\n- 2\n- true\n");
    }

    #[test]
    fn test_tree_bare_scalar() {
        assert_eq!(tree(&json!(42)), "42\n");
        assert_eq!(tree(&json!("plain")), "plain\n");
    }

    #[test]
    fn test_pretty_round_trips() {
        let value = json!({"a": [1, 2]});
        let parsed: serde_json::Value = serde_json::from_str(&pretty(&value)).unwrap();
        assert_eq!(parsed, value);
    }
}
