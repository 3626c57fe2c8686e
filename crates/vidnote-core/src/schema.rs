//! Schema validation for persisted library data.
//!
//! This is the sole trust boundary between arbitrary bytes (the storage
//! medium, user-supplied import files) and the typed domain model. The
//! validator walks the raw JSON value structurally and collects every
//! violation with its path, rather than stopping at the first, so a
//! rejected import names everything that is wrong with it.
//!
//! Unknown extra fields are ignored; all specified fields must be
//! present with the right primitive type.

use serde_json::Value;
use thiserror::Error;

use crate::models::Library;

/// A single schema violation: where, and what was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON path to the offending value, e.g. `videos[2].createdAt`.
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validation failure carrying all violating paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", format_violations(.violations))]
pub struct SchemaError {
    pub violations: Vec<SchemaViolation>,
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate an arbitrary JSON value against the library shape.
///
/// Returns the strongly-typed [`Library`] on success, or a
/// [`SchemaError`] enumerating every violating path.
///
/// Numeric fields are not treated uniformly: a note's `timestamp` is a
/// playback offset and accepts any JSON number, while `createdAt` must
/// be an **integer** count of epoch milliseconds. Every writer of this
/// format produces integer millis, so a fractional `createdAt` only
/// appears in a hand-edited backup and is rejected rather than
/// silently truncated into the typed model.
pub fn validate_library(value: &Value) -> std::result::Result<Library, SchemaError> {
    let mut violations = Vec::new();

    let Some(root) = value.as_object() else {
        return Err(SchemaError {
            violations: vec![violation("$", "expected an object")],
        });
    };

    match root.get("videos") {
        None => violations.push(violation("videos", "missing required field")),
        Some(Value::Array(videos)) => {
            for (i, entry) in videos.iter().enumerate() {
                check_video(entry, i, &mut violations);
            }
        }
        Some(_) => violations.push(violation("videos", "expected an array")),
    }

    match root.get("notes") {
        None => violations.push(violation("notes", "missing required field")),
        Some(Value::Array(notes)) => {
            for (i, entry) in notes.iter().enumerate() {
                check_note(entry, i, &mut violations);
            }
        }
        Some(_) => violations.push(violation("notes", "expected an array")),
    }

    if !violations.is_empty() {
        return Err(SchemaError { violations });
    }

    // Structural checks above line up with the typed model, so this
    // only fails if they drift; surface that as a root-level violation.
    serde_json::from_value(value.clone()).map_err(|e| SchemaError {
        violations: vec![violation("$", &e.to_string())],
    })
}

fn violation(path: &str, message: &str) -> SchemaViolation {
    SchemaViolation {
        path: path.to_string(),
        message: message.to_string(),
    }
}

fn check_video(entry: &Value, index: usize, violations: &mut Vec<SchemaViolation>) {
    let base = format!("videos[{}]", index);
    let Some(obj) = entry.as_object() else {
        violations.push(violation(&base, "expected an object"));
        return;
    };
    check_string(obj, &base, "id", violations);
    check_string(obj, &base, "youtubeId", violations);
    check_string(obj, &base, "title", violations);
    check_string(obj, &base, "url", violations);
    check_string_array(obj, &base, "tags", violations);
    check_millis(obj, &base, "createdAt", violations);
}

fn check_note(entry: &Value, index: usize, violations: &mut Vec<SchemaViolation>) {
    let base = format!("notes[{}]", index);
    let Some(obj) = entry.as_object() else {
        violations.push(violation(&base, "expected an object"));
        return;
    };
    check_string(obj, &base, "id", violations);
    check_string(obj, &base, "videoId", violations);
    check_number(obj, &base, "timestamp", violations);
    check_string(obj, &base, "content", violations);
    check_millis(obj, &base, "createdAt", violations);
}

fn check_string(
    obj: &serde_json::Map<String, Value>,
    base: &str,
    field: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    match obj.get(field) {
        None => violations.push(violation(&format!("{}.{}", base, field), "missing required field")),
        Some(Value::String(_)) => {}
        Some(_) => violations.push(violation(&format!("{}.{}", base, field), "expected a string")),
    }
}

fn check_number(
    obj: &serde_json::Map<String, Value>,
    base: &str,
    field: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    match obj.get(field) {
        None => violations.push(violation(&format!("{}.{}", base, field), "missing required field")),
        Some(Value::Number(_)) => {}
        Some(_) => violations.push(violation(&format!("{}.{}", base, field), "expected a number")),
    }
}

fn check_millis(
    obj: &serde_json::Map<String, Value>,
    base: &str,
    field: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    match obj.get(field) {
        None => violations.push(violation(&format!("{}.{}", base, field), "missing required field")),
        Some(v) if v.as_i64().is_some() => {}
        Some(_) => violations.push(violation(
            &format!("{}.{}", base, field),
            "expected an integer millisecond timestamp",
        )),
    }
}

fn check_string_array(
    obj: &serde_json::Map<String, Value>,
    base: &str,
    field: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    match obj.get(field) {
        None => violations.push(violation(&format!("{}.{}", base, field), "missing required field")),
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    violations.push(violation(
                        &format!("{}.{}[{}]", base, field, i),
                        "expected a string",
                    ));
                }
            }
        }
        Some(_) => violations.push(violation(&format!("{}.{}", base, field), "expected an array")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_library_value() -> Value {
        json!({
            "videos": [{
                "id": "v1",
                "youtubeId": "dQw4w9WgXcQ",
                "title": "Intro to Rust",
                "url": "https://youtu.be/dQw4w9WgXcQ",
                "tags": ["systems"],
                "createdAt": 1700000000000i64
            }],
            "notes": [{
                "id": "n1",
                "videoId": "v1",
                "timestamp": 42.5,
                "content": "talks about ownership",
                "createdAt": 1700000000001i64
            }]
        })
    }

    #[test]
    fn test_validate_accepts_valid_library() {
        let library = validate_library(&valid_library_value()).unwrap();
        assert_eq!(library.videos.len(), 1);
        assert_eq!(library.notes.len(), 1);
        assert_eq!(library.videos[0].youtube_id, "dQw4w9WgXcQ");
        assert_eq!(library.notes[0].timestamp, 42.5);
    }

    #[test]
    fn test_validate_accepts_empty_library() {
        let library = validate_library(&json!({"videos": [], "notes": []})).unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn test_validate_ignores_unknown_fields() {
        let mut value = valid_library_value();
        value["schemaVersion"] = json!(2);
        value["videos"][0]["watched"] = json!(true);
        assert!(validate_library(&value).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_object_root() {
        let err = validate_library(&json!("not an object")).unwrap_err();
        assert_eq!(err.violations[0].path, "$");
    }

    #[test]
    fn test_validate_rejects_missing_collections() {
        let err = validate_library(&json!({})).unwrap_err();
        let paths: Vec<_> = err.violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"videos"));
        assert!(paths.contains(&"notes"));
    }

    #[test]
    fn test_validate_rejects_non_array_videos() {
        let err = validate_library(&json!({"videos": "not an array", "notes": []})).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].path, "videos");
        assert!(err.violations[0].message.contains("array"));
    }

    #[test]
    fn test_validate_rejects_wrong_primitive_type_with_path() {
        // Numeric id, the import-rejection fixture.
        let err = validate_library(&json!({
            "videos": [{"id": 1}],
            "notes": []
        }))
        .unwrap_err();
        let id_violation = err
            .violations
            .iter()
            .find(|v| v.path == "videos[0].id")
            .expect("expected a violation at videos[0].id");
        assert!(id_violation.message.contains("string"));
        // Missing sibling fields are reported in the same pass.
        assert!(err.violations.iter().any(|v| v.path == "videos[0].title"));
    }

    #[test]
    fn test_validate_rejects_non_string_tag() {
        let mut value = valid_library_value();
        value["videos"][0]["tags"] = json!(["ok", 7]);
        let err = validate_library(&value).unwrap_err();
        assert_eq!(err.violations[0].path, "videos[0].tags[1]");
    }

    #[test]
    fn test_validate_rejects_fractional_created_at() {
        let mut value = valid_library_value();
        value["notes"][0]["createdAt"] = json!(1700000000000.5);
        let err = validate_library(&value).unwrap_err();
        assert_eq!(err.violations[0].path, "notes[0].createdAt");
    }

    #[test]
    fn test_validate_accepts_integer_note_timestamp() {
        let mut value = valid_library_value();
        value["notes"][0]["timestamp"] = json!(90);
        assert!(validate_library(&value).is_ok());
    }

    #[test]
    fn test_validate_collects_violations_across_entries() {
        let err = validate_library(&json!({
            "videos": [{"id": 1}, "not an object"],
            "notes": [{"id": "n1"}]
        }))
        .unwrap_err();
        assert!(err.violations.iter().any(|v| v.path.starts_with("videos[0]")));
        assert!(err.violations.iter().any(|v| v.path == "videos[1]"));
        assert!(err.violations.iter().any(|v| v.path.starts_with("notes[0]")));
    }

    #[test]
    fn test_schema_error_display_lists_paths() {
        let err = validate_library(&json!({"videos": "x", "notes": []})).unwrap_err();
        assert!(err.to_string().contains("videos"));
    }
}
