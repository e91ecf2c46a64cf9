//! Shape validation for incoming worksheet records.

use serde_json::Value;

use crate::error::ShapeError;

/// Keys that every gap-fill worksheet record must provide.
pub const REQUIRED_KEYS: &[&str] = &[
    "title",
    "instructions",
    "main_text_final",
    "question_title",
    "removed_words_final",
    "answer_title",
    "answers_final",
    "url",
    "exercise_type",
];

/// Checks that `record` is an object carrying every key in `required`.
///
/// The values themselves are not inspected; any stringifiable JSON value is
/// accepted.
pub fn validate(record: &Value, required: &[&str]) -> Result<(), ShapeError> {
    let fields = record.as_object().ok_or(ShapeError::NotAnObject)?;

    let missing: Vec<String> = required
        .iter()
        .filter(|key| !fields.contains_key(**key))
        .map(|key| (*key).to_owned())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ShapeError::IncompleteKeys(missing))
    }
}

/// Renders an untyped record field as display text.
///
/// Strings pass through without quoting; every other JSON value uses its
/// serialized form.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
