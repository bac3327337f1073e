//! Field-level diff generation for audit logging
//!
//! Compares two flat snapshots of an entity and reports which top-level
//! fields changed. System-managed fields are never compared.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use super::entry::FieldChange;

/// Fields maintained by the system rather than by editors.
///
/// They change as a side effect of unrelated operations (a download bumps
/// `downloads`, every save stamps `updatedAt`).
pub const EXCLUDED_FIELDS: &[&str] = &["id", "createdAt", "updatedAt", "downloads"];

/// Whether a field is excluded from diffing
pub fn is_excluded(field: &str) -> bool {
    EXCLUDED_FIELDS.contains(&field)
}

/// Diff two snapshots of the same entity.
///
/// Anything that is not a JSON object (including `null` for a missing
/// "before") is treated as an empty object. A key missing on one side
/// compares as `null`. Changes are returned sorted by field name, one per
/// field.
pub fn diff(before: &Value, after: &Value) -> Vec<FieldChange> {
    let empty = Map::new();
    let before_obj = before.as_object().unwrap_or(&empty);
    let after_obj = after.as_object().unwrap_or(&empty);

    let keys: BTreeSet<&String> = before_obj.keys().chain(after_obj.keys()).collect();

    let mut changes = Vec::new();
    for key in keys {
        if is_excluded(key) {
            continue;
        }

        let old_value = before_obj.get(key).unwrap_or(&Value::Null);
        let new_value = after_obj.get(key).unwrap_or(&Value::Null);

        if !values_equal(old_value, new_value) {
            changes.push(FieldChange::new(
                key.clone(),
                old_value.clone(),
                new_value.clone(),
            ));
        }
    }

    changes
}

/// Deep structural equality; numbers compare by numeric value
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x == y || matches!((x.as_f64(), y.as_f64()), (Some(l), Some(r)) if l == r)
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Accumulates typed per-field comparisons for a [`Trackable`] entity.
///
/// [`Trackable`]: super::Trackable
#[derive(Debug, Default)]
pub struct ChangeSet {
    changes: Vec<FieldChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare one field; records a change only when the typed values differ
    pub fn field<T>(mut self, name: &str, before: &T, after: &T) -> Self
    where
        T: PartialEq + Serialize,
    {
        if before != after {
            self.changes
                .push(FieldChange::new(name, to_json(before), to_json(after)));
        }
        self
    }

    pub fn into_changes(self) -> Vec<FieldChange> {
        self.changes
    }
}

// Field types are plain data; a serialization failure degrades to null.
fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Join changes into a single `a: x -> y, b: ...` line
pub fn summarize(changes: &[FieldChange]) -> Option<String> {
    if changes.is_empty() {
        None
    } else {
        Some(
            changes
                .iter()
                .map(FieldChange::describe)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Format a JSON value for human-readable display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "empty".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            // Truncate long strings
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
