//! Dot-separated path access into a JSON payload.
//!
//! - `"data.items"` → `value["data"]["items"]`
//! - `"items.0.name"` → `value["items"][0]["name"]`
//! - `""` → the root itself
//!
//! Reads are lenient: anything that cannot be resolved is `None`, which is
//! distinct from a present `null`. Writes create missing object keys as
//! empty objects along the way.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};

/// Errors from [`set`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// An intermediate or parent segment holds a scalar.
    #[error("cannot write through {kind} at '{segment}' in path '{path}'")]
    NotAContainer {
        path: String,
        segment: String,
        kind: &'static str,
    },

    /// An array was reached but the segment is not an index.
    #[error("invalid array index '{segment}' in path '{path}'")]
    InvalidIndex { path: String, segment: String },

    /// Writing at `index` would pad the array by more than [`MAX_ARRAY_PADDING`].
    #[error("index {index} in path '{path}' is too far past the array end ({len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
}

/// Most `null` slots [`set`] inserts to reach an index past an array's end.
pub const MAX_ARRAY_PADDING: usize = 1024;

// ============================================================================
// FIELD PATH
// ============================================================================

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: Cow<'static, str>,
}

impl FieldPath {
    /// Creates a path from its dotted form.
    pub fn new(raw: impl Into<Cow<'static, str>>) -> Self {
        Self { raw: raw.into() }
    }

    /// The dotted form, also used as the field key passed to rules and hooks.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `true` for the empty path, which addresses the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.raw.is_empty()
    }

    /// Iterates over the segments; the root path has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        let raw: &str = &self.raw;
        raw.split('.').filter(move |_| !raw.is_empty())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&'static str> for FieldPath {
    fn from(raw: &'static str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for FieldPath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ============================================================================
// ACCESS
// ============================================================================

/// Reads the value at `path`, or `None` if any segment is missing.
#[must_use]
pub fn get<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(array_index(segment)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Writes `value` at `path`, creating missing intermediate objects.
///
/// Writing past the end of an array pads it with `null`, up to
/// [`MAX_ARRAY_PADDING`] slots.
pub fn set(root: &mut Value, path: &FieldPath, value: Value) -> Result<(), PathError> {
    let (parent, last) = match path.as_str().rsplit_once('.') {
        Some((parent, last)) => (Some(parent), last),
        None if path.is_root() => {
            *root = value;
            return Ok(());
        }
        None => (None, path.as_str()),
    };

    let mut current = root;
    if let Some(parent) = parent {
        for segment in parent.split('.') {
            current = match current {
                Value::Object(map) => map
                    .entry(segment)
                    .or_insert_with(|| Value::Object(Map::new())),
                Value::Array(items) => {
                    let index = parse_index(path, segment)?;
                    pad(path, items, index)?;
                    &mut items[index]
                }
                other => return Err(not_a_container(path, segment, other)),
            };
        }
    }

    match current {
        Value::Object(map) => {
            map.insert(last.to_owned(), value);
        }
        Value::Array(items) => {
            let index = parse_index(path, last)?;
            pad(path, items, index)?;
            items[index] = value;
        }
        other => return Err(not_a_container(path, last, other)),
    }
    Ok(())
}

/// Plain decimal digits only; `+1`, `-0` and `" 1"` are keys, not indices.
fn array_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn parse_index(path: &FieldPath, segment: &str) -> Result<usize, PathError> {
    array_index(segment).ok_or_else(|| PathError::InvalidIndex {
        path: path.to_string(),
        segment: segment.to_owned(),
    })
}

fn pad(path: &FieldPath, items: &mut Vec<Value>, index: usize) -> Result<(), PathError> {
    let len = items.len();
    if index < len {
        return Ok(());
    }
    if index - len > MAX_ARRAY_PADDING {
        return Err(PathError::IndexOutOfRange {
            path: path.to_string(),
            index,
            len,
        });
    }
    items.resize(index + 1, Value::Null);
    Ok(())
}

fn not_a_container(path: &FieldPath, segment: &str, value: &Value) -> PathError {
    PathError::NotAContainer {
        path: path.to_string(),
        segment: segment.to_owned(),
        kind: json_type_name(value),
    }
}

/// Human-readable JSON type name, as used in diagnostics.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
