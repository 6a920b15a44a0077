//! Slash-delimited field paths and JSON tree navigation.

use std::fmt;

use serde_json::Value;

/// Ordered, non-empty list of object keys inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Returns `None` for an empty segment list.
    pub fn new(segments: Vec<String>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Final segment: the parameter name.
    pub fn last(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// All segments except the last.
    pub fn parent(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// A path walked through a missing key or a non-object value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("path {path} not found (resolved {resolved} segment(s))")]
pub struct FieldNotFound {
    pub path: FieldPath,
    /// Number of leading segments that resolved before the failure.
    pub resolved: usize,
}

/// Resolve `path` against `root`, returning the leaf value.
pub fn get<'a>(root: &'a Value, path: &FieldPath) -> Result<&'a Value, FieldNotFound> {
    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        current = match current.as_object().and_then(|map| map.get(segment)) {
            Some(next) => next,
            None => {
                return Err(FieldNotFound {
                    path: path.clone(),
                    resolved: depth,
                })
            }
        };
    }
    Ok(current)
}

/// Upsert `value` under the final segment of `path`.
///
/// Every segment before the last must already exist and hold an object.
/// Returns the value previously stored under the final key, if any.
pub fn set_in_place(
    root: &mut Value,
    path: &FieldPath,
    value: Value,
) -> Result<Option<Value>, FieldNotFound> {
    let mut current = root;
    for (depth, segment) in path.parent().iter().enumerate() {
        current = match current.as_object_mut().and_then(|map| map.get_mut(segment)) {
            Some(next) => next,
            None => {
                return Err(FieldNotFound {
                    path: path.clone(),
                    resolved: depth,
                })
            }
        };
    }

    match current.as_object_mut() {
        Some(parent) => Ok(parent.insert(path.last().to_string(), value)),
        None => Err(FieldNotFound {
            path: path.clone(),
            resolved: path.len() - 1,
        }),
    }
}
