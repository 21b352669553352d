//! Form state and the events that change it.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{FormResult, IndexError, SchemaError};
use crate::events::FileRef;
use crate::ids::IdAllocator;
use crate::list::{ListKeys, move_item};
use crate::path::{FieldPath, PathSegment};

/// A change requested by a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A field took a new value.
    Change { path: FieldPath, value: Value },
    /// A file control picked a file, or cleared its selection.
    File {
        path: FieldPath,
        file: Option<FileRef>,
    },
    /// The add button of a list was clicked.
    Add { path: FieldPath },
    /// The remove button of a list row was clicked.
    Remove { path: FieldPath, index: usize },
    /// An up or down button of a list row was clicked.
    Move {
        path: FieldPath,
        from: usize,
        to: usize,
    },
}

impl FormEvent {
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::Change { path, .. }
            | Self::File { path, .. }
            | Self::Add { path }
            | Self::Remove { path, .. }
            | Self::Move { path, .. } => path,
        }
    }
}

/// Everything a render pass reads besides the schema and options.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// The current form value.
    pub value: Value,
    /// Validation messages keyed by field path (`address.lines.0`).
    pub errors: IndexMap<String, String>,
    /// Row keys of every list, maintained across passes.
    pub keys: ListKeys,
}

impl FormState {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn with_error(mut self, path: impl ToString, message: impl Into<String>) -> Self {
        self.errors.insert(path.to_string(), message.into());
        self
    }

    pub fn with_errors(mut self, errors: IndexMap<String, String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn error(&self, path: &FieldPath) -> Option<&str> {
        self.errors.get(&path.to_string()).map(String::as_str)
    }

    /// The value at `path`, if it exists.
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(&self.value, |value, segment| match segment {
                PathSegment::Field(name) => value.get(name.as_str()),
                PathSegment::Index(index) => value.get(*index),
            })
    }

    /// Apply an event to the value and the list keys.
    ///
    /// Row keys travel with their rows, so a row keeps its key across moves
    /// and removals of other rows. Out-of-range row indices fail without
    /// touching the state.
    pub fn apply(&mut self, event: &FormEvent, ids: &dyn IdAllocator) -> FormResult<()> {
        let key = event.path().to_string();
        match event {
            FormEvent::Change { path, value } => {
                *slot(&mut self.value, path)? = value.clone();
                self.keys.forget(&key);
            }
            FormEvent::File { path, file } => {
                *slot(&mut self.value, path)? = match file {
                    Some(file) => file_value(file),
                    None => Value::Null,
                };
            }
            FormEvent::Add { path } => {
                let items = list(&mut self.value, path)?;
                self.keys.ensure(&key, items.len(), ids);
                items.push(Value::Null);
                self.keys.push(&key, ids);
            }
            FormEvent::Remove { path, index } => {
                let items = list(&mut self.value, path)?;
                let len = items.len();
                if *index >= len {
                    return Err(IndexError { index: *index, len }.into());
                }
                self.keys.ensure(&key, len, ids);
                items.remove(*index);
                self.keys.remove(&key, *index);
            }
            FormEvent::Move { path, from, to } => {
                let items = list(&mut self.value, path)?;
                let len = items.len();
                move_item(items, *from, *to)?;
                self.keys.ensure(&key, len, ids);
                self.keys.move_key(&key, *from, *to)?;
            }
        }
        tracing::trace!(path = %key, "Applied form event");
        Ok(())
    }
}

fn file_value(file: &FileRef) -> Value {
    let mut map = Map::new();
    map.insert("name".to_string(), Value::from(file.name.as_str()));
    map.insert("size".to_string(), Value::from(file.size));
    if let Some(mime) = &file.mime {
        map.insert("mime".to_string(), Value::from(mime.as_str()));
    }
    Value::Object(map)
}

/// The value at `path`, creating missing structure fields along the way.
fn slot<'a>(root: &'a mut Value, path: &FieldPath) -> FormResult<&'a mut Value> {
    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        current = match segment {
            PathSegment::Field(name) => {
                if current.is_null() {
                    *current = Value::Object(Map::new());
                }
                match current {
                    Value::Object(map) => map.entry(name.as_str()).or_insert(Value::Null),
                    _ => return Err(shape_error(path, depth, "object")),
                }
            }
            PathSegment::Index(index) => match current {
                Value::Array(items) => {
                    let len = items.len();
                    items
                        .get_mut(*index)
                        .ok_or(IndexError { index: *index, len })?
                }
                _ => return Err(shape_error(path, depth, "array")),
            },
        };
    }
    Ok(current)
}

fn list<'a>(root: &'a mut Value, path: &FieldPath) -> FormResult<&'a mut Vec<Value>> {
    let value = slot(root, path)?;
    if value.is_null() {
        *value = Value::Array(Vec::new());
    }
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(SchemaError::unexpected_value(path, "array").into()),
    }
}

fn shape_error(path: &FieldPath, depth: usize, expected: &'static str) -> crate::error::FormError {
    let prefix: FieldPath = path.segments()[..depth].iter().cloned().collect();
    SchemaError::unexpected_value(prefix, expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::ids::SequentialIds;
    use serde_json::json;

    fn tags() -> FieldPath {
        FieldPath::root().field("tags")
    }

    #[test]
    fn test_change_creates_missing_objects() {
        let mut state = FormState::default();
        let path = FieldPath::root().field("address").field("city");
        state
            .apply(
                &FormEvent::Change {
                    path: path.clone(),
                    value: json!("Oslo"),
                },
                &SequentialIds::default(),
            )
            .unwrap();
        assert_eq!(state.value, json!({ "address": { "city": "Oslo" } }));
        assert_eq!(state.get(&path), Some(&json!("Oslo")));
    }

    #[test]
    fn test_add_remove_move_keep_keys_aligned() {
        let ids = SequentialIds::new("k");
        let mut state = FormState::new(json!({ "tags": ["a", "b"] }));

        state.apply(&FormEvent::Add { path: tags() }, &ids).unwrap();
        assert_eq!(state.value, json!({ "tags": ["a", "b", null] }));
        assert_eq!(state.keys.get("tags").unwrap(), ["k0", "k1", "k2"]);

        state
            .apply(
                &FormEvent::Move {
                    path: tags(),
                    from: 0,
                    to: 2,
                },
                &ids,
            )
            .unwrap();
        assert_eq!(state.value, json!({ "tags": ["b", null, "a"] }));
        assert_eq!(state.keys.get("tags").unwrap(), ["k1", "k2", "k0"]);

        state
            .apply(&FormEvent::Remove { path: tags(), index: 1 }, &ids)
            .unwrap();
        assert_eq!(state.value, json!({ "tags": ["b", "a"] }));
        assert_eq!(state.keys.get("tags").unwrap(), ["k1", "k0"]);
    }

    #[test]
    fn test_out_of_range_move_leaves_state_alone() {
        let ids = SequentialIds::new("k");
        let mut state = FormState::new(json!({ "tags": ["a"] }));
        let err = state
            .apply(
                &FormEvent::Move {
                    path: tags(),
                    from: 0,
                    to: 1,
                },
                &ids,
            )
            .unwrap_err();
        assert_eq!(err, FormError::Index(IndexError { index: 1, len: 1 }));
        assert_eq!(state.value, json!({ "tags": ["a"] }));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut state = FormState::new(json!({ "tags": [] }));
        let err = state
            .apply(
                &FormEvent::Remove { path: tags(), index: 0 },
                &SequentialIds::default(),
            )
            .unwrap_err();
        assert_eq!(err, FormError::Index(IndexError { index: 0, len: 0 }));
    }

    #[test]
    fn test_wrong_shape_is_reported_at_prefix() {
        let mut state = FormState::new(json!({ "name": "x" }));
        let err = state
            .apply(
                &FormEvent::Change {
                    path: FieldPath::root().field("name").field("first"),
                    value: json!("y"),
                },
                &SequentialIds::default(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            FormError::Schema(SchemaError::unexpected_value("name", "object"))
        );
    }

    #[test]
    fn test_file_event_stores_file_description() {
        let mut state = FormState::default();
        let path = FieldPath::root().field("avatar");
        let mut file = FileRef::new("me.png");
        file.size = 42;
        state
            .apply(
                &FormEvent::File {
                    path: path.clone(),
                    file: Some(file),
                },
                &SequentialIds::default(),
            )
            .unwrap();
        assert_eq!(
            state.get(&path),
            Some(&json!({ "name": "me.png", "size": 42 }))
        );
    }
}
