//! Callback plumbing between node trees and the presentation layer.
//!
//! Render contexts carry typed callbacks ([`OnChange`], [`OnClick`]). The
//! templates adapt them into [`EventHandler`]s attached to nodes; the
//! presentation layer invokes those with a [`DomEvent`] describing the event
//! target, so tree construction never depends on a particular event-binding
//! mechanism.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Events a node can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Change,
    Click,
}

/// A file picked in a file control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl FileRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            mime: None,
        }
    }
}

/// State of one `<option>` of a select control, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionState {
    pub value: String,
    pub selected: bool,
}

/// The element an event was fired on, as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    pub value: String,
    pub checked: bool,
    pub files: Vec<FileRef>,
    pub options: Vec<OptionState>,
}

impl EventTarget {
    /// A target whose current value is `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// A checkbox-like target.
    pub fn with_checked(checked: bool) -> Self {
        Self {
            checked,
            ..Self::default()
        }
    }

    /// A file control target.
    pub fn with_files(files: Vec<FileRef>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    /// A select target; `options` are `(value, selected)` in document order.
    pub fn with_options<'a>(options: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        Self {
            options: options
                .into_iter()
                .map(|(value, selected)| OptionState {
                    value: value.to_string(),
                    selected,
                })
                .collect(),
            ..Self::default()
        }
    }
}

/// Operations a callback may perform on the presentation layer.
pub trait Document {
    /// Trigger a click on the element with the given identifier.
    fn click(&self, id: &str);
}

/// A document that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedDocument;

impl Document for DetachedDocument {
    fn click(&self, _id: &str) {}
}

/// An event delivered to an [`EventHandler`].
pub struct DomEvent<'a> {
    pub target: &'a EventTarget,
    pub document: &'a dyn Document,
}

impl<'a> DomEvent<'a> {
    pub fn new(target: &'a EventTarget, document: &'a dyn Document) -> Self {
        Self { target, document }
    }
}

/// A callback bound to a node.
#[derive(Clone)]
pub struct EventHandler(Arc<dyn Fn(&DomEvent<'_>) + Send + Sync>);

impl EventHandler {
    pub fn new(f: impl Fn(&DomEvent<'_>) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the handler.
    pub fn fire(&self, event: &DomEvent<'_>) {
        (self.0)(event)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler")
    }
}

/// A typed change callback.
pub struct OnChange<T>(Arc<dyn Fn(T) + Send + Sync>);

impl<T> OnChange<T> {
    pub fn new(f: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, value: T) {
        (self.0)(value)
    }
}

impl<T: 'static> OnChange<T> {
    /// Build a callback that converts its input before forwarding here.
    pub fn map<U: 'static>(&self, f: impl Fn(U) -> T + Send + Sync + 'static) -> OnChange<U> {
        let inner = self.clone();
        OnChange::new(move |value| inner.call(f(value)))
    }
}

impl<T> Clone for OnChange<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for OnChange<T> {
    fn default() -> Self {
        Self::new(|_| {})
    }
}

impl<T> fmt::Debug for OnChange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnChange")
    }
}

/// A click callback.
#[derive(Clone)]
pub struct OnClick(Arc<dyn Fn() + Send + Sync>);

impl OnClick {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl Default for OnClick {
    fn default() -> Self {
        Self::new(|| {})
    }
}

impl fmt::Debug for OnClick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnClick")
    }
}
