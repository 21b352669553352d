//! Render contexts ("locals").
//!
//! A render context bundles everything one template call needs: the current
//! value, the change callback, display text and validation state. Contexts
//! are built fresh for every render pass and never retained.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::events::{FileRef, OnChange, OnClick};
use crate::node::{Attrs, Node};
use crate::options::{SelectEntry, SelectOption};
use crate::path::FieldPath;

/// The label, help and error decoration around a control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chrome {
    pub label: Option<String>,
    pub help: Option<String>,
    pub error: Option<String>,
    pub has_error: bool,
    pub disabled: bool,
}

impl Chrome {
    /// The error text, if the field is in error and has one to show.
    pub fn visible_error(&self) -> Option<&str> {
        if self.has_error {
            self.error.as_deref()
        } else {
            None
        }
    }
}

/// Control types of a textbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Textarea,
    Password,
    Email,
    Number,
    Url,
    Tel,
    Search,
    Color,
    File,
    Hidden,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Password => "password",
            Self::Email => "email",
            Self::Number => "number",
            Self::Url => "url",
            Self::Tel => "tel",
            Self::Search => "search",
            Self::Color => "color",
            Self::File => "file",
            Self::Hidden => "hidden",
        }
    }
}

/// What a textbox reports on change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextboxInput {
    Text(String),
    /// The first selected file of a file control.
    File(Option<FileRef>),
}

#[derive(Debug, Clone, Default)]
pub struct TextboxLocals {
    pub id: Option<String>,
    pub name: Option<String>,
    pub input_type: InputType,
    pub value: Option<String>,
    pub attrs: Attrs,
    pub chrome: Chrome,
    pub on_change: OnChange<TextboxInput>,
}

#[derive(Debug, Clone, Default)]
pub struct CheckboxLocals {
    pub id: Option<String>,
    pub value: bool,
    pub attrs: Attrs,
    pub chrome: Chrome,
    pub on_change: OnChange<bool>,
}

/// The value of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectValue {
    Single(String),
    Multiple(Vec<String>),
}

impl Default for SelectValue {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectLocals {
    pub id: Option<String>,
    pub value: SelectValue,
    pub is_multiple: bool,
    pub options: Vec<SelectEntry>,
    pub attrs: Attrs,
    pub chrome: Chrome,
    pub on_change: OnChange<SelectValue>,
}

#[derive(Debug, Clone, Default)]
pub struct RadioLocals {
    /// Base identifier; option `i` gets `{id}_{i}`.
    pub id: String,
    pub value: Option<String>,
    pub options: Vec<SelectOption>,
    pub attrs: Attrs,
    pub chrome: Chrome,
    pub on_change: OnChange<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DateLocals {
    pub id: Option<String>,
    pub value: Option<String>,
    pub attrs: Attrs,
    pub chrome: Chrome,
}

#[derive(Debug, Clone, Default)]
pub struct StructLocals {
    pub chrome: Chrome,
    /// Position of the structure in the form; empty at the top level.
    pub path: FieldPath,
    /// Field names in display order. Inputs not listed are not shown.
    pub order: Vec<String>,
    pub inputs: IndexMap<String, Node>,
}

/// A button of a list row or the list's add control.
#[derive(Debug, Clone, Default)]
pub struct ListButton {
    pub label: String,
    pub click: OnClick,
}

impl ListButton {
    pub fn new(label: impl Into<String>, click: OnClick) -> Self {
        Self {
            label: label.into(),
            click,
        }
    }
}

/// One row of a list.
#[derive(Debug, Clone)]
pub struct ListItem {
    /// Stable identity of the row, independent of its position.
    pub key: String,
    pub input: Node,
    pub buttons: Vec<ListButton>,
}

#[derive(Debug, Clone, Default)]
pub struct ListLocals {
    pub chrome: Chrome,
    pub path: FieldPath,
    pub items: Vec<ListItem>,
    pub add: Option<ListButton>,
}
