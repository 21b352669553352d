//! Abstract UI node trees.
//!
//! Renderers produce [`Node`]s and hand them to an external presentation
//! renderer. A node is one of three closed shapes:
//!
//! - [`Node::Leaf`]: an element without children (e.g. an `input`)
//! - [`Node::Container`]: an element with one child or an ordered sequence
//! - [`Node::Text`]: a text run
//!
//! Attribute values are restricted to [`AttrValue`]: scalars, a class-flag set
//! or a style-property set. Trees are built with [`Element`]:
//!
//! ```rust
//! use formgen::node::{Element, Tag};
//!
//! let node = Element::new(Tag::Div)
//!     .class("field")
//!     .class_if("error", false)
//!     .child(Element::new(Tag::Input).attr("type", "text").build())
//!     .build();
//!
//! assert!(node.has_class("field"));
//! assert!(!node.has_class("error"));
//! assert_eq!(node.children().len(), 1);
//! ```

use indexmap::IndexMap;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use crate::events::{DomEvent, EventHandler, EventKind};

/// Element kinds produced by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Div,
    Label,
    Input,
    Textarea,
    Select,
    Option,
    Optgroup,
    Button,
    Fieldset,
    Legend,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Label => "label",
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Option => "option",
            Self::Optgroup => "optgroup",
            Self::Button => "button",
            Self::Fieldset => "fieldset",
            Self::Legend => "legend",
        }
    }
}

/// A set of class flags. Flags switched off are kept but not active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet(IndexMap<String, bool>);

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace separated class list.
    pub fn parse(classes: &str) -> Self {
        Self(
            classes
                .split_whitespace()
                .map(|c| (c.to_string(), true))
                .collect(),
        )
    }

    pub fn set(&mut self, class: impl Into<String>, on: bool) {
        self.0.insert(class.into(), on);
    }

    pub fn with(mut self, class: impl Into<String>, on: bool) -> Self {
        self.set(class, on);
        self
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.get(class).copied().unwrap_or(false)
    }

    /// Active classes, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, on)| **on)
            .map(|(class, _)| class.as_str())
    }

    /// The active classes joined with spaces.
    pub fn to_class_string(&self) -> String {
        self.active().collect::<Vec<_>>().join(" ")
    }
}

impl Serialize for ClassSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_class_string())
    }
}

/// Inline style properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Style(IndexMap<String, String>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(property.into(), value.into());
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Bool(bool),
    List(Vec<String>),
    Classes(ClassSet),
    Style(Style),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether the value would switch a boolean attribute on.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Bool(b) => *b,
            Self::List(items) => !items.is_empty(),
            Self::Classes(_) | Self::Style(_) => true,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<ClassSet> for AttrValue {
    fn from(classes: ClassSet) -> Self {
        Self::Classes(classes)
    }
}

impl From<Style> for AttrValue {
    fn from(style: Style) -> Self {
        Self::Style(style)
    }
}

/// Element attributes, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attrs(IndexMap<String, AttrValue>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.0.shift_remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Switch a class flag, converting a plain `class` string into a set.
    pub fn set_class(&mut self, class: &str, on: bool) {
        let mut classes = match self.0.shift_remove("class") {
            Some(AttrValue::Classes(classes)) => classes,
            Some(AttrValue::Text(text)) => ClassSet::parse(&text),
            _ => ClassSet::new(),
        };
        classes.set(class, on);
        self.0.insert("class".to_string(), AttrValue::Classes(classes));
    }

    pub fn has_class(&self, class: &str) -> bool {
        match self.get("class") {
            Some(AttrValue::Classes(classes)) => classes.contains(class),
            Some(AttrValue::Text(text)) => text.split_whitespace().any(|c| c == class),
            _ => false,
        }
    }
}

/// Event handlers bound to an element.
#[derive(Debug, Clone, Default)]
pub struct Events(IndexMap<EventKind, EventHandler>);

impl Events {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, kind: EventKind) -> Option<&EventHandler> {
        self.0.get(&kind)
    }

    pub fn insert(&mut self, kind: EventKind, handler: EventHandler) {
        self.0.insert(kind, handler);
    }

    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.0.keys().copied()
    }
}

impl Serialize for Events {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for kind in self.0.keys() {
            seq.serialize_element(kind)?;
        }
        seq.end()
    }
}

/// An element without children.
#[derive(Debug, Clone, Serialize)]
pub struct LeafNode {
    pub tag: Tag,
    #[serde(skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
    #[serde(skip_serializing_if = "Events::is_empty")]
    pub events: Events,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// An element with children.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerNode {
    pub tag: Tag,
    #[serde(skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
    #[serde(skip_serializing_if = "Events::is_empty")]
    pub events: Events,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub children: Children,
}

/// The children of a container: a single node or an ordered sequence.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Children {
    One(Box<Node>),
    Many(Vec<Node>),
}

impl Children {
    pub fn as_slice(&self) -> &[Node] {
        match self {
            Self::One(node) => std::slice::from_ref(node.as_ref()),
            Self::Many(nodes) => nodes,
        }
    }
}

/// An abstract UI node.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(LeafNode),
    Container(ContainerNode),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn tag(&self) -> Option<Tag> {
        match self {
            Self::Leaf(leaf) => Some(leaf.tag),
            Self::Container(container) => Some(container.tag),
            Self::Text(_) => None,
        }
    }

    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            Self::Leaf(leaf) => Some(&leaf.attrs),
            Self::Container(container) => Some(&container.attrs),
            Self::Text(_) => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs().and_then(|attrs| attrs.get(name))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attrs().is_some_and(|attrs| attrs.has_class(class))
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.key.as_deref(),
            Self::Container(container) => container.key.as_deref(),
            Self::Text(_) => None,
        }
    }

    /// Replace the reconciliation key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        let key = Some(key.into());
        match &mut self {
            Self::Leaf(leaf) => leaf.key = key,
            Self::Container(container) => container.key = key,
            Self::Text(_) => {}
        }
        self
    }

    pub fn events(&self) -> Option<&Events> {
        match self {
            Self::Leaf(leaf) => Some(&leaf.events),
            Self::Container(container) => Some(&container.events),
            Self::Text(_) => None,
        }
    }

    /// Fire the handler bound for `kind`, if any. Returns whether one ran.
    pub fn dispatch(&self, kind: EventKind, event: &DomEvent<'_>) -> bool {
        match self.events().and_then(|events| events.get(kind)) {
            Some(handler) => {
                handler.fire(event);
                true
            }
            None => false,
        }
    }

    /// Child nodes; empty for leaves and text.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Container(container) => container.children.as_slice(),
            Self::Leaf(_) | Self::Text(_) => &[],
        }
    }

    /// The text of a text node, or of a container whose only child is text.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Container(container) => match &container.children {
                Children::One(child) => child.text_content(),
                Children::Many(_) => None,
            },
            Self::Leaf(_) => None,
        }
    }

    /// Depth-first search for the first node satisfying `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if predicate(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(predicate))
    }
}

/// Builder for element nodes.
#[derive(Debug, Clone)]
pub struct Element {
    tag: Tag,
    attrs: Attrs,
    events: Events,
    key: Option<String>,
    children: Option<Children>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Attrs::new(),
            events: Events::default(),
            key: None,
            children: None,
        }
    }

    /// Start from an existing attribute set.
    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Set an attribute only when a value is present.
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<AttrValue>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.class_if(class, true)
    }

    pub fn class_if(mut self, class: &str, on: bool) -> Self {
        self.attrs.set_class(class, on);
        self
    }

    pub fn on(mut self, kind: EventKind, handler: EventHandler) -> Self {
        self.events.insert(kind, handler);
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// A single child.
    pub fn child(mut self, child: Node) -> Self {
        self.children = Some(Children::One(Box::new(child)));
        self
    }

    /// A single text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// An ordered sequence of children; absent entries are omitted.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Option<Node>>,
    {
        self.children = Some(Children::Many(children.into_iter().flatten().collect()));
        self
    }

    pub fn build(self) -> Node {
        match self.children {
            None => Node::Leaf(LeafNode {
                tag: self.tag,
                attrs: self.attrs,
                events: self.events,
                key: self.key,
            }),
            Some(children) => Node::Container(ContainerNode {
                tag: self.tag,
                attrs: self.attrs,
                events: self.events,
                key: self.key,
                children,
            }),
        }
    }
}
