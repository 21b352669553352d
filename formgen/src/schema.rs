//! Schema definitions.
//!
//! A [`SchemaNode`] describes the shape of a form field. Wrapper kinds
//! ([`SchemaNode::Optional`], [`SchemaNode::Refinement`]) decorate an inner
//! node, and [`SchemaNode::Reference`] points at a named entry of the
//! enclosing [`Schema`]'s definitions, which is how recursive shapes are
//! expressed.
//!
//! Schemas round-trip through serde using an internal `kind` tag:
//!
//! ```rust
//! use formgen::SchemaNode;
//!
//! let node: SchemaNode = serde_json::from_str(
//!     r#"{ "kind": "optional", "inner": { "kind": "primitive", "type": "string" } }"#,
//! ).unwrap();
//! assert_eq!(node, SchemaNode::optional(SchemaNode::string()));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Named schema definitions, in declaration order.
pub type Definitions = IndexMap<String, SchemaNode>;

/// Primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    String,
    Number,
    Integer,
    Boolean,
    Date,
}

impl Primitive {
    /// Returns true for the numeric kinds.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }
}

/// A node of a schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaNode {
    /// A scalar value.
    Primitive {
        #[serde(rename = "type")]
        primitive: Primitive,
    },

    /// Marks the inner field as not required.
    Optional { inner: Box<SchemaNode> },

    /// Constrains the inner field beyond its base kind.
    Refinement {
        inner: Box<SchemaNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// A closed set of values, each with a display label.
    Enumeration { values: IndexMap<String, String> },

    /// A fixed set of named fields.
    Structure { fields: IndexMap<String, SchemaNode> },

    /// An ordered collection of elements of one type.
    List { element: Box<SchemaNode> },

    /// A named definition of the enclosing schema.
    Reference { name: String },
}

impl SchemaNode {
    pub fn primitive(primitive: Primitive) -> Self {
        Self::Primitive { primitive }
    }

    pub fn string() -> Self {
        Self::primitive(Primitive::String)
    }

    pub fn number() -> Self {
        Self::primitive(Primitive::Number)
    }

    pub fn integer() -> Self {
        Self::primitive(Primitive::Integer)
    }

    pub fn boolean() -> Self {
        Self::primitive(Primitive::Boolean)
    }

    pub fn date() -> Self {
        Self::primitive(Primitive::Date)
    }

    pub fn optional(inner: SchemaNode) -> Self {
        Self::Optional {
            inner: Box::new(inner),
        }
    }

    pub fn refinement(inner: SchemaNode) -> Self {
        Self::Refinement {
            inner: Box::new(inner),
            name: None,
        }
    }

    /// Create a named refinement (e.g. `"Email"` over a string).
    pub fn refinement_named(inner: SchemaNode, name: impl Into<String>) -> Self {
        Self::Refinement {
            inner: Box::new(inner),
            name: Some(name.into()),
        }
    }

    /// Create an enumeration from `(value, label)` pairs, keeping their order.
    pub fn enumeration<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Enumeration {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Create a structure from `(name, node)` pairs, keeping their order.
    pub fn structure<K>(fields: impl IntoIterator<Item = (K, SchemaNode)>) -> Self
    where
        K: Into<String>,
    {
        Self::Structure {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn list(element: SchemaNode) -> Self {
        Self::List {
            element: Box::new(element),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference { name: name.into() }
    }

    /// The kind tag, as used in serialized schemas and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive { .. } => "primitive",
            Self::Optional { .. } => "optional",
            Self::Refinement { .. } => "refinement",
            Self::Enumeration { .. } => "enumeration",
            Self::Structure { .. } => "structure",
            Self::List { .. } => "list",
            Self::Reference { .. } => "reference",
        }
    }

    /// Returns true for the kinds that wrap another node.
    pub fn is_wrapper(&self) -> bool {
        matches!(
            self,
            Self::Optional { .. } | Self::Refinement { .. } | Self::Reference { .. }
        )
    }
}

/// A root schema node together with the named definitions it may reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub root: SchemaNode,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: Definitions,
}

impl Schema {
    /// Create a schema without named definitions.
    pub fn new(root: SchemaNode) -> Self {
        Self {
            root,
            definitions: Definitions::new(),
        }
    }

    /// Add a named definition.
    pub fn with_definition(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.definitions.insert(name.into(), node);
        self
    }

    /// Look up a named definition.
    pub fn lookup(&self, name: &str) -> Result<&SchemaNode, SchemaError> {
        lookup(&self.definitions, name)
    }
}

pub(crate) fn lookup<'a>(
    definitions: &'a Definitions,
    name: &str,
) -> Result<&'a SchemaNode, SchemaError> {
    definitions
        .get(name)
        .ok_or_else(|| SchemaError::UnknownReference {
            name: name.to_string(),
        })
}
