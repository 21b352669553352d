//! # formgen
//!
//! Schema-driven form rendering. Given a description of a data shape and the
//! current value and validation state of a form, `formgen` produces a tree of
//! abstract UI nodes (input controls, labels, help text and error messages)
//! ready to be handed to an external presentation renderer.
//!
//! ## Quick Start
//!
//! ```rust
//! use formgen::{Form, FormState, Schema, SchemaNode};
//! use formgen::events::OnChange;
//!
//! let schema = Schema::new(SchemaNode::structure([
//!     ("first_name", SchemaNode::string()),
//!     ("subscribed", SchemaNode::boolean()),
//! ]));
//!
//! let mut state = FormState::new(serde_json::json!({ "first_name": "Ada" }));
//! let tree = Form::new(schema)
//!     .render(&mut state, OnChange::new(|event| println!("{event:?}")))
//!     .unwrap();
//!
//! assert!(tree.has_class("form"));
//! ```
//!
//! ## Schemas
//!
//! | Kind | Default control |
//! |------|-----------------|
//! | `string`, `number`, `integer` | text input |
//! | `boolean` | checkbox |
//! | `date` | none ([`FormError::NotSupported`]) |
//! | enumeration | select (radio group via options) |
//! | structure | fieldset of fields |
//! | list | rows with remove / up / down buttons and an add button |
//!
//! Optional and refinement wrappers and named references may be stacked in any
//! order around any of these; see [`type_info::resolve`].
//!
//! ## Modules
//!
//! - [`schema`]: schema nodes and named definitions
//! - [`type_info`]: wrapper unwrapping
//! - [`node`]: the abstract UI node tree
//! - [`templates`]: renderers, behind the [`Templates`] trait
//! - [`form`]: the driver tying schema, options, state and templates together
//! - [`state`]: form values, validation errors and change events
//! - [`list`]: list reordering and row controls
//! - [`ids`]: identifier allocation
//! - [`humanize`](mod@humanize): field name to label text

pub mod config;
pub mod error;
pub mod events;
pub mod field;
pub mod form;
pub mod humanize;
pub mod ids;
pub mod list;
pub mod locals;
pub mod node;
pub mod options;
pub mod path;
pub mod schema;
pub mod state;
pub mod templates;
pub mod type_info;

#[cfg(test)]
mod tests;

pub use config::{AutoLabel, I18n, RenderConfig};
pub use error::{FormError, FormResult, IndexError, SchemaError};
pub use field::{Factory, FieldOptions};
pub use form::Form;
pub use humanize::humanize;
pub use list::{ListKeys, move_item};
pub use node::{AttrValue, Attrs, Element, Node, Tag};
pub use options::{OptGroup, SelectEntry, SelectOption};
pub use path::{FieldPath, PathSegment};
pub use schema::{Definitions, Primitive, Schema, SchemaNode};
pub use state::{FormEvent, FormState};
pub use templates::{Semantic, Templates};
pub use type_info::{TypeInfo, resolve};
