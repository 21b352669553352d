//! Per-field rendering options.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::AutoLabel;
use crate::locals::InputType;
use crate::node::{AttrValue, Attrs};
use crate::options::SelectEntry;
use crate::schema::{Primitive, SchemaNode};

/// The renderer used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factory {
    Textbox,
    Checkbox,
    Select,
    Radio,
    Date,
    Struct,
    List,
}

impl Factory {
    /// The factory used when the options do not name one.
    pub fn for_base(base: &SchemaNode) -> Self {
        match base {
            SchemaNode::Primitive {
                primitive: Primitive::Boolean,
            } => Self::Checkbox,
            SchemaNode::Primitive {
                primitive: Primitive::Date,
            } => Self::Date,
            SchemaNode::Enumeration { .. } => Self::Select,
            SchemaNode::Structure { .. } => Self::Struct,
            SchemaNode::List { .. } => Self::List,
            _ => Self::Textbox,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Textbox => "textbox",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Date => "date",
            Self::Struct => "struct",
            Self::List => "list",
        }
    }
}

/// Options of one field, and of the fields nested below it.
///
/// Deserializes from the same shape it serializes to, with every key optional:
///
/// ```rust
/// use formgen::{Factory, FieldOptions};
///
/// let options: FieldOptions = serde_json::from_str(r#"{
///     "order": ["name", "role"],
///     "fields": {
///         "name": { "label": "Full name", "help": "As on your passport" },
///         "role": { "factory": "radio" }
///     }
/// }"#).unwrap();
///
/// assert_eq!(options.fields["role"].factory, Some(Factory::Radio));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Error text shown instead of the one recorded in the form state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory: Option<Factory>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub auto_focus: bool,

    /// Overrides the configured automatic label placement for this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto: Option<AutoLabel>,

    /// Display order of a structure's fields. Fields not listed are hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,

    /// Options of a structure's fields, by name.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, FieldOptions>,

    /// Options applied to every element of a list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Box<FieldOptions>>,

    /// Explicit select or radio entries, replacing the enumeration's.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectEntry>>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_add: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_remove: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_order: bool,

    /// Extra attributes passed through to the control.
    #[serde(skip)]
    pub attrs: Attrs,
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn with_factory(mut self, factory: Factory) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn with_type(mut self, input_type: InputType) -> Self {
        self.input_type = Some(input_type);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    pub fn with_auto(mut self, auto: AutoLabel) -> Self {
        self.auto = Some(auto);
        self
    }

    pub fn with_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.fields.insert(name.into(), options);
        self
    }

    pub fn with_item(mut self, options: FieldOptions) -> Self {
        self.item = Some(Box::new(options));
        self
    }

    pub fn with_options<I, E>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<SelectEntry>,
    {
        self.options = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_disable_add(mut self, disable: bool) -> Self {
        self.disable_add = disable;
        self
    }

    pub fn with_disable_remove(mut self, disable: bool) -> Self {
        self.disable_remove = disable;
        self
    }

    pub fn with_disable_order(mut self, disable: bool) -> Self {
        self.disable_order = disable;
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Options of the named structure field, if any were given.
    pub fn field(&self, name: &str) -> Option<&FieldOptions> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factories() {
        assert_eq!(Factory::for_base(&SchemaNode::boolean()), Factory::Checkbox);
        assert_eq!(Factory::for_base(&SchemaNode::date()), Factory::Date);
        assert_eq!(Factory::for_base(&SchemaNode::string()), Factory::Textbox);
        assert_eq!(Factory::for_base(&SchemaNode::integer()), Factory::Textbox);
        assert_eq!(
            Factory::for_base(&SchemaNode::enumeration([("a", "A")])),
            Factory::Select
        );
        assert_eq!(
            Factory::for_base(&SchemaNode::structure([("a", SchemaNode::string())])),
            Factory::Struct
        );
        assert_eq!(
            Factory::for_base(&SchemaNode::list(SchemaNode::string())),
            Factory::List
        );
    }

    #[test]
    fn test_deserialize_nested_options() {
        let options: FieldOptions = serde_json::from_str(
            r#"{
                "disable_order": true,
                "item": { "type": "email", "placeholder": "you@example.com" }
            }"#,
        )
        .unwrap();
        assert!(options.disable_order);
        let item = options.item.unwrap();
        assert_eq!(item.input_type, Some(InputType::Email));
        assert_eq!(item.placeholder.as_deref(), Some("you@example.com"));
    }

    #[test]
    fn test_serialize_skips_unset_keys() {
        let options = FieldOptions::new()
            .with_label("Name")
            .with_attr("maxlength", "10");
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({ "label": "Name" })
        );
    }
}
