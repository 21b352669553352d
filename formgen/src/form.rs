//! The form driver.
//!
//! A [`Form`] walks a [`Schema`] alongside the current value, resolves every
//! field to a factory, builds that factory's render context and hands it to
//! the configured [`Templates`]. Composite fields render their children first
//! and pass the finished nodes up.
//!
//! ```rust
//! use formgen::{FieldOptions, Form, FormState, Schema, SchemaNode};
//! use formgen::events::OnChange;
//! use formgen::ids::SequentialIds;
//! use std::sync::Arc;
//!
//! let schema = Schema::new(SchemaNode::structure([
//!     ("name", SchemaNode::string()),
//!     ("nickname", SchemaNode::optional(SchemaNode::string())),
//! ]));
//!
//! let form = Form::new(schema)
//!     .with_options(FieldOptions::new().with_order(["name", "nickname"]))
//!     .with_ids(Arc::new(SequentialIds::new("f")));
//!
//! let mut state = FormState::new(serde_json::json!({ "name": "Ada" }));
//! let tree = form.render(&mut state, OnChange::default()).unwrap();
//!
//! let label = tree.find(&|n| n.text_content() == Some("Nickname (optional)"));
//! assert!(label.is_some());
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::{AutoLabel, RenderConfig};
use crate::error::{FormResult, SchemaError};
use crate::events::{OnChange, OnClick};
use crate::field::{Factory, FieldOptions};
use crate::humanize::humanize;
use crate::ids::{IdAllocator, ProcessIds};
use crate::list::{ListKeys, RowAction, RowPolicy, row_actions};
use crate::locals::{
    CheckboxLocals, Chrome, DateLocals, ListButton, ListItem, ListLocals, RadioLocals, SelectLocals,
    SelectValue, StructLocals, TextboxInput, TextboxLocals,
};
use crate::node::{Attrs, Node};
use crate::options::{SelectEntry, SelectOption};
use crate::path::FieldPath;
use crate::schema::{Definitions, Primitive, Schema, SchemaNode};
use crate::state::{FormEvent, FormState};
use crate::templates::{Semantic, Templates};
use crate::type_info::{TypeInfo, enum_options, resolve};

/// A schema bound to its options, configuration and templates.
#[derive(Clone)]
pub struct Form {
    schema: Schema,
    options: FieldOptions,
    config: RenderConfig,
    templates: Arc<dyn Templates>,
    ids: Arc<dyn IdAllocator>,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("schema", &self.schema)
            .field("options", &self.options)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Form {
    /// A form with default options, the Semantic templates and process-wide
    /// identifiers.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            options: FieldOptions::default(),
            config: RenderConfig::default(),
            templates: Arc::new(Semantic),
            ids: Arc::new(ProcessIds),
        }
    }

    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_templates(mut self, templates: Arc<dyn Templates>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdAllocator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The identifier allocator, for use with [`FormState::apply`].
    pub fn ids(&self) -> &dyn IdAllocator {
        self.ids.as_ref()
    }

    /// Render the whole form.
    ///
    /// Row keys of lists seen for the first time are recorded in
    /// `state.keys`. Every control reports through `on_change`.
    pub fn render(&self, state: &mut FormState, on_change: OnChange<FormEvent>) -> FormResult<Node> {
        let FormState {
            value,
            errors,
            keys,
        } = state;

        let mut pass = Pass {
            form: self,
            definitions: &self.schema.definitions,
            errors,
            keys,
            on_change,
            fields: 0,
        };

        debug!(definitions = self.schema.definitions.len(), "Rendering form");
        let node = pass.field(
            &self.schema.root,
            &self.options,
            value,
            &FieldPath::root(),
            false,
        )?;
        debug!(fields = pass.fields, "Rendered form");

        Ok(node)
    }
}

static NULL: Value = Value::Null;

/// State of one render pass.
struct Pass<'a> {
    form: &'a Form,
    definitions: &'a Definitions,
    errors: &'a IndexMap<String, String>,
    keys: &'a mut ListKeys,
    on_change: OnChange<FormEvent>,
    fields: usize,
}

/// What every factory needs to know about the field being rendered.
struct Field<'n, 'o> {
    info: TypeInfo<'n>,
    options: &'o FieldOptions,
    path: FieldPath,
    chrome: Chrome,
    auto: AutoLabel,
}

impl<'a> Pass<'a> {
    fn field(
        &mut self,
        node: &'a SchemaNode,
        options: &FieldOptions,
        value: &Value,
        path: &FieldPath,
        parent_disabled: bool,
    ) -> FormResult<Node> {
        let limit = self.form.config.max_depth;
        if path.len() > limit {
            return Err(SchemaError::TooDeep {
                path: path.to_string(),
                limit,
            }
            .into());
        }

        let info = resolve(node, self.definitions)?;
        let factory = options
            .factory
            .unwrap_or_else(|| Factory::for_base(info.base));
        self.fields += 1;
        trace!(path = %path, factory = factory.as_str(), "Rendering field");

        let field = self.describe(info, options, path, parent_disabled);
        let templates = Arc::clone(&self.form.templates);

        match factory {
            Factory::Textbox => templates.textbox(&self.textbox(&field, value)?),
            Factory::Checkbox => templates.checkbox(&self.checkbox(&field, value)?),
            Factory::Select => templates.select(&self.select(&field, value)?),
            Factory::Radio => templates.radio(&self.radio(&field, value)?),
            Factory::Date => templates.date(&self.date(&field, value)?),
            Factory::Struct => {
                let locals = self.structure(&field, value)?;
                templates.structure(&locals)
            }
            Factory::List => {
                let locals = self.list(&field, value)?;
                templates.list(&locals)
            }
        }
    }

    fn describe<'n, 'o>(
        &self,
        info: TypeInfo<'n>,
        options: &'o FieldOptions,
        path: &FieldPath,
        parent_disabled: bool,
    ) -> Field<'n, 'o> {
        let config = &self.form.config;
        let auto = options.auto.unwrap_or(config.auto);
        let recorded = self.errors.get(&path.to_string());
        let disabled = options.disabled.unwrap_or(false) || (config.cascade_disabled && parent_disabled);

        let mut field = Field {
            info,
            options,
            path: path.clone(),
            chrome: Chrome {
                label: options.label.clone(),
                help: options.help.clone(),
                error: options.error.clone().or_else(|| recorded.cloned()),
                has_error: recorded.is_some(),
                disabled,
            },
            auto,
        };
        if field.chrome.label.is_none() && auto == AutoLabel::Labels {
            field.chrome.label = self.auto_label(&field);
        }
        field
    }

    /// `humanize(name)` plus the optional or required suffix. Fields without
    /// a name of their own (the root, list rows) get nothing.
    fn auto_label(&self, field: &Field<'_, '_>) -> Option<String> {
        let name = field.path.last_field()?;
        let i18n = &self.form.config.i18n;
        let suffix = if field.info.is_optional {
            &i18n.optional
        } else {
            &i18n.required
        };
        Some(format!("{}{}", humanize(name), suffix))
    }

    fn id(&self, options: &FieldOptions) -> String {
        options.id.clone().unwrap_or_else(|| self.form.ids.next_id())
    }

    fn name(options: &FieldOptions, path: &FieldPath) -> Option<String> {
        options
            .name
            .clone()
            .or_else(|| (!path.is_root()).then(|| path.to_string()))
    }

    fn attrs(options: &FieldOptions) -> Attrs {
        let mut attrs = options.attrs.clone();
        if options.auto_focus {
            attrs.set("autofocus", true);
        }
        attrs
    }

    fn textbox(&self, field: &Field<'_, '_>, value: &Value) -> FormResult<TextboxLocals> {
        let primitive = match field.info.base {
            SchemaNode::Primitive { primitive } => *primitive,
            other => {
                return Err(SchemaError::mismatch(&field.path, "primitive", other.kind_name()).into());
            }
        };
        let text = match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => return Err(SchemaError::unexpected_value(&field.path, "scalar").into()),
        };

        let mut attrs = Self::attrs(field.options);
        let placeholder = field.options.placeholder.clone().or_else(|| {
            (field.auto == AutoLabel::Placeholders)
                .then(|| self.auto_label(field))
                .flatten()
        });
        if let Some(placeholder) = placeholder {
            attrs.set("placeholder", placeholder);
        }

        let path = field.path.clone();
        let on_change = self.on_change.map(move |input: TextboxInput| match input {
            TextboxInput::Text(text) => FormEvent::Change {
                path: path.clone(),
                value: coerce(&text, primitive),
            },
            TextboxInput::File(file) => FormEvent::File {
                path: path.clone(),
                file,
            },
        });

        Ok(TextboxLocals {
            id: Some(self.id(field.options)),
            name: Self::name(field.options, &field.path),
            input_type: field.options.input_type.unwrap_or_default(),
            value: text,
            attrs,
            chrome: field.chrome.clone(),
            on_change,
        })
    }

    fn checkbox(&self, field: &Field<'_, '_>, value: &Value) -> FormResult<CheckboxLocals> {
        match field.info.base {
            SchemaNode::Primitive {
                primitive: Primitive::Boolean,
            } => {}
            other => {
                return Err(SchemaError::mismatch(&field.path, "boolean", other.kind_name()).into());
            }
        }
        let checked = match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            _ => return Err(SchemaError::unexpected_value(&field.path, "boolean").into()),
        };

        let path = field.path.clone();
        Ok(CheckboxLocals {
            id: Some(self.id(field.options)),
            value: checked,
            attrs: Self::attrs(field.options),
            chrome: field.chrome.clone(),
            on_change: self.on_change.map(move |checked: bool| FormEvent::Change {
                path: path.clone(),
                value: Value::Bool(checked),
            }),
        })
    }

    /// The enumeration a select or radio group draws its options from. A
    /// select over a list of enumerations allows several choices.
    fn choices(&self, field: &Field<'_, '_>, allow_multiple: bool) -> FormResult<(Vec<SelectEntry>, bool)> {
        let (enumeration, is_multiple) = match field.info.base {
            SchemaNode::List { element } if allow_multiple => {
                (resolve(element, self.definitions)?.base, true)
            }
            base => (base, false),
        };
        if !matches!(enumeration, SchemaNode::Enumeration { .. }) {
            return Err(
                SchemaError::mismatch(&field.path, "enumeration", enumeration.kind_name()).into(),
            );
        }

        let entries = match &field.options.options {
            Some(entries) => entries.clone(),
            None => enum_options(enumeration)?
                .into_iter()
                .map(SelectEntry::from)
                .collect(),
        };
        Ok((entries, is_multiple))
    }

    fn select(&self, field: &Field<'_, '_>, value: &Value) -> FormResult<SelectLocals> {
        let (mut options, is_multiple) = self.choices(field, true)?;

        let current = if is_multiple {
            SelectValue::Multiple(strings(value, &field.path)?)
        } else {
            SelectValue::Single(string(value, &field.path)?.unwrap_or_default())
        };
        if !is_multiple {
            if let Some(null) = &self.form.config.null_option {
                options.insert(0, null.clone().into());
            }
        }

        let path = field.path.clone();
        let on_change = self.on_change.map(move |selected: SelectValue| FormEvent::Change {
            path: path.clone(),
            value: match selected {
                SelectValue::Single(value) if value.is_empty() => Value::Null,
                SelectValue::Single(value) => Value::String(value),
                SelectValue::Multiple(values) => {
                    Value::Array(values.into_iter().map(Value::String).collect())
                }
            },
        });

        Ok(SelectLocals {
            id: Some(self.id(field.options)),
            value: current,
            is_multiple,
            options,
            attrs: Self::attrs(field.options),
            chrome: field.chrome.clone(),
            on_change,
        })
    }

    fn radio(&self, field: &Field<'_, '_>, value: &Value) -> FormResult<RadioLocals> {
        let (entries, _) = self.choices(field, false)?;
        let options: Vec<SelectOption> = entries
            .iter()
            .flat_map(SelectEntry::options)
            .cloned()
            .collect();

        let path = field.path.clone();
        Ok(RadioLocals {
            id: self.id(field.options),
            value: string(value, &field.path)?,
            options,
            attrs: Self::attrs(field.options),
            chrome: field.chrome.clone(),
            on_change: self.on_change.map(move |value: String| FormEvent::Change {
                path: path.clone(),
                value: Value::String(value),
            }),
        })
    }

    fn date(&self, field: &Field<'_, '_>, value: &Value) -> FormResult<DateLocals> {
        Ok(DateLocals {
            id: Some(self.id(field.options)),
            value: string(value, &field.path)?,
            attrs: Self::attrs(field.options),
            chrome: field.chrome.clone(),
        })
    }

    fn structure(&mut self, field: &Field<'a, '_>, value: &Value) -> FormResult<StructLocals> {
        let fields = match field.info.base {
            SchemaNode::Structure { fields } => fields,
            other => {
                return Err(SchemaError::mismatch(&field.path, "structure", other.kind_name()).into());
            }
        };
        let object = match value {
            Value::Null => None,
            Value::Object(map) => Some(map),
            _ => return Err(SchemaError::unexpected_value(&field.path, "object").into()),
        };

        // Fields left out of `order` are never rendered.
        let order: Vec<String> = match &field.options.order {
            Some(order) => order
                .iter()
                .filter(|name| {
                    let known = fields.contains_key(*name);
                    if !known {
                        warn!(path = %field.path, field = %name, "Order names an unknown field");
                    }
                    known
                })
                .cloned()
                .collect(),
            None => fields.keys().cloned().collect(),
        };

        let default_options = FieldOptions::default();
        let mut inputs = IndexMap::with_capacity(order.len());
        for (name, child) in order.iter().filter_map(|name| fields.get_key_value(name)) {
            if inputs.contains_key(name) {
                continue;
            }
            let options = field.options.field(name).unwrap_or(&default_options);
            let value = object
                .and_then(|map| map.get(name))
                .unwrap_or(&NULL);
            let node = self.field(
                child,
                options,
                value,
                &field.path.field(name.as_str()),
                field.chrome.disabled,
            )?;
            inputs.insert(name.clone(), node);
        }

        Ok(StructLocals {
            chrome: field.chrome.clone(),
            path: field.path.clone(),
            order,
            inputs,
        })
    }

    fn list(&mut self, field: &Field<'a, '_>, value: &Value) -> FormResult<ListLocals> {
        let element = match field.info.base {
            SchemaNode::List { element } => element.as_ref(),
            other => {
                return Err(SchemaError::mismatch(&field.path, "list", other.kind_name()).into());
            }
        };
        let empty = Vec::new();
        let values = match value {
            Value::Null => &empty,
            Value::Array(items) => items,
            _ => return Err(SchemaError::unexpected_value(&field.path, "array").into()),
        };

        let key = field.path.to_string();
        let row_keys = self
            .keys
            .ensure(&key, values.len(), self.form.ids.as_ref())
            .to_vec();

        let options = field.options;
        let policy = RowPolicy {
            removable: !options.disable_remove,
            orderable: !options.disable_order,
        };
        let default_options = FieldOptions::default();
        let item_options = options.item.as_deref().unwrap_or(&default_options);

        let mut items = Vec::with_capacity(values.len());
        for (index, (item, row_key)) in values.iter().zip(row_keys).enumerate() {
            let input = self.field(
                element,
                item_options,
                item,
                &field.path.index(index),
                field.chrome.disabled,
            )?;
            let buttons = row_actions(index, values.len(), policy)
                .into_iter()
                .map(|action| self.row_button(action, &field.path, index))
                .collect();
            items.push(ListItem {
                key: row_key,
                input,
                buttons,
            });
        }

        let add = (!options.disable_add).then(|| {
            let on_change = self.on_change.clone();
            let path = field.path.clone();
            ListButton::new(
                self.form.config.i18n.add.as_str(),
                OnClick::new(move || on_change.call(FormEvent::Add { path: path.clone() })),
            )
        });

        Ok(ListLocals {
            chrome: field.chrome.clone(),
            path: field.path.clone(),
            items,
            add,
        })
    }

    fn row_button(&self, action: RowAction, path: &FieldPath, index: usize) -> ListButton {
        let event = match action.displacement(index) {
            Some((from, to)) => FormEvent::Move {
                path: path.clone(),
                from,
                to,
            },
            None => FormEvent::Remove {
                path: path.clone(),
                index,
            },
        };
        let on_change = self.on_change.clone();
        ListButton::new(
            action.label(&self.form.config.i18n),
            OnClick::new(move || on_change.call(event.clone())),
        )
    }
}

/// Turn typed text back into a value. Empty text clears the field; numeric
/// fields keep text that does not parse so the validator can report it.
fn coerce(text: &str, primitive: Primitive) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    let parsed = match primitive {
        Primitive::Integer => text.trim().parse::<i64>().ok().map(Value::from),
        Primitive::Number => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::String(text.to_string()))
}

fn string(value: &Value, path: &FieldPath) -> FormResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(SchemaError::unexpected_value(path, "string").into()),
    }
}

fn strings(value: &Value, path: &FieldPath) -> FormResult<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(SchemaError::unexpected_value(path, "list of strings").into()),
            })
            .collect(),
        _ => Err(SchemaError::unexpected_value(path, "list of strings").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce("", Primitive::Number), Value::Null);
        assert_eq!(coerce("12", Primitive::Integer), json!(12));
        assert_eq!(coerce(" 2.5 ", Primitive::Number), json!(2.5));
        assert_eq!(coerce("12a", Primitive::Integer), json!("12a"));
        assert_eq!(coerce("1.5", Primitive::Integer), json!("1.5"));
    }

    #[test]
    fn test_coerce_text_is_kept() {
        assert_eq!(coerce(" padded ", Primitive::String), json!(" padded "));
        assert_eq!(coerce("", Primitive::String), Value::Null);
    }

    #[test]
    fn test_strings_rejects_non_strings() {
        let path = FieldPath::root().field("tags");
        assert_eq!(strings(&json!(["a", "b"]), &path).unwrap(), ["a", "b"]);
        assert!(strings(&json!([1]), &path).is_err());
        assert!(strings(&Value::Null, &path).unwrap().is_empty());
    }
}
