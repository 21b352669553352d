//! Leaf field renderers.
//!
//! Every leaf renders as a `field` wrapper holding, in order: the label, the
//! control, the help hint and the error hint. Absent decorations are omitted.
//! The checkbox is the exception: its label follows the control.

use crate::error::{FormError, FormResult};
use crate::events::{EventHandler, EventKind};
use crate::locals::{
    CheckboxLocals, Chrome, DateLocals, InputType, RadioLocals, SelectLocals, SelectValue,
    TextboxInput, TextboxLocals,
};
use crate::node::{Attrs, Element, Node, Tag};
use crate::options::{OptGroup, SelectEntry, SelectOption};

use super::parts;

const DESCRIBED_BY: &str = "aria-describedby";

/// Point the control at its help hint, unless the caller already chose a
/// description. Needs both help text and an identifier.
fn describe_help(attrs: &mut Attrs, chrome: &Chrome) {
    if chrome.help.is_none() || attrs.contains(DESCRIBED_BY) {
        return;
    }
    if let Some(id) = attrs.text("id").map(parts::tip_id) {
        attrs.set(DESCRIBED_BY, id);
    }
}

fn control_id(attrs: &Attrs) -> Option<String> {
    attrs.text("id").map(str::to_string)
}

/// A bare hidden input without chrome.
pub fn hidden(locals: &TextboxLocals) -> Node {
    let on_change = locals.on_change.clone();
    Element::new(Tag::Input)
        .attr("type", InputType::Hidden.as_str())
        .attr("value", locals.value.clone().unwrap_or_default())
        .attr_opt("name", locals.name.as_deref())
        .on(
            EventKind::Change,
            EventHandler::new(move |e| on_change.call(TextboxInput::Text(e.target.value.clone()))),
        )
        .build()
}

/// Text-like inputs, textareas and file pickers.
pub fn textbox(locals: &TextboxLocals) -> Node {
    if locals.input_type == InputType::Hidden {
        return hidden(locals);
    }

    let chrome = &locals.chrome;
    let mut attrs = locals.attrs.clone();

    let tag = if locals.input_type == InputType::Textarea {
        Tag::Textarea
    } else {
        attrs.set("type", locals.input_type.as_str());
        Tag::Input
    };

    if let Some(id) = &locals.id {
        attrs.set("id", id.as_str());
    }
    if let Some(name) = &locals.name {
        attrs.set("name", name.as_str());
    }
    attrs.set_class("form-control", true);
    attrs.set("disabled", chrome.disabled);

    // File inputs cannot be set programmatically.
    let is_file = locals.input_type == InputType::File;
    if !is_file {
        attrs.set("value", locals.value.clone().unwrap_or_default());
    }
    describe_help(&mut attrs, chrome);

    let id = control_id(&attrs);
    let on_change = locals.on_change.clone();
    let control = Element::new(tag)
        .attrs(attrs)
        .on(
            EventKind::Change,
            EventHandler::new(move |e| {
                let input = if is_file {
                    TextboxInput::File(e.target.files.first().cloned())
                } else {
                    TextboxInput::Text(e.target.value.clone())
                };
                on_change.call(input)
            }),
        )
        .build();

    parts::field(chrome)
        .children([
            parts::label(chrome.label.as_deref(), id.as_deref()),
            Some(control),
            parts::help(chrome, id.as_deref()),
            parts::error(chrome),
        ])
        .build()
}

/// A checkbox. The label comes after the control, inside a checkbox group.
pub fn checkbox(locals: &CheckboxLocals) -> Node {
    let chrome = &locals.chrome;
    let mut attrs = locals.attrs.clone();
    attrs.set("type", "checkbox");
    if let Some(id) = &locals.id {
        attrs.set("id", id.as_str());
    }
    attrs.set("disabled", chrome.disabled);
    attrs.set("checked", locals.value);
    describe_help(&mut attrs, chrome);

    let id = control_id(&attrs);
    let on_change = locals.on_change.clone();
    let control = Element::new(Tag::Input)
        .attrs(attrs)
        .on(
            EventKind::Change,
            EventHandler::new(move |e| on_change.call(e.target.checked)),
        )
        .build();

    let group = Element::new(Tag::Div)
        .attr("class", parts::classes(&["ui", "checkbox"]))
        .children([
            Some(control),
            parts::label(chrome.label.as_deref(), id.as_deref()),
            parts::help(chrome, id.as_deref()),
            parts::error(chrome),
        ])
        .build();

    Element::new(Tag::Div)
        .class("field")
        .class("inline")
        .class_if("error", chrome.has_error)
        .class_if("disabled", chrome.disabled)
        .child(group)
        .build()
}

fn option_node(option: &SelectOption) -> Node {
    Element::new(Tag::Option)
        .attr("disabled", option.disabled)
        .attr("value", option.value.as_str())
        .key(option.value.as_str())
        .text(option.text.as_str())
        .build()
}

fn optgroup_node(group: &OptGroup) -> Node {
    Element::new(Tag::Optgroup)
        .attr("disabled", group.disabled)
        .attr("label", group.label.as_str())
        .key(group.label.as_str())
        .children(group.options.iter().map(|o| Some(option_node(o))))
        .build()
}

/// A single or multiple select.
pub fn select(locals: &SelectLocals) -> Node {
    let chrome = &locals.chrome;
    let mut attrs = locals.attrs.clone();
    if let Some(id) = &locals.id {
        attrs.set("id", id.as_str());
    }
    attrs.set_class("form-control", true);
    attrs.set("multiple", locals.is_multiple);
    attrs.set("disabled", chrome.disabled);
    match &locals.value {
        SelectValue::Single(value) => attrs.set("value", value.as_str()),
        SelectValue::Multiple(values) => attrs.set("value", values.clone()),
    }
    describe_help(&mut attrs, chrome);

    let id = control_id(&attrs);
    let is_multiple = locals.is_multiple;
    let on_change = locals.on_change.clone();
    let handler = EventHandler::new(move |e| {
        let value = if is_multiple {
            // Document order, not the order the options were picked in.
            SelectValue::Multiple(
                e.target
                    .options
                    .iter()
                    .filter(|option| option.selected)
                    .map(|option| option.value.clone())
                    .collect(),
            )
        } else {
            SelectValue::Single(e.target.value.clone())
        };
        on_change.call(value)
    });

    let control = Element::new(Tag::Select)
        .attrs(attrs)
        .on(EventKind::Change, handler)
        .children(locals.options.iter().map(|entry| {
            Some(match entry {
                SelectEntry::Group(group) => optgroup_node(group),
                SelectEntry::Option(option) => option_node(option),
            })
        }))
        .build();

    parts::field(chrome)
        .children([
            parts::label(chrome.label.as_deref(), id.as_deref()),
            Some(control),
            parts::help(chrome, id.as_deref()),
            parts::error(chrome),
        ])
        .build()
}

/// A group of radio buttons, one row per option.
pub fn radio(locals: &RadioLocals) -> Node {
    let chrome = &locals.chrome;
    let id = locals.id.as_str();
    let described_by = locals
        .attrs
        .text(DESCRIBED_BY)
        .map(str::to_string)
        .or_else(|| chrome.label.as_ref().map(|_| id.to_string()));
    let wants_focus = locals
        .attrs
        .get("autofocus")
        .is_some_and(|value| value.is_truthy());
    let on_change = locals.on_change.clone();

    let rows = locals.options.iter().enumerate().map(|(i, option)| {
        let row_id = format!("{}_{}", id, i);
        let mut attrs = locals.attrs.clone();
        attrs.set("type", "radio");
        attrs.set("checked", locals.value.as_deref() == Some(option.value.as_str()));
        attrs.set("disabled", chrome.disabled);
        attrs.set("value", option.value.as_str());
        if wants_focus {
            // Only one element may hold autofocus.
            attrs.set("autofocus", i == 0);
        }
        attrs.set("id", row_id.as_str());
        if let Some(described_by) = &described_by {
            attrs.set(DESCRIBED_BY, described_by.as_str());
        }

        let on_change = on_change.clone();
        let input = Element::new(Tag::Input)
            .attrs(attrs)
            .on(
                EventKind::Change,
                EventHandler::new(move |e| on_change.call(e.target.value.clone())),
            )
            .build();

        // The option text is not a `<label for>` target in this layout, so
        // clicking it forwards the click to the input.
        let target = row_id.clone();
        let text = Element::new(Tag::Label)
            .on(
                EventKind::Click,
                EventHandler::new(move |e| e.document.click(&target)),
            )
            .text(option.text.as_str())
            .build();

        let group = Element::new(Tag::Div)
            .attr("class", parts::classes(&["ui", "radio", "checkbox"]))
            .children([Some(input), Some(text)])
            .build();

        Some(
            Element::new(Tag::Div)
                .class("field")
                .key(option.value.as_str())
                .child(group)
                .build(),
        )
    });

    let control = Element::new(Tag::Div)
        .attr("class", parts::classes(&["grouped", "fields"]))
        .children(rows)
        .build();

    parts::field(chrome)
        .children([
            parts::label(chrome.label.as_deref(), Some(id)),
            Some(control),
            parts::help(chrome, Some(id)),
            parts::error(chrome),
        ])
        .build()
}

/// Dates have no renderer.
pub fn date(_locals: &DateLocals) -> FormResult<Node> {
    Err(FormError::not_supported("date"))
}
