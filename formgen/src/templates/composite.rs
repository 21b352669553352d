//! Structure and list renderers.
//!
//! Both wrap their rows in a frameless `fieldset`. Disabling is expressed once,
//! on the fieldset, and relies on the presentation layer cascading it to the
//! controls inside. Hosts without that cascading should enable
//! [`RenderConfig::cascade_disabled`](crate::config::RenderConfig::cascade_disabled).

use crate::locals::{Chrome, ListItem, ListLocals, StructLocals};
use crate::node::{Element, Node, Style, Tag};
use crate::path::FieldPath;

use super::parts;

fn fieldset(chrome: &Chrome, path: &FieldPath, rows: Vec<Node>) -> Node {
    Element::new(Tag::Fieldset)
        .attr("disabled", chrome.disabled)
        .attr(
            "style",
            Style::new()
                .with("border", "0")
                .with("margin", "0")
                .with("padding", "0"),
        )
        .class("ui")
        .class("form")
        // Nested structures stand out; the top level is unadorned.
        .class_if("segment", !path.is_empty())
        .class_if("error", chrome.has_error)
        .children(rows.into_iter().map(Some))
        .build()
}

fn header_rows(chrome: &Chrome) -> Vec<Node> {
    let mut rows = Vec::new();
    if let Some(label) = &chrome.label {
        rows.push(parts::legend(label));
    }
    if let Some(help) = &chrome.help {
        rows.push(parts::alert("info", help));
    }
    rows
}

/// A fixed set of pre-rendered fields, shown in `order`.
pub fn structure(locals: &StructLocals) -> Node {
    let chrome = &locals.chrome;
    let mut rows = header_rows(chrome);

    rows.extend(
        locals
            .order
            .iter()
            .filter_map(|name| locals.inputs.get(name).cloned()),
    );

    if let Some(error) = chrome.visible_error() {
        rows.push(parts::alert("error", error));
    }

    fieldset(chrome, &locals.path, rows)
}

fn column(width: &str, child: Node) -> Node {
    Element::new(Tag::Div)
        .attr("class", parts::classes(&[width, "wide", "column"]))
        .child(child)
        .build()
}

fn item_row(item: &ListItem) -> Node {
    let columns = if item.buttons.is_empty() {
        vec![Some(column("sixteen", item.input.clone()))]
    } else {
        let buttons = Element::new(Tag::Div)
            .attr("class", parts::classes(&["ui", "basic", "buttons"]))
            .children(
                item.buttons
                    .iter()
                    .enumerate()
                    .map(|(i, b)| Some(parts::button(&b.label, &b.click, Some(i.to_string())))),
            )
            .build();
        vec![
            Some(column("eight", item.input.clone())),
            Some(column("four", buttons)),
        ]
    };

    Element::new(Tag::Div)
        .attr("class", parts::classes(&["ui", "grid"]))
        .key(item.key.as_str())
        .children(columns)
        .build()
}

/// An ordered collection of rows with per-row buttons and an add control.
pub fn list(locals: &ListLocals) -> Node {
    let chrome = &locals.chrome;
    let mut rows = header_rows(chrome);

    rows.extend(locals.items.iter().map(item_row));

    if let Some(error) = chrome.visible_error() {
        rows.push(parts::alert("error", error));
    }

    if let Some(add) = &locals.add {
        rows.push(parts::button(&add.label, &add.click, None));
    }

    fieldset(chrome, &locals.path, rows)
}
