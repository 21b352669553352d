//! Building blocks shared by the Semantic templates.

use crate::events::{EventHandler, EventKind, OnClick};
use crate::locals::Chrome;
use crate::node::{ClassSet, Element, Node, Tag};

pub(crate) fn classes(names: &[&str]) -> ClassSet {
    names
        .iter()
        .fold(ClassSet::new(), |set, name| set.with(*name, true))
}

/// The `{id}-tip` identifier of a help hint.
pub(crate) fn tip_id(id: &str) -> String {
    format!("{}-tip", id)
}

pub(crate) fn label(text: Option<&str>, html_for: Option<&str>) -> Option<Node> {
    let text = text?;
    Some(
        Element::new(Tag::Label)
            .attr_opt("for", html_for)
            .text(text)
            .build(),
    )
}

pub(crate) fn help(chrome: &Chrome, id: Option<&str>) -> Option<Node> {
    let help = chrome.help.as_deref()?;
    Some(
        Element::new(Tag::Div)
            .attr("class", classes(&["ui", "pointing", "label", "visible"]))
            .attr_opt("id", id.map(tip_id))
            .text(help)
            .build(),
    )
}

pub(crate) fn error(chrome: &Chrome) -> Option<Node> {
    let error = chrome.visible_error()?;
    Some(
        Element::new(Tag::Div)
            .attr("class", classes(&["ui", "pointing", "label", "visible", "red"]))
            .text(error)
            .build(),
    )
}

/// The `field` wrapper around a leaf control.
pub(crate) fn field(chrome: &Chrome) -> Element {
    Element::new(Tag::Div)
        .class("field")
        .class_if("error", chrome.has_error)
        .class_if("disabled", chrome.disabled)
}

pub(crate) fn alert(kind: &str, text: &str) -> Node {
    Element::new(Tag::Div)
        .attr("class", classes(&["ui", "message", kind]))
        .text(text)
        .build()
}

pub(crate) fn legend(text: &str) -> Node {
    Element::new(Tag::Legend)
        .attr("class", classes(&["ui", "header"]))
        .text(text)
        .build()
}

pub(crate) fn button(label: &str, click: &OnClick, key: Option<String>) -> Node {
    let click = click.clone();
    let button = Element::new(Tag::Button)
        .attr("type", "button")
        .attr("class", classes(&["ui", "basic", "button"]))
        .on(EventKind::Click, EventHandler::new(move |_| click.call()))
        .text(label);
    match key {
        Some(key) => button.key(key).build(),
        None => button.build(),
    }
}
