//! Select and radio option entries.

use serde::{Deserialize, Serialize};

/// A single selectable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A labelled group of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptGroup {
    pub label: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    pub options: Vec<SelectOption>,
}

impl OptGroup {
    pub fn new(label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            options,
        }
    }
}

/// An entry of a select control: entries carrying a `label` are groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectEntry {
    Group(OptGroup),
    Option(SelectOption),
}

impl From<SelectOption> for SelectEntry {
    fn from(option: SelectOption) -> Self {
        Self::Option(option)
    }
}

impl From<OptGroup> for SelectEntry {
    fn from(group: OptGroup) -> Self {
        Self::Group(group)
    }
}

impl SelectEntry {
    /// The plain options of this entry, flattening groups.
    pub fn options(&self) -> Vec<&SelectOption> {
        match self {
            Self::Option(option) => vec![option],
            Self::Group(group) => group.options.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_with_label_deserializes_as_group() {
        let json = r#"[
            { "value": "fr", "text": "France" },
            { "label": "Asia", "options": [ { "value": "jp", "text": "Japan", "disabled": true } ] }
        ]"#;
        let entries: Vec<SelectEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0], SelectOption::new("fr", "France").into());
        assert_eq!(
            entries[1],
            OptGroup::new("Asia", vec![SelectOption::new("jp", "Japan").disabled(true)]).into()
        );
    }

    #[test]
    fn test_flattened_options() {
        let group: SelectEntry = OptGroup::new(
            "Nordic",
            vec![SelectOption::new("se", "Sweden"), SelectOption::new("no", "Norway")],
        )
        .into();
        let values: Vec<_> = group.options().iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["se", "no"]);
    }
}
