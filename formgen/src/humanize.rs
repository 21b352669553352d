//! Field name to label conversion.

use std::sync::LazyLock;

use regex::Regex;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z]+)").expect("valid camel-case pattern"));

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid separator pattern"));

/// Turn a field name into a readable label.
///
/// Camel-case boundaries and runs of hyphens or whitespace become word
/// breaks, the text is lowercased, a trailing `_id` is dropped and only the
/// first character is capitalized.
///
/// # Example
/// ```rust
/// use formgen::humanize;
///
/// assert_eq!(humanize("firstName"), "First name");
/// assert_eq!(humanize("user_id"), "User");
/// assert_eq!(humanize("  already-set "), "Already set");
/// ```
pub fn humanize(name: &str) -> String {
    let underscored = underscore(name);
    let stripped = underscored.strip_suffix("_id").unwrap_or(&underscored);
    capitalize(&stripped.replace('_', " "))
}

fn underscore(name: &str) -> String {
    let split = CAMEL_BOUNDARY.replace_all(name.trim(), "${1}_${2}");
    SEPARATOR_RUN.replace_all(&split, "_").to_lowercase()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_id_suffix() {
        assert_eq!(humanize("user_id"), "User");
        assert_eq!(humanize("parentId"), "Parent");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(humanize("firstName"), "First name");
        assert_eq!(humanize("homeURL"), "Home url");
        assert_eq!(humanize("line2Text"), "Line2 text");
    }

    #[test]
    fn test_trims_and_collapses_separators() {
        assert_eq!(humanize("  already-set "), "Already set");
        assert_eq!(humanize("a -- b"), "A b");
    }

    #[test]
    fn test_only_first_character_capitalized() {
        assert_eq!(humanize("zip_code"), "Zip code");
        assert_eq!(humanize("x"), "X");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(humanize(""), "");
        assert_eq!(humanize("   "), "");
    }

    #[test]
    fn test_id_only_stripped_at_end() {
        assert_eq!(humanize("id_card"), "Id card");
        assert_eq!(humanize("_id"), "");
    }
}
