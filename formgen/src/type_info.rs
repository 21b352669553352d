//! Wrapper unwrapping and enumeration extraction.

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::options::SelectOption;
use crate::schema::{Definitions, SchemaNode, lookup};

/// The result of unwrapping a schema node down to its base kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeInfo<'a> {
    /// An optional wrapper was seen somewhere in the chain.
    pub is_optional: bool,
    /// A refinement wrapper was seen somewhere in the chain.
    pub is_refined: bool,
    /// The first node that is neither a wrapper nor a reference.
    pub base: &'a SchemaNode,
}

/// Strip optional, refinement and reference wrappers (in any order and any
/// multiplicity) until a node of another kind is reached.
///
/// Node identity is tracked, so a chain that comes back to a node it already
/// passed through fails with [`SchemaError::Cycle`] instead of looping.
pub fn resolve<'a>(
    node: &'a SchemaNode,
    definitions: &'a Definitions,
) -> Result<TypeInfo<'a>, SchemaError> {
    let mut is_optional = false;
    let mut is_refined = false;
    let mut visited: HashSet<*const SchemaNode> = HashSet::new();
    let mut chain = Vec::new();
    let mut current = node;

    loop {
        chain.push(chain_label(current));
        if !visited.insert(current as *const SchemaNode) {
            return Err(SchemaError::Cycle { chain });
        }

        current = match current {
            SchemaNode::Optional { inner } => {
                is_optional = true;
                inner.as_ref()
            }
            SchemaNode::Refinement { inner, .. } => {
                is_refined = true;
                inner.as_ref()
            }
            SchemaNode::Reference { name } => lookup(definitions, name)?,
            base => {
                return Ok(TypeInfo {
                    is_optional,
                    is_refined,
                    base,
                });
            }
        };
    }
}

fn chain_label(node: &SchemaNode) -> String {
    match node {
        SchemaNode::Reference { name } => name.clone(),
        other => other.kind_name().to_string(),
    }
}

/// Turn an enumeration node into select options, one per entry, in the
/// enumeration's declaration order.
pub fn enum_options(node: &SchemaNode) -> Result<Vec<SelectOption>, SchemaError> {
    match node {
        SchemaNode::Enumeration { values } => Ok(values
            .iter()
            .map(|(value, text)| SelectOption::new(value.clone(), text.clone()))
            .collect()),
        other => Err(SchemaError::mismatch(
            "",
            "enumeration",
            other.kind_name(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Primitive;

    fn no_defs() -> Definitions {
        Definitions::new()
    }

    #[test]
    fn test_resolve_plain_node() {
        let defs = no_defs();
        let node = SchemaNode::string();
        let info = resolve(&node, &defs).unwrap();
        assert!(!info.is_optional);
        assert!(!info.is_refined);
        assert_eq!(info.base, &node);
    }

    #[test]
    fn test_resolve_refinement_inside_optional() {
        let defs = no_defs();
        let node = SchemaNode::optional(SchemaNode::refinement(SchemaNode::number()));
        let info = resolve(&node, &defs).unwrap();
        assert!(info.is_optional);
        assert!(info.is_refined);
        assert_eq!(
            info.base,
            &SchemaNode::Primitive {
                primitive: Primitive::Number
            }
        );
    }

    #[test]
    fn test_resolve_follows_references() {
        let mut defs = no_defs();
        defs.insert(
            "Email".to_string(),
            SchemaNode::refinement_named(SchemaNode::string(), "Email"),
        );
        let node = SchemaNode::optional(SchemaNode::reference("Email"));
        let info = resolve(&node, &defs).unwrap();
        assert!(info.is_optional);
        assert!(info.is_refined);
        assert_eq!(info.base, &SchemaNode::string());
    }

    #[test]
    fn test_resolve_detects_reference_cycle() {
        let mut defs = no_defs();
        defs.insert(
            "A".to_string(),
            SchemaNode::optional(SchemaNode::reference("B")),
        );
        defs.insert(
            "B".to_string(),
            SchemaNode::refinement(SchemaNode::reference("A")),
        );
        let node = SchemaNode::reference("A");
        let err = resolve(&node, &defs).unwrap_err();
        let SchemaError::Cycle { chain } = err else {
            panic!("expected a cycle error, got {err:?}");
        };
        assert_eq!(chain.first().map(String::as_str), Some("A"));
        assert_eq!(chain.last().map(String::as_str), Some("optional"));
    }

    #[test]
    fn test_resolve_self_reference() {
        let mut defs = no_defs();
        defs.insert("Loop".to_string(), SchemaNode::reference("Loop"));
        let node = SchemaNode::reference("Loop");
        assert!(matches!(
            resolve(&node, &defs),
            Err(SchemaError::Cycle { .. })
        ));
    }

    #[test]
    fn test_resolve_unknown_reference() {
        let defs = no_defs();
        let node = SchemaNode::optional(SchemaNode::reference("Nope"));
        assert_eq!(
            resolve(&node, &defs),
            Err(SchemaError::UnknownReference {
                name: "Nope".to_string()
            })
        );
    }

    #[test]
    fn test_enum_options_in_mapping_order() {
        let node = SchemaNode::enumeration([("a", "Alpha feature"), ("b", "Beta")]);
        let options = enum_options(&node).unwrap();
        assert_eq!(
            options,
            vec![
                SelectOption::new("a", "Alpha feature"),
                SelectOption::new("b", "Beta"),
            ]
        );
    }

    #[test]
    fn test_enum_options_rejects_other_kinds() {
        assert!(matches!(
            enum_options(&SchemaNode::string()),
            Err(SchemaError::Mismatch {
                expected: "enumeration",
                found: "primitive",
                ..
            })
        ));
    }
}
