//! Property-based tests for wrapper unwrapping
//!
//! - Any stack of optional, refinement and reference wrappers resolves to the
//!   node it wraps
//! - The optional and refined flags report whether such a wrapper was seen
//! - Reference loops of any length fail instead of spinning

use crate::error::SchemaError;
use crate::schema::{Definitions, SchemaNode};
use crate::type_info::resolve;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Wrapper {
    Optional,
    Refinement,
    Reference,
}

fn wrapper() -> impl Strategy<Value = Wrapper> {
    prop_oneof![
        Just(Wrapper::Optional),
        Just(Wrapper::Refinement),
        Just(Wrapper::Reference),
    ]
}

fn base() -> impl Strategy<Value = SchemaNode> {
    prop_oneof![
        Just(SchemaNode::string()),
        Just(SchemaNode::number()),
        Just(SchemaNode::boolean()),
        Just(SchemaNode::date()),
        Just(SchemaNode::enumeration([("a", "A"), ("b", "B")])),
        Just(SchemaNode::structure([("name", SchemaNode::string())])),
        Just(SchemaNode::list(SchemaNode::optional(SchemaNode::integer()))),
    ]
}

/// Wrap `base` innermost-first; every reference gets a fresh definition.
fn wrap(base: SchemaNode, wrappers: &[Wrapper]) -> (SchemaNode, Definitions) {
    let mut defs = Definitions::new();
    let node = wrappers
        .iter()
        .enumerate()
        .fold(base, |node, (i, wrapper)| match wrapper {
            Wrapper::Optional => SchemaNode::optional(node),
            Wrapper::Refinement => SchemaNode::refinement(node),
            Wrapper::Reference => {
                let name = format!("Def{}", i);
                defs.insert(name.clone(), node);
                SchemaNode::reference(name)
            }
        });
    (node, defs)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The base reached is the wrapped node, and the flags match the stack
    #[test]
    fn prop_resolve_any_wrapper_chain(
        base in base(),
        wrappers in prop::collection::vec(wrapper(), 0..12),
    ) {
        let (node, defs) = wrap(base.clone(), &wrappers);
        let info = resolve(&node, &defs).unwrap();

        prop_assert_eq!(info.base, &base);
        prop_assert_eq!(
            info.is_optional,
            wrappers.iter().any(|w| matches!(w, Wrapper::Optional))
        );
        prop_assert_eq!(
            info.is_refined,
            wrappers.iter().any(|w| matches!(w, Wrapper::Refinement))
        );
        prop_assert!(!info.base.is_wrapper());
    }

    /// A ring of references, possibly interleaved with wrappers, is a cycle
    #[test]
    fn prop_reference_ring_is_cycle(
        len in 1usize..6,
        wrappers in prop::collection::vec(prop::option::of(wrapper()), 6),
    ) {
        let mut defs = Definitions::new();
        for i in 0..len {
            let next = SchemaNode::reference(format!("R{}", (i + 1) % len));
            let node = match wrappers[i] {
                Some(Wrapper::Optional) => SchemaNode::optional(next),
                Some(Wrapper::Refinement) => SchemaNode::refinement(next),
                _ => next,
            };
            defs.insert(format!("R{}", i), node);
        }

        let entry = SchemaNode::reference("R0");
        let result = resolve(&entry, &defs);
        prop_assert!(
            matches!(result, Err(SchemaError::Cycle { .. })),
            "expected a cycle, got {:?}",
            result
        );
    }
}
