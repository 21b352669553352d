//! Templates turn render contexts into node trees.
//!
//! The [`Templates`] trait is the seam between the form driver and a
//! presentation style. [`Semantic`] lays fields out with Semantic UI class
//! names; its renderers are also available as free functions in [`leaf`] and
//! [`composite`].

pub mod composite;
pub mod leaf;

mod parts;

use crate::error::FormResult;
use crate::locals::{
    CheckboxLocals, DateLocals, ListLocals, RadioLocals, SelectLocals, StructLocals,
    TextboxLocals,
};
use crate::node::Node;

/// A set of field renderers.
pub trait Templates: Send + Sync {
    fn textbox(&self, locals: &TextboxLocals) -> FormResult<Node>;

    fn checkbox(&self, locals: &CheckboxLocals) -> FormResult<Node>;

    fn select(&self, locals: &SelectLocals) -> FormResult<Node>;

    fn radio(&self, locals: &RadioLocals) -> FormResult<Node>;

    fn date(&self, locals: &DateLocals) -> FormResult<Node>;

    fn structure(&self, locals: &StructLocals) -> FormResult<Node>;

    fn list(&self, locals: &ListLocals) -> FormResult<Node>;
}

/// Semantic UI layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Semantic;

impl Templates for Semantic {
    fn textbox(&self, locals: &TextboxLocals) -> FormResult<Node> {
        Ok(leaf::textbox(locals))
    }

    fn checkbox(&self, locals: &CheckboxLocals) -> FormResult<Node> {
        Ok(leaf::checkbox(locals))
    }

    fn select(&self, locals: &SelectLocals) -> FormResult<Node> {
        Ok(leaf::select(locals))
    }

    fn radio(&self, locals: &RadioLocals) -> FormResult<Node> {
        Ok(leaf::radio(locals))
    }

    fn date(&self, locals: &DateLocals) -> FormResult<Node> {
        leaf::date(locals)
    }

    fn structure(&self, locals: &StructLocals) -> FormResult<Node> {
        Ok(composite::structure(locals))
    }

    fn list(&self, locals: &ListLocals) -> FormResult<Node> {
        Ok(composite::list(locals))
    }
}
