//! Test module for formgen
//!
//! Property-based tests (proptest) for the structural parts of the crate and
//! behavioural tests for the Semantic templates.


#[cfg(test)]
pub mod move_tests;

#[cfg(test)]
pub mod resolve_tests;
