//! Test module for pattern-router
//!
//! Property-based tests (proptest) for dispatch order, lookup, decoration
//! and currying, plus error serialization.


#[cfg(test)]
pub mod decorator_tests;

#[cfg(test)]
pub mod curry_tests;
