//! Proto Objects - utilities over delegating records.
//!
//! This crate provides:
//! - Delegation and set-like combination of records (`inherit`, `extend`,
//!   `merge`, `restrict`, `subtract`, `union`, `intersection`, `keys`)
//! - Attribute-preserving copying (`extend_with_descriptors`)
//! - Classification (`classof`, `is_array`, `is_array_like`)
//! - Generic array algorithms over anything array-like (`ArrayLike`)
//!
//! Every function here is deterministic. The only side effects are in-place
//! mutation of an explicitly passed target record and whatever getters or
//! callbacks the caller supplied.

mod array_like;
mod classify;
mod combine;

pub use array_like::{ArrayLike, MAX_MATERIALIZED_LENGTH};
pub use classify::{classof, is_array, is_array_like, MAX_ARRAY_LENGTH};
pub use combine::{
    extend, extend_with_descriptors, inherit, intersection, keys, merge, restrict, subtract,
    union,
};
