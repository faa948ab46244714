//! Proto Value - runtime values and the delegating object model for protokit.
//!
//! This crate provides:
//! - Runtime values (`Value`) with the scripting language's truthiness,
//!   strict equality, and string conversion
//! - Records (`Record`) with ordered own keys and a single-parent delegation
//!   link used for fallback lookups
//! - Property slots (`Slot`) and partial descriptors (`PropertyDescriptor`)
//!   carrying writable/enumerable/configurable attributes or getter/setter
//!   pairs
//! - Receiver-aware native functions (`Function`)
//! - Evaluation errors (`EvalError`, `EvalResult`) and their factory functions
//!
//! # Ownership
//!
//! Records and functions are `Rc` handles. Whoever holds a handle keeps the
//! object alive; nothing is ever destroyed explicitly. The only back-edge in
//! the model, `prototype.constructor`, is held weakly.

mod errors;
mod function;
mod record;
mod slot;
mod value;

pub use errors::{EvalError, EvalResult};
pub use function::{require_function, Function, NativeFn};
pub use record::Record;
pub use slot::{PropertyDescriptor, PropertyFlags, Slot};
pub use value::{count_to_f64, format_number, join_values, Value};

// Re-export error constructors for use by other crates
pub use errors::{
    cyclic_delegation, invalid_argument, no_setter, not_callable, not_configurable,
    not_extensible, read_only, thrown, type_mismatch, unknown_operator, validation_failed,
};
