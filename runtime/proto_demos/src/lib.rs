//! Proto Demos - runnable demonstrations of the protokit object model.
//!
//! Demos are grouped into chapters. Each demo is a plain function taking a
//! [`DemoContext`] and printing through its print handler, so the CLI can
//! send output to stdout while tests capture it in a buffer.

pub mod accessors;
pub mod arrays;
pub mod classes;
pub mod closures;
mod context;
pub mod descriptors;
pub mod functions;
mod registry;

pub use context::DemoContext;
pub use registry::{chapter_names, find_chapter, Chapter, Demo, DemoFn, CHAPTERS};

use proto_value::{type_mismatch, EvalResult, Record, Value};

/// Argument `index`, `undefined` when the caller passed fewer.
pub(crate) fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

/// The receiver of a method call, which must be a record.
pub(crate) fn receiver(this: &Value) -> EvalResult<&Record> {
    this.as_record()
        .ok_or_else(|| type_mismatch("record receiver", this.type_name()))
}
