//! Proto Func - higher-order function combinators for protokit.
//!
//! Every combinator takes existing `Function` handles and returns a new
//! `Function` that closes over them. The receiver a combinator is called
//! with is forwarded to the wrapped functions unless the combinator fixes
//! one (`bind`).
//!
//! - `compose`, `not`, `bind`: composition and negation
//! - `partial`, `partial_left`, `partial_right`: partial application
//! - `memoize`, `memoize_bounded`: result caching keyed by argument text
//! - `trace`: entry/exit logging around a record's method
//! - `print`: configurable output sinks used by `trace` and the demos

mod compose;
mod memoize;
mod partial;
pub mod print;
mod trace;

pub use compose::{bind, compose, not};
pub use memoize::{memo_key, memoize, memoize_bounded};
pub use partial::{partial, partial_left, partial_right};
pub use print::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use trace::trace;
