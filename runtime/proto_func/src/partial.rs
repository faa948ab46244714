//! Partial application.
//!
//! Arguments are assembled in a `SmallVec` so the common case of a few
//! arguments does not allocate.

use smallvec::SmallVec;

use proto_value::{Function, Value};

type Args = SmallVec<[Value; 8]>;

/// Fill the holes of `template` with call arguments.
///
/// Each `None` in `template` takes the next call argument (`undefined` once
/// they run out); arguments left over after the template are appended.
pub fn partial(f: &Function, template: Vec<Option<Value>>) -> Function {
    let f = f.clone();
    let name = format!("partial {}", f.name());
    Function::new(name, f.arity(), move |this, args| {
        let mut rest = args.iter();
        let mut assembled: Args = SmallVec::with_capacity(template.len() + args.len());
        for slot in &template {
            match slot {
                Some(fixed) => assembled.push(fixed.clone()),
                None => assembled.push(rest.next().cloned().unwrap_or_default()),
            }
        }
        assembled.extend(rest.cloned());
        f.call(this, &assembled)
    })
}

/// Prepend `fixed` to the call arguments.
pub fn partial_left(f: &Function, fixed: Vec<Value>) -> Function {
    let f = f.clone();
    let name = format!("partial {}", f.name());
    let arity = f.arity().saturating_sub(fixed.len());
    Function::new(name, arity, move |this, args| {
        let assembled: Args = fixed.iter().chain(args).cloned().collect();
        f.call(this, &assembled)
    })
}

/// Append `fixed` to the call arguments.
pub fn partial_right(f: &Function, fixed: Vec<Value>) -> Function {
    let f = f.clone();
    let name = format!("partial {}", f.name());
    let arity = f.arity().saturating_sub(fixed.len());
    Function::new(name, arity, move |this, args| {
        let assembled: Args = args.iter().chain(&fixed).cloned().collect();
        f.call(this, &assembled)
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
