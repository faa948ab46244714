//! Composition, negation, and receiver binding.

use proto_value::{Function, Value};

/// `h(...args) = f(g(...args))`.
///
/// Both `f` and `g` see the receiver `h` was called with.
pub fn compose(f: &Function, g: &Function) -> Function {
    let (f, g) = (f.clone(), g.clone());
    let name = format!("{} . {}", f.name(), g.name());
    Function::new(name, g.arity(), move |this, args| {
        let inner = g.call(this, args)?;
        f.call(this, &[inner])
    })
}

/// Logical negation of `f`'s result, forwarding receiver and arguments.
pub fn not(f: &Function) -> Function {
    let f = f.clone();
    Function::new(format!("not {}", f.name()), f.arity(), move |this, args| {
        Ok(Value::Bool(!f.call(this, args)?.is_truthy()))
    })
}

/// Fix the receiver and leading arguments of `f`.
///
/// The receiver the bound function is later called with is ignored.
pub fn bind(f: &Function, receiver: Value, fixed: Vec<Value>) -> Function {
    let f = f.clone();
    let name = format!("bound {}", f.name());
    let arity = f.arity().saturating_sub(fixed.len());
    Function::new(name, arity, move |_this, args| {
        let mut all = Vec::with_capacity(fixed.len() + args.len());
        all.extend_from_slice(&fixed);
        all.extend_from_slice(args);
        f.call(&receiver, &all)
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
