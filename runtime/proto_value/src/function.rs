//! Callable function values.
//!
//! A function is a native closure taking `(receiver, args)`, plus a name, a
//! declared arity, and its own property record. Constructor functions also
//! get a `prototype` record whose `constructor` property refers back to the
//! function through a weak handle, so the pair does not keep itself alive.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::errors::{not_callable, EvalResult};
use crate::{PropertyDescriptor, Record, Value};

/// Native function signature: receiver first, then positional arguments.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> EvalResult;

struct FunctionInner {
    name: Rc<str>,
    arity: usize,
    body: Box<NativeFn>,
    properties: Record,
}

/// A shared, callable function value.
#[derive(Clone)]
pub struct Function(Rc<FunctionInner>);

impl Function {
    /// Create a plain function.
    pub fn new(
        name: impl Into<Rc<str>>,
        arity: usize,
        body: impl Fn(&Value, &[Value]) -> EvalResult + 'static,
    ) -> Self {
        Function(Rc::new(FunctionInner {
            name: name.into(),
            arity,
            body: Box::new(body),
            properties: Record::new(),
        }))
    }

    /// Create an anonymous function that ignores its receiver.
    pub fn lambda(arity: usize, body: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        Function::new("", arity, move |_this, args| body(args))
    }

    /// Create a constructor function with a fresh `prototype` record.
    ///
    /// `prototype.constructor` is a non-enumerable accessor that resolves to
    /// this function for as long as the function is alive.
    pub fn constructor(
        name: impl Into<Rc<str>>,
        arity: usize,
        body: impl Fn(&Value, &[Value]) -> EvalResult + 'static,
    ) -> EvalResult<Self> {
        let func = Function::new(name, arity, body);
        func.set_prototype(&Record::new())?;
        Ok(func)
    }

    /// Install `proto` as this function's `prototype` record.
    ///
    /// The record's `constructor` property is pointed back at this function
    /// unless it already defines one of its own.
    pub fn set_prototype(&self, proto: &Record) -> EvalResult<()> {
        if !proto.has_own("constructor") {
            let weak: Weak<FunctionInner> = Rc::downgrade(&self.0);
            let getter = Function::new("get constructor", 0, move |_this, _args| {
                Ok(weak
                    .upgrade()
                    .map_or(Value::Undefined, |inner| Value::Function(Function(inner))))
            });
            proto.define_property(
                "constructor",
                PropertyDescriptor::accessor(Some(getter), None, false, true),
            )?;
        }
        self.0.properties.define_property(
            "prototype",
            PropertyDescriptor::data(Value::Record(proto.clone()), true, false, false),
        )
    }

    /// The `prototype` record, if this function has one.
    pub fn prototype(&self) -> EvalResult<Option<Record>> {
        Ok(self.0.properties.get("prototype")?.as_record().cloned())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.0.arity
    }

    /// Properties stored on the function object itself.
    #[inline]
    pub fn properties(&self) -> &Record {
        &self.0.properties
    }

    #[tracing::instrument(level = "trace", skip_all, fields(name = %self.0.name, argc = args.len()))]
    pub fn call(&self, this: &Value, args: &[Value]) -> EvalResult {
        (self.0.body)(this, args)
    }

    /// Call with an `undefined` receiver.
    #[inline]
    pub fn invoke(&self, args: &[Value]) -> EvalResult {
        self.call(&Value::Undefined, args)
    }

    /// Construct a new record the way `new F(...)` does.
    ///
    /// The new record delegates to `F.prototype` (or has no parent when that
    /// is not a record). If the body returns a record, that record wins.
    pub fn construct(&self, args: &[Value]) -> EvalResult<Record> {
        let instance = match self.prototype()? {
            Some(proto) => Record::with_parent(proto),
            None => Record::new(),
        };
        let this = Value::Record(instance.clone());
        match self.call(&this, args)? {
            Value::Record(returned) => Ok(returned),
            _ => Ok(instance),
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.0.name)
            .field("arity", &self.0.arity)
            .finish_non_exhaustive()
    }
}

/// Extract a function from a value, or fail with `NotCallable`.
pub fn require_function(value: &Value) -> EvalResult<&Function> {
    value
        .as_function()
        .ok_or_else(|| not_callable(value.type_name()))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
