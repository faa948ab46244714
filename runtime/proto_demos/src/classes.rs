//! Classes by delegation: a factory that inherits from a methods record,
//! a constructor with a `prototype`, and the `constructor` back-reference.

use proto_objects::inherit;
use proto_value::{require_function, type_mismatch, EvalResult, Function, Record, Value};

use crate::{arg, receiver, Chapter, Demo, DemoContext};

pub const CHAPTER: Chapter = Chapter {
    name: "classes",
    title: "Classes and prototypes",
    demos: &[
        Demo {
            name: "factory",
            run: factory_demo,
        },
        Demo {
            name: "constructor",
            run: constructor_demo,
        },
        Demo {
            name: "shared_parent",
            run: shared_parent_demo,
        },
        Demo {
            name: "constructor_property",
            run: constructor_property_demo,
        },
    ],
};

/// `a <= b`, comparing strings lexicographically and everything else
/// numerically.
fn less_or_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Str(a), Value::Str(b)) => a <= b,
        _ => a.to_number() <= b.to_number(),
    }
}

/// Methods shared by every range: `includes(x)`, `foreach(f)`, and
/// `toString()`. Ranges carry their own `from` and `to`.
pub fn range_methods() -> EvalResult<Record> {
    let methods = Record::new();
    methods.set(
        "includes",
        Function::new("includes", 1, |this, args| {
            let x = arg(args, 0);
            Ok(Value::Bool(
                less_or_equal(&this.get("from")?, &x) && less_or_equal(&x, &this.get("to")?),
            ))
        }),
    )?;
    methods.set(
        "foreach",
        Function::new("foreach", 1, |this, args| {
            let callback = arg(args, 0);
            let f = require_function(&callback)?;
            let to = this.get("to")?.to_number();
            let mut x = this.get("from")?.to_number().ceil();
            while x <= to {
                f.invoke(&[Value::number(x)])?;
                x += 1.0;
            }
            Ok(Value::Undefined)
        }),
    )?;
    methods.set(
        "toString",
        Function::new("toString", 0, |this, _| {
            Ok(Value::string(format!(
                "({}...{})",
                this.get("from")?.to_js_string()?,
                this.get("to")?.to_js_string()?
            )))
        }),
    )?;
    Ok(methods)
}

/// A new range delegating to `parent`.
pub fn range_with(from: Value, to: Value, parent: &Record) -> EvalResult<Record> {
    let range = inherit(&Value::Record(parent.clone()))?;
    range.set("from", from)?;
    range.set("to", to)?;
    Ok(range)
}

/// The `range(from, to)` factory. Its shared methods live in
/// `range.methods`.
pub fn range_factory() -> EvalResult<Function> {
    let methods = range_methods()?;
    let shared = methods.clone();
    let factory = Function::new("range", 2, move |_, args| {
        range_with(arg(args, 0), arg(args, 1), &shared).map(Value::Record)
    });
    factory.properties().set("methods", methods)?;
    Ok(factory)
}

/// A constructor that initializes `this.from` and `this.to`, with
/// `prototype` as the shared parent of every instance.
pub fn range_constructor(prototype: &Record) -> EvalResult<Function> {
    let constructor = Function::new("Range", 2, |this, args| {
        let instance = receiver(this)?;
        instance.set("from", arg(args, 0))?;
        instance.set("to", arg(args, 1))?;
        Ok(Value::Undefined)
    });
    constructor.set_prototype(prototype)?;
    Ok(constructor)
}

/// Print each integer of `range` on its own line.
fn print_each(ctx: &DemoContext, range: &Record) -> EvalResult<()> {
    let printer = ctx.printer().clone();
    let print = Function::new("print", 1, move |_, args| {
        printer.println(&arg(args, 0).to_js_string()?);
        Ok(Value::Undefined)
    });
    range.call_method("foreach", &[Value::Function(print)])?;
    Ok(())
}

fn show_range(ctx: &DemoContext, range: &Record) -> EvalResult<()> {
    let includes = range.call_method("includes", &[Value::number(2)])?;
    ctx.show("r.includes(2)", &includes)?;
    print_each(ctx, range)?;
    ctx.show("r", &Value::Record(range.clone()))
}

fn factory_demo(ctx: &DemoContext) -> EvalResult<()> {
    let range = range_factory()?;
    let r = range.invoke(&[Value::number(1), Value::number(3)])?;
    let r = r
        .as_record()
        .ok_or_else(|| type_mismatch("record", r.type_name()))?;
    show_range(ctx, r)
}

fn constructor_demo(ctx: &DemoContext) -> EvalResult<()> {
    let range = range_constructor(&range_methods()?)?;
    let r = range.construct(&[Value::number(1), Value::number(3)])?;
    show_range(ctx, &r)?;
    let constructor = r.get("constructor")?;
    ctx.println(&format!(
        "r.constructor is Range: {}",
        constructor.as_function().is_some_and(|f| f.ptr_eq(&range))
    ));
    Ok(())
}

fn shared_parent_demo(ctx: &DemoContext) -> EvalResult<()> {
    let parent = range_methods()?;
    let made = range_with(Value::number(1), Value::number(3), &parent)?;
    let constructor = range_constructor(&parent)?;
    let built = constructor.construct(&[Value::number(5), Value::number(8)])?;
    ctx.println(&format!(
        "parent of factory range: {}",
        parent.is_prototype_of(&made)
    ));
    ctx.println(&format!(
        "parent of constructed range: {}",
        parent.is_prototype_of(&built)
    ));

    // Methods added to the parent later are visible to both.
    parent.set(
        "span",
        Function::new("span", 0, |this, _| {
            Ok(Value::number(
                this.get("to")?.to_number() - this.get("from")?.to_number(),
            ))
        }),
    )?;
    ctx.show("made.span()", &made.call_method("span", &[])?)?;
    ctx.show("built.span()", &built.call_method("span", &[])?)
}

fn constructor_property_demo(ctx: &DemoContext) -> EvalResult<()> {
    let f = Function::constructor("F", 0, |_, _| Ok(Value::Undefined))?;
    let is_f = |value: &Value| value.as_function().is_some_and(|c| c.ptr_eq(&f));

    let prototype = f
        .prototype()?
        .ok_or_else(|| type_mismatch("prototype record", "undefined"))?;
    ctx.println(&format!(
        "F.prototype.constructor === F: {}",
        is_f(&prototype.get("constructor")?)
    ));
    ctx.println(&format!(
        "constructor enumerable: {}",
        prototype.own_enumerable_keys().contains(&"constructor".to_owned())
    ));

    let o = f.construct(&[])?;
    ctx.println(&format!(
        "o.constructor === F: {}",
        is_f(&o.get("constructor")?)
    ));
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
