//! Closures: private state shared by functions, validated private
//! properties, and the function combinators.

use std::cell::{Cell, OnceCell, RefCell};
use std::rc::Rc;

use proto_func::{bind, compose, memoize, not, partial, partial_left, partial_right, trace};
use proto_objects::keys;
use proto_value::{not_callable, thrown, validation_failed, EvalResult, Function, Record, Value};

use crate::functions::subtract;
use crate::{arg, Chapter, Demo, DemoContext};

pub const CHAPTER: Chapter = Chapter {
    name: "closures",
    title: "Closures and higher-order functions",
    demos: &[
        Demo {
            name: "private_counter",
            run: private_counter,
        },
        Demo {
            name: "private_property",
            run: private_property,
        },
        Demo {
            name: "memoized_gcd",
            run: memoized_gcd,
        },
        Demo {
            name: "memoized_factorial",
            run: memoized_factorial_demo,
        },
        Demo {
            name: "combinators",
            run: combinators,
        },
    ],
};

/// State shared by one counter's getter and setter and nothing else.
struct CounterState {
    n: Cell<f64>,
}

/// A record whose `count` accessor returns a private counter and then
/// increments it. Assigning `count` only moves the counter forward.
///
/// Each call creates independent state.
pub fn counter(start: f64) -> EvalResult<Record> {
    let state = Rc::new(CounterState {
        n: Cell::new(start),
    });
    let reader = Rc::clone(&state);
    let get = Function::new("get count", 0, move |_, _| {
        let n = reader.n.get();
        reader.n.set(n + 1.0);
        Ok(Value::number(n))
    });
    let set = Function::new("set count", 1, move |_, args| {
        let requested = arg(args, 0).to_number();
        if requested > state.n.get() {
            state.n.set(requested);
            Ok(Value::Undefined)
        } else {
            Err(thrown("count can only be set to a larger value"))
        }
    });
    let record = Record::new();
    record.define_accessor("count", Some(get), Some(set))?;
    Ok(record)
}

/// Add `get<name>` and `set<name>` methods to `record` that share a
/// private value, initially `undefined`.
///
/// With a `predicate`, `set<name>` rejects values it does not accept with
/// `ValidationFailed` and keeps the previous value.
pub fn add_private_property(
    record: &Record,
    name: &str,
    predicate: Option<Function>,
) -> EvalResult<()> {
    let value = Rc::new(RefCell::new(Value::Undefined));
    let stored = Rc::clone(&value);
    let getter = Function::new(format!("get{name}"), 0, move |_, _| {
        Ok(stored.borrow().clone())
    });
    let key = name.to_owned();
    let setter = Function::new(format!("set{name}"), 1, move |_, args| {
        let candidate = arg(args, 0);
        if let Some(check) = &predicate {
            if !check.invoke(&[candidate.clone()])?.is_truthy() {
                return Err(validation_failed(&key, &candidate));
            }
        }
        *value.borrow_mut() = candidate;
        Ok(Value::Undefined)
    });
    record.set(&format!("get{name}"), getter)?;
    record.set(&format!("set{name}"), setter)
}

/// Euclid's greatest common divisor.
pub fn gcd() -> Function {
    Function::new("gcd", 2, |_, args| {
        let mut a = arg(args, 0).to_number().abs();
        let mut b = arg(args, 1).to_number().abs();
        if a < b {
            std::mem::swap(&mut a, &mut b);
        }
        while b > 0.0 {
            (a, b) = (b, a % b);
        }
        Ok(Value::number(a))
    })
}

/// Memoized recursive factorial.
///
/// The recursion goes through the memoized function, so computing `n!`
/// caches every smaller factorial too. The function refers to itself and
/// is never freed.
pub fn memoized_factorial() -> Function {
    let slot: Rc<OnceCell<Function>> = Rc::new(OnceCell::new());
    let this_fn = Rc::clone(&slot);
    let body = Function::new("factorial", 1, move |_, args| {
        let n = arg(args, 0).to_number();
        if n <= 1.0 {
            return Ok(Value::number(1));
        }
        let recurse = this_fn.get().ok_or_else(|| not_callable("undefined"))?;
        let previous = recurse.invoke(&[Value::number(n - 1.0)])?;
        Ok(Value::number(n * previous.to_number()))
    });
    slot.get_or_init(|| memoize(&body)).clone()
}

fn private_counter(ctx: &DemoContext) -> EvalResult<()> {
    let c = counter(1000.0)?;
    let d = counter(0.0)?;
    ctx.show("c.count", &c.get("count")?)?;
    ctx.show("d.count", &d.get("count")?)?;
    c.set("count", 2000)?;
    ctx.show("c.count", &c.get("count")?)?;
    ctx.show("d.count", &d.get("count")?)?;
    if let Err(err) = c.set("count", 2000) {
        ctx.println(&format!("c.count = 2000 rejected: {err}"));
    }
    let names = keys(&Value::Record(c))?;
    ctx.println(&format!("keys(c) = [{}]", names.join(", ")));
    Ok(())
}

fn private_property(ctx: &DemoContext) -> EvalResult<()> {
    let is_string = Function::new("isString", 1, |_, args| {
        Ok(Value::Bool(matches!(arg(args, 0), Value::Str(_))))
    });
    let o = Record::new();
    add_private_property(&o, "Name", Some(is_string))?;
    o.call_method("setName", &[Value::string("Frank")])?;
    ctx.show("o.getName()", &o.call_method("getName", &[])?)?;
    if let Err(err) = o.call_method("setName", &[Value::number(0)]) {
        ctx.println(&format!("o.setName(0) rejected: {err}"));
    }
    ctx.show("o.getName()", &o.call_method("getName", &[])?)?;
    let names = keys(&Value::Record(o))?;
    ctx.println(&format!("keys(o) = [{}]", names.join(", ")));
    Ok(())
}

fn memoized_gcd(ctx: &DemoContext) -> EvalResult<()> {
    let gcdmemo = memoize(&gcd());
    let args = [Value::number(85), Value::number(187)];
    ctx.show("gcd(85, 187)", &gcdmemo.invoke(&args)?)?;
    ctx.show("gcd(85, 187) again", &gcdmemo.invoke(&args)?)
}

fn memoized_factorial_demo(ctx: &DemoContext) -> EvalResult<()> {
    let factorial = memoized_factorial();
    ctx.show("factorial(5)", &factorial.invoke(&[Value::number(5)])?)?;
    ctx.show("factorial(10)", &factorial.invoke(&[Value::number(10)])?)
}

fn combinators(ctx: &DemoContext) -> EvalResult<()> {
    let square = Function::new("square", 1, |_, args| {
        let x = arg(args, 0).to_number();
        Ok(Value::number(x * x))
    });
    let sum = Function::new("sum", 2, |_, args| {
        Ok(Value::number(args.iter().map(Value::to_number).sum::<f64>()))
    });
    let composed = compose(&square, &sum);
    ctx.show(
        "compose(square, sum)(2, 3)",
        &composed.invoke(&[Value::number(2), Value::number(3)])?,
    )?;

    let three = [Value::number(3)];
    let from_ten = partial_left(&subtract(), vec![Value::number(10)]);
    ctx.show("partial_left(subtract, [10])(3)", &from_ten.invoke(&three)?)?;
    let minus_ten = partial_right(&subtract(), vec![Value::number(10)]);
    ctx.show("partial_right(subtract, [10])(3)", &minus_ten.invoke(&three)?)?;
    let decrement = partial(&subtract(), vec![None, Some(Value::number(1))]);
    ctx.show("partial(subtract, [_, 1])(3)", &decrement.invoke(&three)?)?;

    let even = Function::new("even", 1, |_, args| {
        Ok(Value::Bool(arg(args, 0).to_number() % 2.0 == 0.0))
    });
    ctx.show("not(even)(3)", &not(&even).invoke(&three)?)?;

    let greet = Function::new("greet", 0, |this, _| {
        Ok(Value::string(format!("hello, {}", this.get("name")?.to_js_string()?)))
    });
    let owner = Value::Record(Record::from_entries([("name", "protokit")]));
    ctx.show("bind(greet, owner)()", &bind(&greet, owner, Vec::new()).invoke(&[])?)?;

    let rect = Record::from_entries([("width", 3), ("height", 4)]);
    rect.set(
        "area",
        Function::new("area", 0, |this, _| {
            Ok(Value::number(
                this.get("width")?.to_number() * this.get("height")?.to_number(),
            ))
        }),
    )?;
    trace(&rect, "area", ctx.printer().clone())?;
    ctx.show("rect.area()", &rect.call_method("area", &[])?)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
