//! Accessor properties: computed values, validated counters, and
//! generated values.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::Rng;

use proto_objects::inherit;
use proto_value::{thrown, EvalResult, Function, Record, Value};

use crate::{arg, receiver, Chapter, Demo, DemoContext};

pub const CHAPTER: Chapter = Chapter {
    name: "accessors",
    title: "Accessor properties",
    demos: &[
        Demo {
            name: "polar",
            run: polar,
        },
        Demo {
            name: "serial",
            run: serial,
        },
        Demo {
            name: "random",
            run: random,
        },
    ],
};

fn coords(this: &Value) -> EvalResult<(f64, f64)> {
    Ok((this.get("x")?.to_number(), this.get("y")?.to_number()))
}

/// A point `{x, y}` with a read-write polar radius `r` and a read-only
/// angle `theta`.
///
/// Setting `r` rescales `x` and `y` on the receiver, so heirs keep their
/// own coordinates.
pub fn polar_point(x: f64, y: f64) -> EvalResult<Record> {
    let point = Record::from_entries([("x", x), ("y", y)]);
    let get_r = Function::new("get r", 0, |this, _| {
        let (x, y) = coords(this)?;
        Ok(Value::number(x.hypot(y)))
    });
    let set_r = Function::new("set r", 1, |this, args| {
        let (x, y) = coords(this)?;
        let ratio = arg(args, 0).to_number() / x.hypot(y);
        let target = receiver(this)?;
        target.set("x", x * ratio)?;
        target.set("y", y * ratio)?;
        Ok(Value::Undefined)
    });
    let get_theta = Function::new("get theta", 0, |this, _| {
        let (x, y) = coords(this)?;
        Ok(Value::number(y.atan2(x)))
    });
    point.define_accessor("r", Some(get_r), Some(set_r))?;
    point.define_accessor("theta", Some(get_theta), None)?;
    Ok(point)
}

/// A generator of strictly increasing serial numbers.
///
/// Reading `next` returns `$n` and increments it. Assigning `next` moves
/// the counter forward; an assignment below the current value fails and
/// leaves the counter alone.
pub fn serial_number() -> EvalResult<Record> {
    let serial = Record::from_entries([("$n", 0)]);
    let get_next = Function::new("get next", 0, |this, _| {
        let target = receiver(this)?;
        let current = target.get("$n")?;
        target.set("$n", current.to_number() + 1.0)?;
        Ok(current)
    });
    let set_next = Function::new("set next", 1, |this, args| {
        let target = receiver(this)?;
        let requested = arg(args, 0);
        if requested.to_number() >= target.get("$n")?.to_number() {
            target.set("$n", requested)?;
            Ok(Value::Undefined)
        } else {
            Err(thrown("serial number can only be set to a larger value"))
        }
    });
    serial.define_accessor("next", Some(get_next), Some(set_next))?;
    Ok(serial)
}

/// Accessors that yield a fresh random integer on every read:
/// `octet` in `[0, 256)`, `uint16` in `[0, 65536)`, and `int16` in
/// `[-32768, 32768)`.
pub fn random_source(rng: Rc<RefCell<StdRng>>) -> EvalResult<Record> {
    let random = Record::new();
    for (name, low, high) in [
        ("octet", 0, 256),
        ("uint16", 0, 65_536),
        ("int16", -32_768, 32_768),
    ] {
        let rng = Rc::clone(&rng);
        let getter = Function::new(format!("get {name}"), 0, move |_, _| {
            Ok(Value::number(rng.borrow_mut().gen_range(low..high)))
        });
        random.define_accessor(name, Some(getter), None)?;
    }
    Ok(random)
}

fn polar(ctx: &DemoContext) -> EvalResult<()> {
    let p = polar_point(1.0, 1.0)?;
    ctx.show("p.r", &p.get("r")?)?;
    ctx.show("p.theta", &p.get("theta")?)?;

    // q inherits the accessors but owns its coordinates.
    let q = inherit(&Value::Record(p.clone()))?;
    q.set("x", 3)?;
    q.set("y", 4)?;
    ctx.show("q.r", &q.get("r")?)?;
    ctx.show("q.theta", &q.get("theta")?)?;

    q.set("r", 10)?;
    ctx.show("q.x", &q.get("x")?)?;
    ctx.show("q.y", &q.get("y")?)?;
    ctx.show("p.x", &p.get("x")?)?;

    if let Err(err) = p.set("theta", 0) {
        ctx.println(&format!("p.theta = 0 rejected: {err}"));
    }
    Ok(())
}

fn serial(ctx: &DemoContext) -> EvalResult<()> {
    let serial = serial_number()?;
    for _ in 0..3 {
        ctx.show("serial.next", &serial.get("next")?)?;
    }
    serial.set("next", 10)?;
    ctx.show("serial.next", &serial.get("next")?)?;
    if let Err(err) = serial.set("next", 5) {
        ctx.println(&format!("serial.next = 5 rejected: {err}"));
    }
    ctx.show("serial.next", &serial.get("next")?)
}

fn random(ctx: &DemoContext) -> EvalResult<()> {
    let random = random_source(ctx.rng())?;
    for name in ["octet", "uint16", "int16"] {
        ctx.show(&format!("random.{name}"), &random.get(name)?)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
