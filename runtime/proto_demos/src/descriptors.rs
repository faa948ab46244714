//! Property descriptors: inspection, definition, redefinition, and locking.

use proto_objects::{extend_with_descriptors, inherit, keys};
use proto_value::{EvalResult, Function, PropertyDescriptor, Record, Value};

use crate::accessors::random_source;
use crate::{Chapter, Demo, DemoContext};

pub const CHAPTER: Chapter = Chapter {
    name: "descriptors",
    title: "Property attributes",
    demos: &[
        Demo {
            name: "inspect",
            run: inspect,
        },
        Demo {
            name: "define",
            run: define,
        },
        Demo {
            name: "define_properties",
            run: define_properties,
        },
        Demo {
            name: "copy_attributes",
            run: copy_attributes,
        },
        Demo {
            name: "locking",
            run: locking,
        },
        Demo {
            name: "prototype_of",
            run: prototype_of,
        },
    ],
};

/// Render a descriptor the way a console prints one, listing only the
/// fields it specifies. A missing descriptor renders as `undefined`.
pub fn describe(desc: Option<&PropertyDescriptor>) -> String {
    let Some(desc) = desc else {
        return "undefined".to_owned();
    };
    let mut fields = Vec::new();
    if let Some(value) = &desc.value {
        fields.push(format!("value: {value}"));
    }
    if let Some(writable) = desc.writable {
        fields.push(format!("writable: {writable}"));
    }
    if let Some(get) = &desc.get {
        fields.push(format!("get: {}", describe_accessor(get.as_ref())));
    }
    if let Some(set) = &desc.set {
        fields.push(format!("set: {}", describe_accessor(set.as_ref())));
    }
    if let Some(enumerable) = desc.enumerable {
        fields.push(format!("enumerable: {enumerable}"));
    }
    if let Some(configurable) = desc.configurable {
        fields.push(format!("configurable: {configurable}"));
    }
    format!("{{{}}}", fields.join(", "))
}

fn describe_accessor(func: Option<&Function>) -> String {
    func.map_or_else(|| "undefined".to_owned(), |f| format!("[Function: {}]", f.name()))
}

fn show_descriptor(ctx: &DemoContext, label: &str, record: &Record, key: &str) {
    let desc = record.get_own_property(key);
    ctx.println(&format!("{label}: {}", describe(desc.as_ref())));
}

fn show_keys(ctx: &DemoContext, label: &str, record: &Record) -> EvalResult<()> {
    let names = keys(&Value::Record(record.clone()))?;
    ctx.println(&format!("keys({label}) = [{}]", names.join(", ")));
    Ok(())
}

fn inspect(ctx: &DemoContext) -> EvalResult<()> {
    let point = Record::from_entries([("x", 1)]);
    show_descriptor(ctx, "{x: 1}.x", &point, "x");

    let random = random_source(ctx.rng())?;
    show_descriptor(ctx, "random.octet", &random, "octet");

    show_descriptor(ctx, "{}.x", &Record::new(), "x");

    // Inherited properties are not own properties.
    let heir = inherit(&Value::Record(point.clone()))?;
    show_descriptor(ctx, "heir.x", &heir, "x");
    Ok(())
}

fn define(ctx: &DemoContext) -> EvalResult<()> {
    let o = Record::new();
    o.define_property(
        "x",
        PropertyDescriptor::data(Value::number(1), true, false, true),
    )?;
    ctx.show("o.x", &o.get("x")?)?;
    show_keys(ctx, "o", &o)?;

    o.define_property("x", PropertyDescriptor::default().writable(false))?;
    if let Err(err) = o.set("x", 2) {
        ctx.println(&format!("o.x = 2 rejected: {err}"));
    }
    ctx.show("o.x", &o.get("x")?)?;

    // Still configurable, so the value can be replaced by redefinition.
    o.define_property("x", PropertyDescriptor::with_value(Value::number(2)))?;
    ctx.show("o.x", &o.get("x")?)?;

    let zero = Function::new("get x", 0, |_, _| Ok(Value::number(0)));
    o.define_property("x", PropertyDescriptor::with_getter(zero))?;
    ctx.show("o.x", &o.get("x")?)?;
    show_descriptor(ctx, "o.x", &o, "x");
    Ok(())
}

fn define_properties(ctx: &DemoContext) -> EvalResult<()> {
    let radius = Function::new("get r", 0, |this, _| {
        let x = this.get("x")?.to_number();
        let y = this.get("y")?.to_number();
        Ok(Value::number(x.hypot(y)))
    });
    let p = Record::new();
    p.define_properties([
        (
            "x",
            PropertyDescriptor::data(Value::number(1), true, false, true),
        ),
        (
            "y",
            PropertyDescriptor::data(Value::number(1), true, false, true),
        ),
        ("r", PropertyDescriptor::accessor(Some(radius), None, false, true)),
    ])?;
    ctx.show("p.r", &p.get("r")?)?;
    show_keys(ctx, "p", &p)
}

fn copy_attributes(ctx: &DemoContext) -> EvalResult<()> {
    let source = Record::from_entries([("visible", 1)]);
    source.define_property(
        "hidden",
        PropertyDescriptor::data(Value::number(2), false, false, false),
    )?;
    let target = Record::from_entries([("visible", 0)]);
    extend_with_descriptors(&target, &source)?;
    ctx.show("target.visible", &target.get("visible")?)?;
    show_descriptor(ctx, "target.hidden", &target, "hidden");
    Ok(())
}

fn locking(ctx: &DemoContext) -> EvalResult<()> {
    let o = Record::from_entries([("x", 1)]);
    o.prevent_extensions();
    if let Err(err) = o.set("y", 2) {
        ctx.println(&format!("o.y = 2 rejected: {err}"));
    }

    o.seal();
    ctx.println(&format!("sealed: {}", o.is_sealed()));
    if let Err(err) = o.delete("x") {
        ctx.println(&format!("delete o.x rejected: {err}"));
    }
    o.set("x", 3)?;
    ctx.show("o.x", &o.get("x")?)?;

    o.freeze();
    ctx.println(&format!("frozen: {}", o.is_frozen()));
    if let Err(err) = o.set("x", 4) {
        ctx.println(&format!("o.x = 4 rejected: {err}"));
    }
    Ok(())
}

fn prototype_of(ctx: &DemoContext) -> EvalResult<()> {
    let p = Record::from_entries([("x", 1)]);
    let o = inherit(&Value::Record(p.clone()))?;
    ctx.println(&format!("p.is_prototype_of(o) = {}", p.is_prototype_of(&o)));
    ctx.println(&format!("o.is_prototype_of(p) = {}", o.is_prototype_of(&p)));
    ctx.show("o.x", &o.get("x")?)?;
    if let Err(err) = p.set_parent(Some(o)) {
        ctx.println(&format!("p inheriting from o rejected: {err}"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
