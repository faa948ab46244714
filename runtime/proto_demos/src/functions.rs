//! Functions as values: immediate invocation, higher-order calls, and an
//! operator table dispatched by name.

use proto_value::{unknown_operator, EvalResult, Function, Record, Value};

use crate::{arg, Chapter, Demo, DemoContext};

pub const CHAPTER: Chapter = Chapter {
    name: "functions",
    title: "Functions as values",
    demos: &[
        Demo {
            name: "immediate",
            run: immediate,
        },
        Demo {
            name: "operate",
            run: operate_demo,
        },
        Demo {
            name: "operators",
            run: operators_demo,
        },
    ],
};

/// `a + b` with string concatenation when either side is a string.
pub fn add_values(a: &Value, b: &Value) -> EvalResult {
    if matches!(a, Value::Str(_)) || matches!(b, Value::Str(_)) {
        Ok(Value::string(format!("{}{}", a.to_js_string()?, b.to_js_string()?)))
    } else {
        Ok(Value::number(a.to_number() + b.to_number()))
    }
}

fn binary(name: &str, op: fn(f64, f64) -> f64) -> Function {
    Function::new(name, 2, move |_, args| {
        Ok(Value::number(op(arg(args, 0).to_number(), arg(args, 1).to_number())))
    })
}

pub fn add() -> Function {
    Function::new("add", 2, |_, args| add_values(&arg(args, 0), &arg(args, 1)))
}

pub fn subtract() -> Function {
    binary("subtract", |x, y| x - y)
}

pub fn multiply() -> Function {
    binary("multiply", |x, y| x * y)
}

pub fn divide() -> Function {
    binary("divide", |x, y| x / y)
}

/// Invoke `operator` on two operands.
pub fn operate(operator: &Function, a: Value, b: Value) -> EvalResult {
    operator.invoke(&[a, b])
}

/// The arithmetic operators by name: `add`, `subtract`, `multiply`,
/// `divide`, and `pow`.
pub fn operators() -> EvalResult<Record> {
    let table = Record::new();
    table.set("add", add())?;
    table.set("subtract", subtract())?;
    table.set("multiply", multiply())?;
    table.set("divide", divide())?;
    table.set("pow", binary("pow", f64::powf))?;
    Ok(table)
}

/// Look `name` up in `table` and invoke it on two operands.
///
/// Fails with `UnknownOperator` when the name does not resolve to a
/// function.
pub fn operate_by_name(table: &Record, name: &str, a: Value, b: Value) -> EvalResult {
    match table.get(name)? {
        Value::Function(operator) => operator.invoke(&[a, b]),
        _ => Err(unknown_operator(name)),
    }
}

fn immediate(ctx: &DemoContext) -> EvalResult<()> {
    let tensquared = Function::lambda(1, |args| {
        let x = arg(args, 0).to_number();
        Ok(Value::number(x * x))
    })
    .invoke(&[Value::number(10)])?;
    ctx.show("tensquared", &tensquared)
}

fn operate_demo(ctx: &DemoContext) -> EvalResult<()> {
    // (2 + 3) + (4 * 5)
    let i = operate(
        &add(),
        operate(&add(), Value::number(2), Value::number(3))?,
        operate(&multiply(), Value::number(4), Value::number(5))?,
    )?;
    ctx.show("i", &i)
}

fn operators_demo(ctx: &DemoContext) -> EvalResult<()> {
    let table = operators()?;
    let j = operate_by_name(
        &table,
        "add",
        Value::string("hello"),
        operate_by_name(&table, "add", Value::string(" "), Value::string("world"))?,
    )?;
    ctx.show("j", &j)?;
    let k = operate_by_name(&table, "pow", Value::number(10), Value::number(2))?;
    ctx.show("k", &k)?;
    if let Err(err) = operate_by_name(&table, "modulo", Value::number(10), Value::number(3)) {
        ctx.println(&format!("modulo rejected: {err}"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
