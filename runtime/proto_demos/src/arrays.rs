//! Array algorithms over real arrays, array-like records, and strings.

use proto_func::SharedPrintHandler;
use proto_objects::{classof, is_array_like, ArrayLike};
use proto_value::{count_to_f64, join_values, EvalResult, Function, Record, Value};

use crate::{arg, Chapter, Demo, DemoContext};

pub const CHAPTER: Chapter = Chapter {
    name: "arrays",
    title: "Arrays and array-likes",
    demos: &[
        Demo {
            name: "for_each",
            run: for_each,
        },
        Demo {
            name: "reduce",
            run: reduce,
        },
        Demo {
            name: "array_like",
            run: array_like,
        },
        Demo {
            name: "string",
            run: string,
        },
        Demo {
            name: "statistics",
            run: statistics,
        },
    ],
};

fn numbers(values: &[f64]) -> Value {
    Value::list(values.iter().copied().map(Value::Number).collect::<Vec<_>>())
}

/// `{0: 0, 1: 1, 2: 4, ..., length: n}`
pub fn squares_record(n: usize) -> EvalResult<Record> {
    let squares = Record::new();
    for i in 0..n {
        let x = count_to_f64(i);
        squares.set(&i.to_string(), x * x)?;
    }
    squares.set("length", count_to_f64(n))?;
    Ok(squares)
}

/// Arithmetic mean and sample standard deviation of `data`.
pub fn mean_and_stddev(data: &Value) -> EvalResult<(f64, f64)> {
    let view = ArrayLike::new(data)?;
    let count = count_to_f64(view.len()?);
    let sum = Function::new("sum", 2, |_, args| {
        Ok(Value::number(arg(args, 0).to_number() + arg(args, 1).to_number()))
    });
    let mean = view.reduce(&sum, None)?.to_number() / count;
    let deviation = Function::new("deviation", 1, move |_, args| {
        Ok(Value::number(arg(args, 0).to_number() - mean))
    });
    let deviations = Value::list(view.map(&deviation)?);
    let sum_of_squares = Function::new("sum_of_squares", 2, |_, args| {
        let d = arg(args, 1).to_number();
        Ok(Value::number(arg(args, 0).to_number() + d * d))
    });
    let squared = ArrayLike::new(&deviations)?.reduce(&sum_of_squares, Some(Value::number(0)))?;
    Ok((mean, (squared.to_number() / (count - 1.0)).sqrt()))
}

fn logger(printer: SharedPrintHandler) -> Function {
    Function::new("log", 3, move |_, args| {
        printer.println(&format!(
            "value: {} index: {} array: {}",
            arg(args, 0),
            arg(args, 1),
            arg(args, 2)
        ));
        Ok(Value::Undefined)
    })
}

fn for_each(ctx: &DemoContext) -> EvalResult<()> {
    let data = numbers(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    ArrayLike::new(&data)?.for_each(&logger(ctx.printer().clone()))
}

fn reduce(ctx: &DemoContext) -> EvalResult<()> {
    let data = numbers(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let printer = ctx.printer().clone();
    let sum = Function::new("sum", 4, move |_, args| {
        let (acc, value) = (arg(args, 0), arg(args, 1));
        printer.println(&format!(
            "accumulated: {acc} value: {value} index: {} array: {}",
            arg(args, 2),
            arg(args, 3)
        ));
        Ok(Value::number(acc.to_number() + value.to_number()))
    });
    let total = ArrayLike::new(&data)?.reduce(&sum, None)?;
    ctx.show("total", &total)
}

fn array_like(ctx: &DemoContext) -> EvalResult<()> {
    let squares = Value::Record(squares_record(10)?);
    ctx.println(&format!(
        "classof = {}, array-like = {}",
        classof(&squares),
        is_array_like(&squares)?
    ));

    let view = ArrayLike::new(&squares)?;
    let mut total = 0.0;
    for i in 0..view.len()? {
        total += view.get(i)?.to_number();
    }
    ctx.show("total", &Value::number(total))?;
    ctx.println(&format!("join = {}", view.join("+")?));
    ctx.println(&format!("slice = {}", join_values(&view.slice(0, None)?, ",")?));

    let root = Function::new("root", 1, |_, args| {
        Ok(Value::number(arg(args, 0).to_number().sqrt()))
    });
    ctx.println(&format!("roots = {}", join_values(&view.map(&root)?, ",")?));
    Ok(())
}

fn string(ctx: &DemoContext) -> EvalResult<()> {
    let view = ArrayLike::new(&Value::string("JavaScript"))?;
    ctx.println(&format!("join = {}", view.join("+")?));
    let consonant = Function::new("consonant", 1, |_, args| {
        let c = arg(args, 0);
        Ok(Value::Bool(!c.as_str().is_some_and(|ch| "aeiouAEIOU".contains(ch))))
    });
    ctx.println(&format!(
        "consonants = {}",
        join_values(&view.filter(&consonant)?, "")?
    ));
    Ok(())
}

fn statistics(ctx: &DemoContext) -> EvalResult<()> {
    let data = numbers(&[1.0, 1.0, 3.0, 5.0, 5.0]);
    ctx.show("data", &data)?;
    let (mean, stddev) = mean_and_stddev(&data)?;
    ctx.show("mean", &Value::number(mean))?;
    ctx.show("stddev", &Value::number(stddev))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
