//! Entry/exit tracing around a record's method.

use proto_value::{not_callable, EvalResult, Function, Record, Value};

use crate::SharedPrintHandler;

/// Replace `record[method]` with a wrapper that prints `Entering: <method>`,
/// calls the original with the same receiver and arguments, prints
/// `Exiting: <method>`, and returns the original's result.
///
/// When the original fails the exit line is skipped and the error is
/// returned unchanged. The wrapper is stored as an own property even when
/// the original was inherited.
pub fn trace(record: &Record, method: &str, printer: SharedPrintHandler) -> EvalResult<()> {
    let original = match record.get(method)? {
        Value::Function(f) => f,
        other => return Err(not_callable(other.type_name())),
    };
    let name = method.to_owned();
    let wrapped = Function::new(method, original.arity(), move |this, args| {
        printer.println(&format!("Entering: {name}"));
        let result = original.call(this, args)?;
        printer.println(&format!("Exiting: {name}"));
        Ok(result)
    });
    tracing::debug!(method, "tracing method");
    record.set(method, wrapped)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
