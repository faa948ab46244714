//! Value classification.

use proto_value::{EvalResult, Value};

/// Exclusive upper bound for an array-like `length` (2^32).
pub const MAX_ARRAY_LENGTH: f64 = 4_294_967_296.0;

/// Class tag of a value: `"Null"`, `"Undefined"`, `"Boolean"`, `"Number"`,
/// `"String"`, `"Array"`, `"Function"`, or `"Object"`.
pub fn classof(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "Undefined",
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::Str(_) => "String",
        Value::List(_) => "Array",
        Value::Function(_) => "Function",
        Value::Record(_) => "Object",
    }
}

/// True for real arrays only.
pub fn is_array(value: &Value) -> bool {
    matches!(value, Value::List(_))
}

/// True for arrays and for records whose `length` is a finite,
/// non-negative integer below 2^32.
///
/// Strings and functions are excluded even though they have a length.
/// Reading `length` may run a getter, hence the `Result`.
pub fn is_array_like(value: &Value) -> EvalResult<bool> {
    match value {
        Value::List(_) => Ok(true),
        Value::Record(record) => Ok(match record.get("length")? {
            Value::Number(n) => {
                n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n < MAX_ARRAY_LENGTH
            }
            _ => false,
        }),
        _ => Ok(false),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
