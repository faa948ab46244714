//! Runtime values.
//!
//! Primitives are stored inline. Strings and lists share their storage
//! through `Rc`, records and functions are handles to shared objects.
//! Everything here is single-threaded.

use std::fmt;
use std::rc::Rc;

use crate::errors::{not_callable, EvalResult};
use crate::{Function, Record};

/// A value of the object model.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Undefined,
    /// The explicit "no object" value.
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    /// Immutable sequence of values (the array stand-in).
    List(Rc<[Value]>),
    Record(Record),
    Function(Function),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn number(n: impl Into<f64>) -> Self {
        Value::Number(n.into())
    }

    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    #[inline]
    pub fn list(items: impl Into<Rc<[Value]>>) -> Self {
        Value::List(items.into())
    }
}

// Inspection

impl Value {
    /// Name of the value's kind, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "array",
            Value::Record(_) => "record",
            Value::Function(_) => "function",
        }
    }

    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Truthiness: `undefined`, `null`, `false`, `0`, `NaN`, and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Record(_) | Value::Function(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The record that property access on this value reads from.
    ///
    /// Functions expose their own property record, so `F.prototype` and
    /// `range.methods` work the same way as record properties.
    pub fn property_holder(&self) -> Option<Record> {
        match self {
            Value::Record(r) => Some(r.clone()),
            Value::Function(f) => Some(f.properties().clone()),
            _ => None,
        }
    }

    /// Numeric conversion for arithmetic demos.
    ///
    /// Booleans become `0`/`1`, `null` becomes `0`, numeric strings parse
    /// (see `parse_number`), everything else is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Null => 0.0,
            Value::Str(s) => parse_number(s),
            Value::Undefined | Value::List(_) | Value::Record(_) | Value::Function(_) => f64::NAN,
        }
    }

    /// `SameValue`: strict equality, except `NaN` equals itself.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self == other,
        }
    }

    /// Call this value as a function with the given receiver.
    pub fn call(&self, this: &Value, args: &[Value]) -> EvalResult {
        match self {
            Value::Function(f) => f.call(this, args),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Read a property, following delegation.
    ///
    /// Primitives have no properties apart from a string's `length`.
    pub fn get(&self, key: &str) -> EvalResult {
        match self {
            Value::Record(r) => r.get(key),
            Value::Function(f) => f.properties().get_with_receiver(key, self),
            Value::Str(s) if key == "length" => Ok(Value::number(count_to_f64(s.chars().count()))),
            Value::List(items) if key == "length" => Ok(Value::number(count_to_f64(items.len()))),
            _ => Ok(Value::Undefined),
        }
    }

    /// String conversion that may invoke a record's `toString` method.
    ///
    /// Use `Display` when no user code should run.
    pub fn to_js_string(&self) -> EvalResult<String> {
        match self {
            Value::Record(r) => {
                if let Value::Function(to_string) = r.get("toString")? {
                    let rendered = to_string.call(self, &[])?;
                    return Ok(rendered.to_string());
                }
                Ok(self.to_string())
            }
            Value::List(items) => join_values(items, ","),
            _ => Ok(self.to_string()),
        }
    }
}

/// Join values the way array joins do: `undefined`/`null` become empty.
pub fn join_values(items: &[Value], separator: &str) -> EvalResult<String> {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        if !item.is_nullish() {
            out.push_str(&item.to_js_string()?);
        }
    }
    Ok(out)
}

/// Lossless for any collection that fits in memory (< 2^53 elements).
#[expect(
    clippy::cast_precision_loss,
    reason = "lengths are far below 2^53 so the conversion is exact"
)]
pub fn count_to_f64(n: usize) -> f64 {
    n as f64
}

/// Render a number the way the scripting language prints it.
///
/// Uses the shortest round-tripping digits. Magnitudes from `1e-6` up to
/// (but excluding) `1e21` print in plain decimal, everything else in
/// exponent form such as `1e+21` or `1.5e-7`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        return format!("{sign}Infinity");
    }
    if n == 0.0 {
        // Both zeros print as "0".
        return "0".to_string();
    }

    let sign = if n < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", n.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{n}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format!("{n}");
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let digit_count = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    // Position of the decimal point relative to the start of `digits`.
    let point = exponent + 1;

    let body = if digit_count <= point && point <= 21 {
        format!("{digits}{}", zeros(point - digit_count))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(usize::try_from(point).unwrap_or(0));
        format!("{whole}.{fraction}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", zeros(-point))
    } else {
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { String::new() } else { format!(".{rest}") };
        format!("{first}{rest}e{exponent_sign}{}", exponent.unsigned_abs())
    };
    format!("{sign}{body}")
}

fn zeros(count: i32) -> String {
    "0".repeat(usize::try_from(count).unwrap_or(0))
}

/// String-to-number conversion.
///
/// Accepts surrounding whitespace, decimal literals with an optional sign,
/// fraction, and exponent, signed `Infinity`, and unsigned `0x`/`0o`/`0b`
/// integers. Blank strings are `0`; anything else is `NaN`.
fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = trimmed.get(2..).unwrap_or_default();
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    let decimal = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if decimal {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    if !item.is_nullish() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Value::Record(_) => write!(f, "[object Object]"),
            Value::Function(func) => write!(f, "function {}() {{ [native code] }}", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({})", format_number(*n)),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Record(r) => write!(f, "{r:?}"),
            Value::Function(func) => write!(f, "{func:?}"),
        }
    }
}

/// Strict equality: primitives by value, objects by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
