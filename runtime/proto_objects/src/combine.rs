//! Delegation and record-combination utilities.
//!
//! The mutating helpers (`extend`, `merge`, `restrict`, `subtract`) change
//! the target in place and hand back the same handle so calls can be
//! chained. `union` and `intersection` always build a fresh record.
//!
//! Values are copied with plain assignment: getters on the source run, and
//! the copies land as ordinary writable/enumerable/configurable properties.
//! Use `extend_with_descriptors` to carry attributes across.

use proto_value::{invalid_argument, type_mismatch, EvalResult, Record, Value};

/// Create a new empty record that delegates to `parent`.
///
/// Fails with `InvalidArgument` unless `parent` is a record or function.
/// A function argument delegates to the function's own properties, the way
/// a factory's `methods` table is shared.
pub fn inherit(parent: &Value) -> EvalResult<Record> {
    match parent {
        Value::Undefined | Value::Null => Err(invalid_argument(
            "inherit() requires a non-null parent record",
        )),
        Value::Record(record) => Ok(Record::with_parent(record.clone())),
        Value::Function(func) => Ok(Record::with_parent(func.properties().clone())),
        other => Err(invalid_argument(format!(
            "inherit() requires a record or function parent, got {}",
            other.type_name()
        ))),
    }
}

/// Copy every enumerable own property of `source` onto `target`,
/// overwriting keys `target` already has.
pub fn extend(target: &Record, source: &Record) -> EvalResult<Record> {
    for key in source.own_enumerable_keys() {
        target.set(&key, source.get(&key)?)?;
    }
    Ok(target.clone())
}

/// Like `extend`, but keys already owned by `target` are left alone.
pub fn merge(target: &Record, source: &Record) -> EvalResult<Record> {
    for key in source.own_enumerable_keys() {
        if target.has_own(&key) {
            continue;
        }
        target.set(&key, source.get(&key)?)?;
    }
    Ok(target.clone())
}

/// Delete every own key of `target` that `allowed` does not have.
///
/// Membership in `allowed` includes its delegation chain.
pub fn restrict(target: &Record, allowed: &Record) -> EvalResult<Record> {
    for key in target.own_keys() {
        if !allowed.has(&key) {
            target.delete(&key)?;
        }
    }
    Ok(target.clone())
}

/// Delete every own key of `target` that `source` also has.
pub fn subtract(target: &Record, source: &Record) -> EvalResult<Record> {
    for key in target.own_keys() {
        if source.has(&key) {
            target.delete(&key)?;
        }
    }
    Ok(target.clone())
}

/// New record with the keys of both; `a` wins on conflict.
pub fn union(a: &Record, b: &Record) -> EvalResult<Record> {
    let out = extend(&Record::new(), b)?;
    extend(&out, a)
}

/// New record with `a`'s keys that `b` also has, values taken from `a`.
pub fn intersection(a: &Record, b: &Record) -> EvalResult<Record> {
    let out = extend(&Record::new(), a)?;
    restrict(&out, b)
}

/// Names of the enumerable own properties of a record, in order.
pub fn keys(value: &Value) -> EvalResult<Vec<String>> {
    match value {
        Value::Record(record) => Ok(record.own_enumerable_keys()),
        other => Err(type_mismatch("record", other.type_name())),
    }
}

/// Copy every own property of `source`, enumerable or not, with its full
/// descriptor. Names already reachable on `target` (own or inherited) are
/// skipped.
pub fn extend_with_descriptors(target: &Record, source: &Record) -> EvalResult<Record> {
    for key in source.own_keys() {
        if target.has(&key) {
            continue;
        }
        if let Some(desc) = source.get_own_property(&key) {
            tracing::trace!(key = %key, "copying property with attributes");
            target.define_property(&key, desc)?;
        }
    }
    Ok(target.clone())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
