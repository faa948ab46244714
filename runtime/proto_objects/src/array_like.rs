//! Generic array algorithms over array-like values.
//!
//! An array-like is anything with a length and indexed elements: a list, a
//! record carrying a numeric `length` and keys `"0"`, `"1"`, ..., or the
//! characters of a string. The algorithms mirror the array methods that
//! can be borrowed onto such values: callbacks receive
//! `(element, index, array)` and run with an `undefined` receiver.
//!
//! Records may have holes (indexes below `length` with no key). `for_each`,
//! `map`, `filter`, and `reduce` skip holes; `get`, `join`, and `slice` read
//! them as `undefined`. Iteration over a record visits only the indexes it
//! (or its parents) actually holds, so a huge sparse `length` is cheap to
//! walk. Copying a record's elements out is limited to
//! [`MAX_MATERIALIZED_LENGTH`] elements.

use std::rc::Rc;

use proto_value::{
    count_to_f64, invalid_argument, join_values, type_mismatch, EvalError, EvalResult, Function,
    Record, Value,
};

use crate::MAX_ARRAY_LENGTH;

/// Most elements `to_vec`, `join`, `slice`, and `map` will copy out of a
/// record-backed array-like.
pub const MAX_MATERIALIZED_LENGTH: usize = 1 << 24;

enum Elements {
    List(Rc<[Value]>),
    Record(Record),
    Chars(Vec<char>),
}

/// A borrowed view of an array-like value.
pub struct ArrayLike {
    source: Value,
    elements: Elements,
}

impl ArrayLike {
    /// View `value` as an array-like.
    ///
    /// Fails with `TypeMismatch` for values that have no elements
    /// (numbers, booleans, `null`, `undefined`, functions).
    pub fn new(value: &Value) -> EvalResult<Self> {
        let elements = match value {
            Value::List(items) => Elements::List(items.clone()),
            Value::Record(record) => Elements::Record(record.clone()),
            Value::Str(s) => Elements::Chars(s.chars().collect()),
            other => return Err(type_mismatch("array-like", other.type_name())),
        };
        Ok(ArrayLike {
            source: value.clone(),
            elements,
        })
    }

    /// The viewed value, passed to callbacks as their third argument.
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// Element count. A record's `length` is clamped to `[0, 2^32 - 1]`
    /// and truncated; a non-numeric length counts as zero.
    pub fn len(&self) -> EvalResult<usize> {
        match &self.elements {
            Elements::List(items) => Ok(items.len()),
            Elements::Chars(chars) => Ok(chars.len()),
            Elements::Record(record) => Ok(to_length(record.get("length")?.to_number())),
        }
    }

    pub fn is_empty(&self) -> EvalResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Element at `index`; out-of-range indexes and holes read as `undefined`.
    pub fn get(&self, index: usize) -> EvalResult {
        match &self.elements {
            Elements::List(items) => Ok(items.get(index).cloned().unwrap_or_default()),
            Elements::Chars(chars) => Ok(chars
                .get(index)
                .map_or(Value::Undefined, |c| Value::string(c.to_string()))),
            Elements::Record(record) => record.get(&index.to_string()),
        }
    }

    /// Whether `index` holds an element (false for record holes).
    fn has_index(&self, index: usize) -> bool {
        match &self.elements {
            Elements::Record(record) => record.has(&index.to_string()),
            Elements::List(_) | Elements::Chars(_) => true,
        }
    }

    /// Indexes below `len` that hold an element, ascending.
    ///
    /// For records this is gathered from the keys along the delegation
    /// chain rather than by probing every index.
    fn present_indexes(&self, len: usize) -> Vec<usize> {
        let Elements::Record(record) = &self.elements else {
            return (0..len).collect();
        };
        let mut indexes = Vec::new();
        let mut current = Some(record.clone());
        while let Some(holder) = current {
            indexes.extend(
                holder
                    .own_keys()
                    .iter()
                    .filter_map(|key| parse_index(key))
                    .filter(|&index| index < len),
            );
            current = holder.parent();
        }
        indexes.sort_unstable();
        indexes.dedup();
        indexes
    }

    /// Fail before copying `count` elements out of a record.
    fn check_materialize(&self, count: usize) -> EvalResult<()> {
        if matches!(self.elements, Elements::Record(_)) && count > MAX_MATERIALIZED_LENGTH {
            return Err(too_long(count));
        }
        Ok(())
    }

    /// Copy the elements into a vector, holes as `undefined`.
    ///
    /// Fails with `InvalidArgument` for a record whose `length` exceeds
    /// [`MAX_MATERIALIZED_LENGTH`].
    pub fn to_vec(&self) -> EvalResult<Vec<Value>> {
        let len = self.len()?;
        self.check_materialize(len)?;
        (0..len).map(|i| self.get(i)).collect()
    }

    /// Join elements with `separator`; `undefined` and `null` render empty.
    pub fn join(&self, separator: &str) -> EvalResult<String> {
        join_values(&self.to_vec()?, separator)
    }

    /// Elements from `start` up to (not including) `end`.
    ///
    /// Negative positions count back from the end; `None` means the end.
    pub fn slice(&self, start: i64, end: Option<i64>) -> EvalResult<Vec<Value>> {
        let len = self.len()?;
        let from = relative_index(start, len);
        let to = end.map_or(len, |e| relative_index(e, len)).max(from);
        self.check_materialize(to - from)?;
        (from..to).map(|i| self.get(i)).collect()
    }

    /// Call `f(element, index, array)` for each present element.
    pub fn for_each(&self, f: &Function) -> EvalResult<()> {
        let len = self.len()?;
        for index in self.present_indexes(len) {
            if self.has_index(index) {
                self.call_back(f, index)?;
            }
        }
        Ok(())
    }

    /// Results of `f(element, index, array)`; holes stay `undefined`.
    ///
    /// The result has one slot per index, so a record whose `length`
    /// exceeds [`MAX_MATERIALIZED_LENGTH`] fails with `InvalidArgument`
    /// before any callback runs.
    pub fn map(&self, f: &Function) -> EvalResult<Vec<Value>> {
        let len = self.len()?;
        self.check_materialize(len)?;
        let mut out = vec![Value::Undefined; len];
        for index in self.present_indexes(len) {
            if self.has_index(index) {
                out[index] = self.call_back(f, index)?;
            }
        }
        Ok(out)
    }

    /// Elements for which `f(element, index, array)` is truthy.
    pub fn filter(&self, f: &Function) -> EvalResult<Vec<Value>> {
        let len = self.len()?;
        let mut out = Vec::new();
        for index in self.present_indexes(len) {
            if !self.has_index(index) {
                continue;
            }
            let element = self.get(index)?;
            let keep = f.invoke(&[
                element.clone(),
                Value::number(count_to_f64(index)),
                self.source.clone(),
            ])?;
            if keep.is_truthy() {
                out.push(element);
            }
        }
        Ok(out)
    }

    /// Fold with `f(accumulated, element, index, array)`.
    ///
    /// Without `initial` the first present element seeds the fold, and an
    /// empty array-like is an error.
    pub fn reduce(&self, f: &Function, initial: Option<Value>) -> EvalResult {
        let len = self.len()?;
        let mut indexes = self
            .present_indexes(len)
            .into_iter()
            .filter(|&i| self.has_index(i));
        let mut accumulated = match initial {
            Some(value) => value,
            None => match indexes.next() {
                Some(first) => self.get(first)?,
                None => {
                    return Err(type_mismatch(
                        "reduce of empty array with no initial value",
                        "empty array-like",
                    ))
                }
            },
        };
        for index in indexes {
            accumulated = f.invoke(&[
                accumulated,
                self.get(index)?,
                Value::number(count_to_f64(index)),
                self.source.clone(),
            ])?;
        }
        Ok(accumulated)
    }

    fn call_back(&self, f: &Function, index: usize) -> EvalResult {
        f.invoke(&[
            self.get(index)?,
            Value::number(count_to_f64(index)),
            self.source.clone(),
        ])
    }
}

/// A key that names an array index: canonical decimal, no sign or leading
/// zeros.
fn parse_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    (index.to_string() == key).then_some(index)
}

#[cold]
fn too_long(count: usize) -> EvalError {
    invalid_argument(format!(
        "cannot copy {count} elements out of an array-like (limit {MAX_MATERIALIZED_LENGTH})"
    ))
}

/// `ToLength`-style clamp of a numeric `length`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is truncated and clamped to [0, 2^32 - 1] before the cast"
)]
fn to_length(n: f64) -> usize {
    if n.is_nan() || n <= 0.0 {
        return 0;
    }
    n.trunc().min(MAX_ARRAY_LENGTH - 1.0) as usize
}

/// Resolve a possibly negative position against `len`, clamped to `[0, len]`.
fn relative_index(position: i64, len: usize) -> usize {
    if position < 0 {
        len.saturating_sub(usize::try_from(position.unsigned_abs()).unwrap_or(usize::MAX))
    } else {
        usize::try_from(position).map_or(len, |p| p.min(len))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
