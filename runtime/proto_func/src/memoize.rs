//! Result caching keyed by the text of the arguments.
//!
//! The cache key is the argument count followed by the comma-joined string
//! forms of the arguments, so `f(1, 2)` and `f("1", "2")` share an entry,
//! and so do any two records without a custom `toString`. Callers that
//! need structural keys should memoize over primitives only.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use proto_value::{join_values, EvalResult, Function, Value};

/// The cache key for a call with `args`.
///
/// Rendering an argument may run a record's `toString`.
pub fn memo_key(args: &[Value]) -> EvalResult<String> {
    Ok(format!("{}{}", args.len(), join_values(args, ",")?))
}

/// Map from rendered argument lists to results, optionally FIFO-bounded.
struct MemoCache {
    entries: FxHashMap<String, Value>,
    insertion_order: VecDeque<String>,
    capacity: Option<usize>,
}

impl MemoCache {
    fn new(capacity: Option<usize>) -> Self {
        MemoCache {
            entries: FxHashMap::default(),
            insertion_order: VecDeque::new(),
            capacity,
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: String, value: Value) {
        let Some(capacity) = self.capacity else {
            self.entries.insert(key, value);
            return;
        };
        if capacity == 0 {
            return;
        }
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return;
        }
        while self.entries.len() >= capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                self.entries.remove(&oldest);
            } else {
                self.entries.clear();
                break;
            }
        }
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, value);
    }
}

/// Cache `f`'s results by argument text.
///
/// The cache is never evicted: it lives as long as the returned function,
/// and a key seen once never reaches `f` again. Failed calls are not
/// cached. No cache borrow is held while `f` runs, so `f` may call the
/// memoized function recursively.
pub fn memoize(f: &Function) -> Function {
    memoize_with(f, None)
}

/// Like [`memoize`], but keep at most `capacity` entries, evicting the
/// oldest first. A capacity of zero disables caching.
pub fn memoize_bounded(f: &Function, capacity: usize) -> Function {
    memoize_with(f, Some(capacity))
}

fn memoize_with(f: &Function, capacity: Option<usize>) -> Function {
    let f = f.clone();
    let name: Rc<str> = f.name().into();
    let cache = RefCell::new(MemoCache::new(capacity));
    Function::new(name, f.arity(), move |this, args| {
        let key = memo_key(args)?;
        let cached = cache.borrow().get(&key);
        if let Some(hit) = cached {
            tracing::trace!(function = f.name(), key = %key, "memo hit");
            return Ok(hit);
        }
        tracing::trace!(function = f.name(), key = %key, "memo miss");
        let result = f.call(this, args)?;
        cache.borrow_mut().insert(key, result.clone());
        Ok(result)
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
