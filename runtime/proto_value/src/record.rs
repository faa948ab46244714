//! Records: ordered key/slot maps with an optional delegation link.
//!
//! Lookups check the record's own slots before following the parent chain.
//! Getters and setters always run with the record the access started on as
//! their receiver, so an heir can reuse its parent's accessors against its
//! own data.
//!
//! No `RefCell` borrow is held while user code (getters, setters, methods)
//! runs, so that code may freely read and write the same records.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::errors::{
    cyclic_delegation, no_setter, not_callable, not_configurable, not_extensible, read_only,
    EvalResult,
};
use crate::{Function, PropertyDescriptor, PropertyFlags, Slot, Value};

struct RecordData {
    slots: IndexMap<Rc<str>, Slot>,
    parent: Option<Record>,
    extensible: bool,
}

/// A shared handle to a record.
///
/// Cloning the handle shares the record; use the combination utilities to
/// copy keys into a new one.
#[derive(Clone)]
pub struct Record(Rc<RefCell<RecordData>>);

impl Record {
    /// Create an empty record with no parent.
    pub fn new() -> Self {
        Record(Rc::new(RefCell::new(RecordData {
            slots: IndexMap::new(),
            parent: None,
            extensible: true,
        })))
    }

    /// Create an empty record whose fallback lookups go to `parent`.
    pub fn with_parent(parent: Record) -> Self {
        let record = Record::new();
        record.0.borrow_mut().parent = Some(parent);
        record
    }

    /// Create a record from `(key, value)` pairs, in order.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Rc<str>>,
        V: Into<Value>,
    {
        let record = Record::new();
        {
            let mut data = record.0.borrow_mut();
            for (key, value) in entries {
                data.slots.insert(key.into(), Slot::data(value.into()));
            }
        }
        record
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Record) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of own keys.
    pub fn len(&self) -> usize {
        self.0.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().slots.is_empty()
    }

    // Delegation

    pub fn parent(&self) -> Option<Record> {
        self.0.borrow().parent.clone()
    }

    /// Replace the delegation link.
    ///
    /// Fails with `CyclicDelegation` if `parent` is this record or already
    /// delegates to it.
    pub fn set_parent(&self, parent: Option<Record>) -> EvalResult<()> {
        if let Some(candidate) = &parent {
            if candidate.ptr_eq(self) || self.is_prototype_of(candidate) {
                return Err(cyclic_delegation());
            }
        }
        tracing::debug!(has_parent = parent.is_some(), "set delegation link");
        self.0.borrow_mut().parent = parent;
        Ok(())
    }

    /// Whether this record appears anywhere on `other`'s delegation chain.
    pub fn is_prototype_of(&self, other: &Record) -> bool {
        let mut current = other.parent();
        while let Some(record) = current {
            if record.ptr_eq(self) {
                return true;
            }
            current = record.parent();
        }
        false
    }

    /// Find the slot for `key`, own first, then along the chain.
    fn lookup(&self, key: &str) -> Option<Slot> {
        let mut current = self.clone();
        loop {
            let next = {
                let data = current.0.borrow();
                if let Some(slot) = data.slots.get(key) {
                    return Some(slot.clone());
                }
                data.parent.clone()
            };
            tracing::trace!(key, "delegating lookup to parent");
            current = next?;
        }
    }

    // Reading

    /// Read `key`, following delegation. Missing keys read as `undefined`.
    pub fn get(&self, key: &str) -> EvalResult {
        self.get_with_receiver(key, &Value::Record(self.clone()))
    }

    /// Read `key`, running any getter with `receiver` as `this`.
    pub fn get_with_receiver(&self, key: &str, receiver: &Value) -> EvalResult {
        match self.lookup(key) {
            Some(Slot::Data { value, .. }) => Ok(value),
            Some(Slot::Accessor { get: Some(getter), .. }) => getter.call(receiver, &[]),
            Some(Slot::Accessor { get: None, .. }) | None => Ok(Value::Undefined),
        }
    }

    /// Whether `key` is reachable, own or inherited.
    pub fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().slots.contains_key(key)
    }

    /// All own keys in insertion order, enumerable or not.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.borrow().slots.keys().map(|k| k.to_string()).collect()
    }

    /// Own enumerable keys in insertion order.
    pub fn own_enumerable_keys(&self) -> Vec<String> {
        self.0
            .borrow()
            .slots
            .iter()
            .filter(|(_, slot)| slot.is_enumerable())
            .map(|(k, _)| k.to_string())
            .collect()
    }

    /// Enumerable keys along the whole chain, own keys first.
    ///
    /// A name shadowed by a nearer record is listed once, and only if the
    /// nearest slot is enumerable.
    pub fn enumerable_keys(&self) -> Vec<String> {
        let mut seen: Vec<Rc<str>> = Vec::new();
        let mut keys = Vec::new();
        let mut current = Some(self.clone());
        while let Some(record) = current {
            let data = record.0.borrow();
            for (key, slot) in &data.slots {
                if seen.iter().any(|s| s == key) {
                    continue;
                }
                seen.push(key.clone());
                if slot.is_enumerable() {
                    keys.push(key.to_string());
                }
            }
            current = data.parent.clone();
        }
        keys
    }

    /// Descriptor of an own property; `None` for inherited or missing keys.
    pub fn get_own_property(&self, key: &str) -> Option<PropertyDescriptor> {
        self.0.borrow().slots.get(key).map(Slot::to_descriptor)
    }

    // Writing

    /// Assign `value` to `key` with strict-mode semantics.
    ///
    /// - own writable data: overwritten in place
    /// - non-writable data anywhere on the chain: `ReadOnly`
    /// - accessor anywhere on the chain: its setter runs with this record as
    ///   receiver, or `NoSetter`
    /// - otherwise: a new own data property (`NotExtensible` if locked)
    pub fn set(&self, key: &str, value: impl Into<Value>) -> EvalResult<()> {
        let value = value.into();
        {
            let mut data = self.0.borrow_mut();
            if let Some(Slot::Data { value: current, flags }) = data.slots.get_mut(key) {
                if !flags.contains(PropertyFlags::WRITABLE) {
                    return Err(read_only(key));
                }
                *current = value;
                return Ok(());
            }
        }

        match self.lookup(key) {
            Some(Slot::Data { flags, .. }) if !flags.contains(PropertyFlags::WRITABLE) => {
                Err(read_only(key))
            }
            Some(Slot::Accessor { set: Some(setter), .. }) => {
                setter.call(&Value::Record(self.clone()), &[value])?;
                Ok(())
            }
            Some(Slot::Accessor { set: None, .. }) => Err(no_setter(key)),
            Some(Slot::Data { .. }) | None => {
                let mut data = self.0.borrow_mut();
                if !data.extensible {
                    return Err(not_extensible(key));
                }
                data.slots.insert(key.into(), Slot::data(value));
                Ok(())
            }
        }
    }

    /// Remove an own property.
    ///
    /// Returns `Ok(false)` if there was nothing to remove.
    pub fn delete(&self, key: &str) -> EvalResult<bool> {
        let mut data = self.0.borrow_mut();
        let configurable = match data.slots.get(key) {
            None => return Ok(false),
            Some(slot) => slot.is_configurable(),
        };
        if !configurable {
            return Err(not_configurable(key));
        }
        data.slots.shift_remove(key);
        Ok(true)
    }

    /// Define or redefine an own property from a (partial) descriptor.
    ///
    /// Absent attributes of a new property default to `false`/`undefined`.
    /// Existing configurable properties may change freely, including
    /// switching between data and accessor form. Non-configurable ones only
    /// accept changes that keep them at least as locked as before.
    pub fn define_property(&self, key: &str, desc: PropertyDescriptor) -> EvalResult<()> {
        desc.validate()?;
        tracing::debug!(key, accessor = desc.is_accessor(), "define property");
        let mut data = self.0.borrow_mut();
        if !data.slots.contains_key(key) {
            if !data.extensible {
                return Err(not_extensible(key));
            }
            data.slots.insert(key.into(), desc.into_new_slot());
            return Ok(());
        }
        match data.slots.get_mut(key) {
            Some(current) => apply_descriptor(key, current, desc),
            None => Ok(()),
        }
    }

    /// Define several properties in order, stopping at the first failure.
    pub fn define_properties<'k>(
        &self,
        descriptors: impl IntoIterator<Item = (&'k str, PropertyDescriptor)>,
    ) -> EvalResult<()> {
        for (key, desc) in descriptors {
            self.define_property(key, desc)?;
        }
        Ok(())
    }

    /// Define an enumerable, configurable accessor, the way an accessor in a
    /// record literal is created.
    pub fn define_accessor(
        &self,
        key: &str,
        get: Option<Function>,
        set: Option<Function>,
    ) -> EvalResult<()> {
        self.define_property(key, PropertyDescriptor::accessor(get, set, true, true))
    }

    /// Look up `name` and call it with this record as receiver.
    pub fn call_method(&self, name: &str, args: &[Value]) -> EvalResult {
        match self.get(name)? {
            Value::Function(method) => method.call(&Value::Record(self.clone()), args),
            other => Err(not_callable(format!("{name} ({})", other.type_name()))),
        }
    }

    // Locking

    pub fn is_extensible(&self) -> bool {
        self.0.borrow().extensible
    }

    /// Forbid new own properties.
    pub fn prevent_extensions(&self) {
        self.0.borrow_mut().extensible = false;
    }

    /// Forbid new properties and make every own property non-configurable.
    pub fn seal(&self) {
        let mut data = self.0.borrow_mut();
        data.extensible = false;
        for slot in data.slots.values_mut() {
            slot.set_flag(PropertyFlags::CONFIGURABLE, false);
        }
    }

    /// Seal, and additionally make every own data property read-only.
    pub fn freeze(&self) {
        let mut data = self.0.borrow_mut();
        data.extensible = false;
        for slot in data.slots.values_mut() {
            slot.set_flag(PropertyFlags::CONFIGURABLE, false);
            if !slot.is_accessor() {
                slot.set_flag(PropertyFlags::WRITABLE, false);
            }
        }
    }

    pub fn is_sealed(&self) -> bool {
        let data = self.0.borrow();
        !data.extensible && data.slots.values().all(|slot| !slot.is_configurable())
    }

    pub fn is_frozen(&self) -> bool {
        let data = self.0.borrow();
        !data.extensible
            && data.slots.values().all(|slot| {
                !slot.is_configurable() && !slot.flags().contains(PropertyFlags::WRITABLE)
            })
    }
}

/// Validate `desc` against the existing slot and merge it in.
fn apply_descriptor(key: &str, current: &mut Slot, desc: PropertyDescriptor) -> EvalResult<()> {
    let changes_kind = !desc.is_generic() && desc.is_accessor() != current.is_accessor();

    if !current.is_configurable() {
        if desc.configurable == Some(true) {
            return Err(not_configurable(key));
        }
        if desc
            .enumerable
            .is_some_and(|enumerable| enumerable != current.is_enumerable())
        {
            return Err(not_configurable(key));
        }
        if changes_kind {
            return Err(not_configurable(key));
        }
        match &*current {
            Slot::Data { value, flags } if !flags.contains(PropertyFlags::WRITABLE) => {
                if desc.writable == Some(true) {
                    return Err(not_configurable(key));
                }
                if desc.value.as_ref().is_some_and(|v| !v.same_value(value)) {
                    return Err(read_only(key));
                }
            }
            Slot::Accessor { get, set, .. } => {
                if desc.get.as_ref().is_some_and(|g| !same_function(g, get))
                    || desc.set.as_ref().is_some_and(|s| !same_function(s, set))
                {
                    return Err(not_configurable(key));
                }
            }
            Slot::Data { .. } => {}
        }
    }

    if changes_kind {
        let shared = current.flags() & PropertyFlags::SHARED;
        *current = if desc.is_accessor() {
            Slot::Accessor {
                get: None,
                set: None,
                flags: shared,
            }
        } else {
            Slot::Data {
                value: Value::Undefined,
                flags: shared,
            }
        };
    }

    match current {
        Slot::Data { value, flags } => {
            if let Some(new_value) = desc.value {
                *value = new_value;
            }
            if let Some(writable) = desc.writable {
                flags.set(PropertyFlags::WRITABLE, writable);
            }
        }
        Slot::Accessor { get, set, .. } => {
            if let Some(new_get) = desc.get {
                *get = new_get;
            }
            if let Some(new_set) = desc.set {
                *set = new_set;
            }
        }
    }
    if let Some(enumerable) = desc.enumerable {
        current.set_flag(PropertyFlags::ENUMERABLE, enumerable);
    }
    if let Some(configurable) = desc.configurable {
        current.set_flag(PropertyFlags::CONFIGURABLE, configurable);
    }
    Ok(())
}

fn same_function(a: &Option<Function>, b: &Option<Function>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.ptr_eq(b),
        _ => false,
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(data) => f
                .debug_struct("Record")
                .field("keys", &data.slots.keys().collect::<Vec<_>>())
                .field("has_parent", &data.parent.is_some())
                .finish_non_exhaustive(),
            Err(_) => f.write_str("Record { <borrowed> }"),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
