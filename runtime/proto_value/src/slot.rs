//! Property slots and descriptors.
//!
//! A slot is what a record stores under a key: either a plain data value or
//! a getter/setter pair, each with its own attribute flags.
//! `PropertyDescriptor` is the partial, all-optional form used to define
//! slots and to report them back.

use bitflags::bitflags;

use crate::errors::{invalid_argument, EvalResult};
use crate::{Function, Value};

bitflags! {
    /// Per-key property attributes.
    ///
    /// `WRITABLE` is meaningful only for data slots; accessor slots never
    /// carry it.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct PropertyFlags: u8 {
        /// Value may be changed by assignment.
        const WRITABLE = 1 << 0;
        /// Key shows up in enumeration.
        const ENUMERABLE = 1 << 1;
        /// Slot may be deleted, redefined, or change kind.
        const CONFIGURABLE = 1 << 2;
    }
}

impl PropertyFlags {
    /// Attributes of a property created by plain assignment.
    pub const DEFAULT: Self = Self::all();

    /// Attributes that survive a data/accessor kind change.
    pub const SHARED: Self = Self::ENUMERABLE.union(Self::CONFIGURABLE);
}

/// What a record stores under a key.
#[derive(Clone, Debug)]
pub enum Slot {
    /// A stored value.
    Data { value: Value, flags: PropertyFlags },
    /// A computed property with independent read and write behavior.
    Accessor {
        get: Option<Function>,
        set: Option<Function>,
        flags: PropertyFlags,
    },
}

impl Slot {
    /// A writable, enumerable, configurable data slot.
    pub fn data(value: Value) -> Self {
        Slot::Data {
            value,
            flags: PropertyFlags::DEFAULT,
        }
    }

    /// An enumerable, configurable accessor slot.
    pub fn accessor(get: Option<Function>, set: Option<Function>) -> Self {
        Slot::Accessor {
            get,
            set,
            flags: PropertyFlags::SHARED,
        }
    }

    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        match self {
            Slot::Data { flags, .. } | Slot::Accessor { flags, .. } => *flags,
        }
    }

    #[inline]
    pub fn is_enumerable(&self) -> bool {
        self.flags().contains(PropertyFlags::ENUMERABLE)
    }

    #[inline]
    pub fn is_configurable(&self) -> bool {
        self.flags().contains(PropertyFlags::CONFIGURABLE)
    }

    #[inline]
    pub fn is_accessor(&self) -> bool {
        matches!(self, Slot::Accessor { .. })
    }

    /// Full descriptor for this slot, every field populated for its kind.
    pub fn to_descriptor(&self) -> PropertyDescriptor {
        match self {
            Slot::Data { value, flags } => PropertyDescriptor {
                value: Some(value.clone()),
                writable: Some(flags.contains(PropertyFlags::WRITABLE)),
                get: None,
                set: None,
                enumerable: Some(flags.contains(PropertyFlags::ENUMERABLE)),
                configurable: Some(flags.contains(PropertyFlags::CONFIGURABLE)),
            },
            Slot::Accessor { get, set, flags } => PropertyDescriptor {
                value: None,
                writable: None,
                get: Some(get.clone()),
                set: Some(set.clone()),
                enumerable: Some(flags.contains(PropertyFlags::ENUMERABLE)),
                configurable: Some(flags.contains(PropertyFlags::CONFIGURABLE)),
            },
        }
    }

    pub(crate) fn set_flag(&mut self, flag: PropertyFlags, on: bool) {
        match self {
            Slot::Data { flags, .. } | Slot::Accessor { flags, .. } => flags.set(flag, on),
        }
    }
}

/// Partial property description.
///
/// `get`/`set` are doubly optional: the outer `Option` says whether the field
/// is present, the inner one whether an accessor function is supplied.
/// `Some(None)` therefore means "explicitly no getter".
#[derive(Clone, Debug, Default)]
pub struct PropertyDescriptor {
    pub value: Option<Value>,
    pub writable: Option<bool>,
    pub get: Option<Option<Function>>,
    pub set: Option<Option<Function>>,
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    /// A fully specified data descriptor.
    pub fn data(value: Value, writable: bool, enumerable: bool, configurable: bool) -> Self {
        PropertyDescriptor {
            value: Some(value),
            writable: Some(writable),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
            ..Self::default()
        }
    }

    /// A fully specified accessor descriptor.
    pub fn accessor(
        get: Option<Function>,
        set: Option<Function>,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        PropertyDescriptor {
            get: Some(get),
            set: Some(set),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
            ..Self::default()
        }
    }

    /// Only a value, every attribute left unspecified.
    #[must_use]
    pub fn with_value(value: Value) -> Self {
        PropertyDescriptor {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Only a getter, every attribute left unspecified.
    #[must_use]
    pub fn with_getter(get: Function) -> Self {
        PropertyDescriptor {
            get: Some(Some(get)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = Some(writable);
        self
    }

    #[must_use]
    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = Some(enumerable);
        self
    }

    #[must_use]
    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = Some(configurable);
        self
    }

    pub fn is_data(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    pub fn is_accessor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    /// Neither data nor accessor: only attribute changes.
    pub fn is_generic(&self) -> bool {
        !self.is_data() && !self.is_accessor()
    }

    /// Reject descriptors that mix data and accessor fields.
    pub fn validate(&self) -> EvalResult<()> {
        if self.is_data() && self.is_accessor() {
            return Err(invalid_argument(
                "property descriptor cannot both specify accessors and a value or writable attribute",
            ));
        }
        Ok(())
    }

    /// Build a brand new slot, filling absent fields with `false`/`undefined`.
    pub(crate) fn into_new_slot(self) -> Slot {
        let mut flags = PropertyFlags::empty();
        flags.set(PropertyFlags::ENUMERABLE, self.enumerable.unwrap_or(false));
        flags.set(
            PropertyFlags::CONFIGURABLE,
            self.configurable.unwrap_or(false),
        );
        if self.is_accessor() {
            Slot::Accessor {
                get: self.get.flatten(),
                set: self.set.flatten(),
                flags,
            }
        } else {
            flags.set(PropertyFlags::WRITABLE, self.writable.unwrap_or(false));
            Slot::Data {
                value: self.value.unwrap_or(Value::Undefined),
                flags,
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
