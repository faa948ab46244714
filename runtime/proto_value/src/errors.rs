//! Error types for record and function evaluation.
//!
//! Factory functions (e.g., `invalid_argument()`) are the public construction
//! API. Callers match on the variant, never on the rendered message.

use std::fmt;

/// Result of evaluation.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

/// Typed error category raised by the object model and its utilities.
///
/// Every failure is synchronous and local: the operation that detects it
/// returns the error and callers propagate it with `?`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// An argument was outside the accepted domain (e.g., a null parent).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A value of the wrong kind was supplied.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// The value is not a function.
    #[error("{type_name} is not a function")]
    NotCallable { type_name: String },

    /// Assignment to a non-writable data property.
    #[error("cannot assign to read-only property '{key}'")]
    ReadOnly { key: String },

    /// Assignment to an accessor property that has no setter.
    #[error("cannot set property '{key}' which has only a getter")]
    NoSetter { key: String },

    /// New property on a non-extensible record.
    #[error("cannot add property '{key}', record is not extensible")]
    NotExtensible { key: String },

    /// Redefinition or deletion of a non-configurable property.
    #[error("cannot redefine property '{key}'")]
    NotConfigurable { key: String },

    /// Setting a delegation link that would reach back to the record itself.
    #[error("cyclic delegation: record would inherit from itself")]
    CyclicDelegation,

    /// Operator lookup found no registered implementation.
    #[error("unknown operator: {name}")]
    UnknownOperator { name: String },

    /// A validated setter rejected the supplied value.
    #[error("invalid value for '{key}': {value}")]
    ValidationFailed { key: String, value: String },

    /// A user-level throw carrying only a message.
    #[error("{0}")]
    Thrown(String),
}

impl EvalError {
    /// Short category name, in the style of the scripting language's error
    /// constructors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. }
            | Self::TypeMismatch { .. }
            | Self::NotCallable { .. }
            | Self::ReadOnly { .. }
            | Self::NoSetter { .. }
            | Self::NotExtensible { .. }
            | Self::NotConfigurable { .. }
            | Self::CyclicDelegation => "TypeError",
            Self::UnknownOperator { .. } | Self::ValidationFailed { .. } | Self::Thrown(_) => {
                "Error"
            }
        }
    }
}

// Factory functions

#[cold]
pub fn invalid_argument(message: impl Into<String>) -> EvalError {
    EvalError::InvalidArgument {
        message: message.into(),
    }
}

#[cold]
pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> EvalError {
    EvalError::TypeMismatch {
        expected: expected.into(),
        got: got.into(),
    }
}

#[cold]
pub fn not_callable(type_name: impl Into<String>) -> EvalError {
    EvalError::NotCallable {
        type_name: type_name.into(),
    }
}

#[cold]
pub fn read_only(key: &str) -> EvalError {
    EvalError::ReadOnly { key: key.into() }
}

#[cold]
pub fn no_setter(key: &str) -> EvalError {
    EvalError::NoSetter { key: key.into() }
}

#[cold]
pub fn not_extensible(key: &str) -> EvalError {
    EvalError::NotExtensible { key: key.into() }
}

#[cold]
pub fn not_configurable(key: &str) -> EvalError {
    EvalError::NotConfigurable { key: key.into() }
}

#[cold]
pub fn cyclic_delegation() -> EvalError {
    EvalError::CyclicDelegation
}

#[cold]
pub fn unknown_operator(name: &str) -> EvalError {
    EvalError::UnknownOperator { name: name.into() }
}

#[cold]
pub fn validation_failed(key: &str, value: impl fmt::Display) -> EvalError {
    EvalError::ValidationFailed {
        key: key.into(),
        value: value.to_string(),
    }
}

#[cold]
pub fn thrown(message: impl Into<String>) -> EvalError {
    EvalError::Thrown(message.into())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
