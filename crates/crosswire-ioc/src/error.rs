//! # Error Types
//!
//! Failures raised while resolving and constructing instances.

use thiserror::Error;

/// Errors that abort a resolution.
///
/// None of these are retried. A failure deep inside a dependency chain
/// reaches the top-level caller unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Every constructor needs at least one parameter type the registry does
    /// not know (or the type has no constructors at all).
    #[error("No eligible constructor for {type_name} ({constructors} declared)")]
    NoEligibleConstructor {
        type_name: &'static str,
        constructors: usize,
    },

    /// The registry was asked for a type it has no binding for.
    #[error("Unresolved dependency: {type_name} is not registered")]
    UnresolvedDependency { type_name: &'static str },

    /// A resolved value could not be downcast to the requested type.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A factory read past the end of its argument list.
    #[error("Argument {position} requested from a constructor of arity {arity}")]
    ArgumentOutOfRange { position: usize, arity: usize },

    /// A factory refused to build its value.
    #[error("Failed to construct {type_name}: {reason}")]
    Construction {
        type_name: &'static str,
        reason: String,
    },
}

impl ResolveError {
    /// Construction failure for `T`.
    pub fn construction<T: ?Sized>(reason: impl Into<String>) -> Self {
        Self::Construction {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }
}
