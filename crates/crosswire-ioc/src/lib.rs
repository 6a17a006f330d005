//! # Crosswire IoC
//!
//! Minimal dependency injection: instances are built by choosing one of a
//! type's constructors and satisfying its parameters from a [`Registry`].
//!
//! ## Pieces
//!
//! - [`TypeDescriptor`]: the constructors a type offers, each an ordered list
//!   of parameter types plus a factory. Registered explicitly, no reflection.
//! - [`Registry`]: the capability answering "is this type known?" and
//!   "produce an instance of this type".
//! - [`Activator`]: picks the constructor and resolves arguments through the
//!   registry, recursively.
//! - [`Container`]: a `Registry` holding instance, factory and type bindings.
//!
//! ## Not Supported
//!
//! Circular dependency detection, lifetime scopes and multiple bindings per
//! type. A cycle between type bindings recurses until the stack overflows.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod activator;
pub mod container;
pub mod descriptor;
pub mod error;
pub mod registry;

pub use activator::Activator;
pub use container::Container;
pub use descriptor::{
    Arguments, ConstructorSignature, DescriptorBuilder, Instance, TypeDescriptor, TypeKey,
};
pub use error::ResolveError;
pub use registry::Registry;
