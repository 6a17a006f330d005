//! # Registry Capability
//!
//! The lookup/construction service the activator queries. The activator only
//! ever reads through this trait; it never registers anything.

use crate::descriptor::{Instance, TypeKey};
use crate::error::ResolveError;

/// A source of instances keyed by type.
///
/// Implementations must be safe for concurrent reads: one activator may be
/// shared by many threads, all calling back into the same registry.
pub trait Registry: Send + Sync {
    /// Whether `key` can be resolved.
    fn is_registered(&self, key: TypeKey) -> bool;

    /// Produce an instance for `key`.
    ///
    /// Should fail with [`ResolveError::UnresolvedDependency`] for unknown
    /// keys. Any error is passed through the activator untouched.
    fn resolve(&self, key: TypeKey) -> Result<Instance, ResolveError>;
}
