//! # Activator
//!
//! Builds instances from a [`TypeDescriptor`] by picking a constructor whose
//! parameters the registry can satisfy and resolving each argument through
//! that same registry.
//!
//! ## Constructor Selection
//!
//! 1. A constructor is **eligible** when the registry reports every one of
//!    its parameter types as registered. Parameterless constructors are
//!    always eligible.
//! 2. Among eligible constructors taking parameters, the one with the fewest
//!    parameters wins; equal arity goes to the first registered.
//! 3. A parameterless constructor is used only when no eligible constructor
//!    takes parameters.
//! 4. Nothing eligible: [`ResolveError::NoEligibleConstructor`].
//!
//! Arguments are resolved in declaration order. The first failure aborts the
//! whole resolution; another constructor is never tried once one is chosen.

use crate::descriptor::{Arguments, ConstructorSignature, Instance, TypeDescriptor, TypeKey};
use crate::error::ResolveError;
use crate::registry::Registry;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless constructor resolver bound to a registry.
pub struct Activator<'r, R: Registry + ?Sized> {
    registry: &'r R,
}

impl<'r, R: Registry + ?Sized> Activator<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self { registry }
    }

    /// Select a constructor, resolve its arguments and invoke it.
    pub fn create_instance(&self, descriptor: &TypeDescriptor) -> Result<Instance, ResolveError> {
        let constructor = self.select_constructor(descriptor)?;
        let args = self.resolve_arguments(constructor)?;
        constructor.invoke(args)
    }

    /// Typed form of [`Activator::create_instance`].
    pub fn create<T: Any + Send + Sync>(
        &self,
        descriptor: &TypeDescriptor,
    ) -> Result<Arc<T>, ResolveError> {
        self.create_instance(descriptor)?
            .downcast::<T>()
            .map_err(|_| ResolveError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                found: descriptor.key().name(),
            })
    }

    /// Pick the constructor [`Activator::create_instance`] would use.
    pub fn select_constructor<'d>(
        &self,
        descriptor: &'d TypeDescriptor,
    ) -> Result<&'d ConstructorSignature, ResolveError> {
        let mut best: Option<&ConstructorSignature> = None;
        let mut parameterless: Option<&ConstructorSignature> = None;

        for constructor in descriptor
            .constructors()
            .iter()
            .filter(|c| self.is_eligible(c))
        {
            if constructor.arity() == 0 {
                parameterless.get_or_insert(constructor);
                continue;
            }
            // Strict comparison keeps the earliest registration on ties.
            if best.map_or(true, |b| constructor.arity() < b.arity()) {
                best = Some(constructor);
            }
        }

        let Some(selected) = best.or(parameterless) else {
            warn!(
                type_name = descriptor.key().name(),
                constructors = descriptor.constructors().len(),
                "No eligible constructor"
            );
            return Err(ResolveError::NoEligibleConstructor {
                type_name: descriptor.key().name(),
                constructors: descriptor.constructors().len(),
            });
        };

        debug!(
            type_name = descriptor.key().name(),
            arity = selected.arity(),
            "Constructor selected"
        );
        Ok(selected)
    }

    fn is_eligible(&self, constructor: &ConstructorSignature) -> bool {
        constructor
            .params()
            .iter()
            .all(|param| self.registry.is_registered(*param))
    }

    fn resolve_arguments(
        &self,
        constructor: &ConstructorSignature,
    ) -> Result<Arguments, ResolveError> {
        let mut values: Vec<(TypeKey, Instance)> = Vec::with_capacity(constructor.arity());
        for param in constructor.params() {
            values.push((*param, self.registry.resolve(*param)?));
        }
        Ok(Arguments::new(values))
    }
}
