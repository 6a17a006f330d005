//! # Container
//!
//! Type-keyed bindings implementing [`Registry`]. One binding per type;
//! registering a type again replaces its binding.
//!
//! | Binding    | Resolution                                              |
//! |------------|---------------------------------------------------------|
//! | Instance   | The same shared value every time                        |
//! | Factory    | Closure invoked on every resolve                        |
//! | Type       | Fresh value built by the [`Activator`] on every resolve |
//!
//! ## Usage
//!
//! ```
//! use crosswire_ioc::{Container, TypeDescriptor};
//! use std::sync::Arc;
//!
//! struct Settings { capacity: usize }
//! struct Buffer { settings: Arc<Settings> }
//!
//! let container = Container::new();
//! container.register_instance(Settings { capacity: 8 });
//! container.register_type(
//!     TypeDescriptor::of::<Buffer>()
//!         .constructor1(|settings: Arc<Settings>| Buffer { settings })
//!         .build(),
//! );
//!
//! let buffer = container.resolve::<Buffer>().unwrap();
//! assert_eq!(buffer.settings.capacity, 8);
//! ```

use crate::activator::Activator;
use crate::descriptor::{Instance, TypeDescriptor, TypeKey};
use crate::error::ResolveError;
use crate::registry::Registry;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

type FactoryFn = Arc<dyn Fn(&Container) -> Result<Instance, ResolveError> + Send + Sync>;

#[derive(Clone)]
enum Binding {
    Instance(Instance),
    Factory(FactoryFn),
    Type(Arc<TypeDescriptor>),
}

impl Binding {
    fn kind(&self) -> &'static str {
        match self {
            Self::Instance(_) => "instance",
            Self::Factory(_) => "factory",
            Self::Type(_) => "type",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Instance(_) => "value of an instance binding",
            Self::Factory(_) => "value of a factory binding",
            Self::Type(_) => "value of a type binding",
        }
    }
}

/// Downcast a resolved value, naming where it came from on failure.
fn downcast_instance<T: Any + Send + Sync>(
    instance: Instance,
    found: &'static str,
) -> Result<Arc<T>, ResolveError> {
    instance
        .downcast::<T>()
        .map_err(|_| ResolveError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found,
        })
}

/// Registry of type bindings.
///
/// Bindings sit behind a read/write lock so registration works through a
/// shared reference. The lock is released before any factory or constructor
/// runs, so nested resolution never re-enters it.
#[derive(Default)]
pub struct Container {
    bindings: RwLock<HashMap<TypeKey, Binding>>,
}

impl Container {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `T` to a single shared value.
    pub fn register_instance<T: Any + Send + Sync>(&self, value: T) {
        self.register_shared(Arc::new(value));
    }

    /// Bind `T` to an already shared value.
    pub fn register_shared<T: Any + Send + Sync>(&self, value: Arc<T>) {
        self.bind(TypeKey::of::<T>(), Binding::Instance(value));
    }

    /// Bind `T` to a factory called on every resolve.
    pub fn register_factory<T, F>(&self, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> Result<T, ResolveError> + Send + Sync + 'static,
    {
        let factory: FactoryFn =
            Arc::new(move |container: &Container| Ok(Arc::new(factory(container)?) as Instance));
        self.bind(TypeKey::of::<T>(), Binding::Factory(factory));
    }

    /// Bind the described type; each resolve runs the activator.
    pub fn register_type(&self, descriptor: TypeDescriptor) {
        self.bind(descriptor.key(), Binding::Type(Arc::new(descriptor)));
    }

    /// Remove the binding for `T`. Returns whether one existed.
    pub fn unregister<T: ?Sized + 'static>(&self) -> bool {
        self.bindings.write().remove(&TypeKey::of::<T>()).is_some()
    }

    /// Whether `T` has a binding.
    #[must_use]
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        Registry::is_registered(self, TypeKey::of::<T>())
    }

    /// Resolve `T`.
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>, ResolveError> {
        let binding = self.binding(TypeKey::of::<T>())?;
        let found = binding.label();
        downcast_instance::<T>(self.produce(binding)?, found)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }

    /// All bound keys, in no particular order.
    #[must_use]
    pub fn registered_keys(&self) -> Vec<TypeKey> {
        self.bindings.read().keys().copied().collect()
    }

    // Clone out so the read guard is gone before user code runs.
    fn binding(&self, key: TypeKey) -> Result<Binding, ResolveError> {
        self.bindings
            .read()
            .get(&key)
            .cloned()
            .ok_or(ResolveError::UnresolvedDependency {
                type_name: key.name(),
            })
    }

    fn produce(&self, binding: Binding) -> Result<Instance, ResolveError> {
        match binding {
            Binding::Instance(instance) => Ok(instance),
            Binding::Factory(factory) => factory(self),
            Binding::Type(descriptor) => Activator::new(self).create_instance(&descriptor),
        }
    }

    fn bind(&self, key: TypeKey, binding: Binding) {
        let kind = binding.kind();
        let replaced = self.bindings.write().insert(key, binding).is_some();
        if replaced {
            warn!(type_name = key.name(), kind, "[Container] Binding replaced");
        } else {
            debug!(type_name = key.name(), kind, "[Container] Binding registered");
        }
    }
}

impl Registry for Container {
    fn is_registered(&self, key: TypeKey) -> bool {
        self.bindings.read().contains_key(&key)
    }

    fn resolve(&self, key: TypeKey) -> Result<Instance, ResolveError> {
        self.produce(self.binding(key)?)
    }
}
