//! # Type Descriptors
//!
//! Explicit stand-ins for constructor reflection. A [`TypeDescriptor`] lists,
//! in registration order, every constructor a type offers: the ordered
//! parameter types and the factory that builds the value from resolved
//! arguments.
//!
//! ```
//! use crosswire_ioc::TypeDescriptor;
//! use std::sync::Arc;
//!
//! struct Clock;
//! struct Scheduler { clock: Option<Arc<Clock>> }
//!
//! let descriptor = TypeDescriptor::of::<Scheduler>()
//!     .constructor0(|| Scheduler { clock: None })
//!     .constructor1(|clock: Arc<Clock>| Scheduler { clock: Some(clock) })
//!     .build();
//!
//! assert_eq!(descriptor.constructors().len(), 2);
//! ```

use crate::error::ResolveError;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// A resolved value, shareable across threads.
pub type Instance = Arc<dyn Any + Send + Sync>;

type Factory = Arc<dyn Fn(Arguments) -> Result<Instance, ResolveError> + Send + Sync>;

/// Identifies a type. Equality and hashing use the `TypeId` only; the name
/// is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Resolved constructor arguments, consumed in declaration order.
pub struct Arguments {
    values: std::vec::IntoIter<(TypeKey, Instance)>,
    position: usize,
    arity: usize,
}

impl Arguments {
    pub(crate) fn new(values: Vec<(TypeKey, Instance)>) -> Self {
        let arity = values.len();
        Self {
            values: values.into_iter(),
            position: 0,
            arity,
        }
    }

    /// Take the next argument as `A`.
    pub fn take<A: Any + Send + Sync>(&mut self) -> Result<Arc<A>, ResolveError> {
        let position = self.position;
        let Some((key, value)) = self.values.next() else {
            return Err(ResolveError::ArgumentOutOfRange {
                position,
                arity: self.arity,
            });
        };
        self.position += 1;

        value.downcast::<A>().map_err(|_| ResolveError::TypeMismatch {
            expected: std::any::type_name::<A>(),
            found: key.name(),
        })
    }

    /// Number of arguments supplied.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }
}

/// One constructor: ordered parameter types plus the factory.
#[derive(Clone)]
pub struct ConstructorSignature {
    params: Vec<TypeKey>,
    factory: Factory,
}

impl ConstructorSignature {
    /// Parameter types in declaration order.
    #[must_use]
    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub(crate) fn invoke(&self, args: Arguments) -> Result<Instance, ResolveError> {
        (self.factory)(args)
    }
}

impl fmt::Debug for ConstructorSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorSignature")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A constructible type and its constructors in registration order.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    key: TypeKey,
    constructors: Vec<ConstructorSignature>,
}

impl TypeDescriptor {
    /// Start describing `T`.
    #[must_use]
    pub fn of<T: Any + Send + Sync>() -> DescriptorBuilder<T> {
        DescriptorBuilder {
            constructors: Vec::new(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Constructors in registration order.
    #[must_use]
    pub fn constructors(&self) -> &[ConstructorSignature] {
        &self.constructors
    }
}

/// Builder collecting the constructors of `T`.
pub struct DescriptorBuilder<T> {
    constructors: Vec<ConstructorSignature>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> DescriptorBuilder<T> {
    /// Add a constructor with explicit parameter types.
    ///
    /// The factory must `take` its arguments in the order of `params`.
    #[must_use]
    pub fn constructor<F>(mut self, params: Vec<TypeKey>, factory: F) -> Self
    where
        F: Fn(&mut Arguments) -> Result<T, ResolveError> + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move |mut args: Arguments| {
            let value = factory(&mut args)?;
            Ok(Arc::new(value) as Instance)
        });
        self.constructors.push(ConstructorSignature { params, factory });
        self
    }

    /// Add a parameterless constructor.
    #[must_use]
    pub fn constructor0<F>(self, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.constructor(Vec::new(), move |_| Ok(factory()))
    }

    /// Add a constructor taking one dependency.
    #[must_use]
    pub fn constructor1<A, F>(self, factory: F) -> Self
    where
        A: Any + Send + Sync,
        F: Fn(Arc<A>) -> T + Send + Sync + 'static,
    {
        self.constructor(vec![TypeKey::of::<A>()], move |args| {
            Ok(factory(args.take::<A>()?))
        })
    }

    /// Add a constructor taking two dependencies.
    #[must_use]
    pub fn constructor2<A, B, F>(self, factory: F) -> Self
    where
        A: Any + Send + Sync,
        B: Any + Send + Sync,
        F: Fn(Arc<A>, Arc<B>) -> T + Send + Sync + 'static,
    {
        self.constructor(vec![TypeKey::of::<A>(), TypeKey::of::<B>()], move |args| {
            let a = args.take::<A>()?;
            let b = args.take::<B>()?;
            Ok(factory(a, b))
        })
    }

    /// Add a constructor taking three dependencies.
    #[must_use]
    pub fn constructor3<A, B, C, F>(self, factory: F) -> Self
    where
        A: Any + Send + Sync,
        B: Any + Send + Sync,
        C: Any + Send + Sync,
        F: Fn(Arc<A>, Arc<B>, Arc<C>) -> T + Send + Sync + 'static,
    {
        self.constructor(
            vec![TypeKey::of::<A>(), TypeKey::of::<B>(), TypeKey::of::<C>()],
            move |args| {
                let a = args.take::<A>()?;
                let b = args.take::<B>()?;
                let c = args.take::<C>()?;
                Ok(factory(a, b, c))
            },
        )
    }

    #[must_use]
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            key: TypeKey::of::<T>(),
            constructors: self.constructors,
        }
    }
}
