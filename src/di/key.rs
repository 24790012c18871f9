use crate::di::Resolver;
use crate::error::Result;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-erased instance as stored in the registry caches.
///
/// The `Any` always holds an `Arc<T>` for the key's `T`, which lets trait
/// objects (`Key<dyn Trait>`) be stored the same way as concrete types.
pub(crate) type Instance = Arc<dyn Any + Send + Sync>;

pub(crate) type ErasedFactory = Arc<dyn Fn(&Resolver) -> Result<Instance> + Send + Sync>;

/// How long a resolved instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// A new instance on every resolution.
    Transient,
    /// One instance per scope (see [`Registry::create_scope`](crate::di::Registry::create_scope)).
    Scoped,
    /// One instance per registry that owns the registration, shared with its scopes.
    Singleton,
}

/// Symbolic, typed name of a registrable dependency.
///
/// Keys are declared as constants next to the module that owns them:
///
/// ```
/// use shelfwise::di::Key;
///
/// pub struct BookMapper;
/// pub const BOOK_MAPPER: Key<BookMapper> = Key::new("bookMapper");
/// assert_eq!(BOOK_MAPPER.name(), "bookMapper");
/// ```
///
/// Two keys are equal when their names are equal; the type parameter only
/// drives what `resolve` hands back.
pub struct Key<T: ?Sized> {
    name: &'static str,
    _type: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: ?Sized> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Key<T> {}

impl<T: ?Sized> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: ?Sized> Eq for Key<T> {}

impl<T: ?Sized> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T: ?Sized> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

impl<T: ?Sized + Send + Sync + 'static> Key<T> {
    /// Registration built once per owning registry.
    pub fn singleton<R, F>(self, factory: F) -> Entry
    where
        R: Into<Arc<T>>,
        F: Fn(&Resolver) -> Result<R> + Send + Sync + 'static,
    {
        Entry::new(self.name, Lifetime::Singleton, erase::<T, R, F>(factory))
    }

    /// Registration built once per scope.
    pub fn scoped<R, F>(self, factory: F) -> Entry
    where
        R: Into<Arc<T>>,
        F: Fn(&Resolver) -> Result<R> + Send + Sync + 'static,
    {
        Entry::new(self.name, Lifetime::Scoped, erase::<T, R, F>(factory))
    }

    /// Registration built on every resolution.
    pub fn transient<R, F>(self, factory: F) -> Entry
    where
        R: Into<Arc<T>>,
        F: Fn(&Resolver) -> Result<R> + Send + Sync + 'static,
    {
        Entry::new(self.name, Lifetime::Transient, erase::<T, R, F>(factory))
    }

    /// A pre-built instance; every resolution returns this exact value.
    pub fn value(self, instance: impl Into<Arc<T>>) -> Entry {
        let instance: Instance = Arc::new(instance.into());
        Entry::new(
            self.name,
            Lifetime::Singleton,
            Arc::new(move |_: &Resolver| Ok(Arc::clone(&instance))),
        )
    }
}

fn erase<T, R, F>(factory: F) -> ErasedFactory
where
    T: ?Sized + Send + Sync + 'static,
    R: Into<Arc<T>>,
    F: Fn(&Resolver) -> Result<R> + Send + Sync + 'static,
{
    Arc::new(move |resolver: &Resolver| {
        let instance: Arc<T> = factory(resolver)?.into();
        Ok(Arc::new(instance) as Instance)
    })
}

/// A keyed registration, ready to be handed to [`Registry::register`](crate::di::Registry::register).
#[derive(Clone)]
pub struct Entry {
    pub(crate) key: &'static str,
    pub(crate) lifetime: Lifetime,
    pub(crate) factory: ErasedFactory,
}

impl Entry {
    fn new(key: &'static str, lifetime: Lifetime, factory: ErasedFactory) -> Self {
        Self {
            key,
            lifetime,
            factory,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
