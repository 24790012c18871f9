use crate::di::key::{Entry, ErasedFactory, Instance};
use crate::di::{Key, Lifetime};
use crate::error::{Result, ShelfwiseError};
use dashmap::DashMap;
use std::sync::Arc;

/// Deepest dependency chain a single resolution may walk before it is
/// treated as runaway recursion.
pub const MAX_RESOLUTION_DEPTH: usize = 64;

/// Keyed dependency registry.
///
/// A `Registry` is a cheap handle: clones share the same registrations and
/// caches. Child scopes created with [`Registry::create_scope`] see every
/// registration of their ancestors, may override any of them locally, and
/// keep their own cache of scoped instances. A cached scoped instance is
/// only reused while the registration that built it is still the one in
/// effect, so re-registering a key on a parent reaches live child scopes.
///
/// # Lifetimes
///
/// - Singletons are cached by the registry that owns the registration, so a
///   scope reuses its parent's singletons unless it overrides the key.
/// - Scoped instances are cached by the scope the resolution started from.
/// - Transient entries are rebuilt every time.
///
/// # Example
///
/// ```
/// use shelfwise::di::{Key, Registry};
/// use std::sync::Arc;
///
/// struct Greeter(String);
/// const GREETING: Key<String> = Key::new("greeting");
/// const GREETER: Key<Greeter> = Key::new("greeter");
///
/// let registry = Registry::new();
/// registry.register([
///     GREETER.singleton(|r| Ok(Greeter(r.resolve(&GREETING)?.to_string()))),
///     GREETING.value("hello".to_string()),
/// ]);
///
/// let first = registry.resolve(&GREETER).unwrap();
/// let second = registry.resolve(&GREETER).unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(first.0, "hello");
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: DashMap<&'static str, Entry>,
    singletons: DashMap<&'static str, Instance>,
    scoped: DashMap<&'static str, (ErasedFactory, Instance)>,
    parent: Option<Registry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds registrations to this level. Later registrations under the same
    /// key replace earlier ones, including any instance already cached for it.
    pub fn register(&self, entries: impl IntoIterator<Item = Entry>) {
        for entry in entries {
            tracing::debug!(key = entry.key, lifetime = ?entry.lifetime, "Registering dependency");
            self.inner.singletons.remove(entry.key);
            self.inner.scoped.remove(entry.key);
            self.inner.entries.insert(entry.key, entry);
        }
    }

    /// Resolves `key`, building it and its dependencies as needed.
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self, key: &Key<T>) -> Result<Arc<T>> {
        Resolver::new(self.clone()).resolve(key)
    }

    /// Like [`resolve`](Self::resolve), but an unregistered key yields `None`
    /// instead of an error.
    pub fn try_resolve<T: ?Sized + Send + Sync + 'static>(
        &self,
        key: &Key<T>,
    ) -> Result<Option<Arc<T>>> {
        if !self.contains(key.name()) {
            return Ok(None);
        }
        self.resolve(key).map(Some)
    }

    /// Whether `key` is registered here or in any ancestor.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.entries.contains_key(key)
            || self.inner.parent.as_ref().is_some_and(|p| p.contains(key))
    }

    /// Every key visible from this registry, sorted.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.inner.entries.iter().map(|e| *e.key()).collect();
        if let Some(parent) = &self.inner.parent {
            keys.extend(parent.keys());
        }
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Creates a child scope with its own scoped cache and override layer.
    pub fn create_scope(&self) -> Registry {
        Registry {
            inner: Arc::new(Inner {
                parent: Some(self.clone()),
                ..Inner::default()
            }),
        }
    }

    pub fn parent(&self) -> Option<&Registry> {
        self.inner.parent.as_ref()
    }

    fn lookup(&self, key: &str) -> Option<(Entry, Registry)> {
        let local = self.inner.entries.get(key).map(|e| e.value().clone());
        match local {
            Some(entry) => Some((entry, self.clone())),
            None => self.inner.parent.as_ref().and_then(|p| p.lookup(key)),
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.inner.entries.len())
            .field("is_scope", &self.inner.parent.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    key: &'static str,
    lifetime: Lifetime,
}

/// Resolution context handed to factories.
///
/// It remembers the chain of keys currently being built so that cycles and
/// singletons capturing scoped dependencies are reported instead of looping
/// or leaking.
pub struct Resolver {
    scope: Registry,
    chain: Vec<Frame>,
}

impl Resolver {
    fn new(scope: Registry) -> Self {
        Self {
            scope,
            chain: Vec::new(),
        }
    }

    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self, key: &Key<T>) -> Result<Arc<T>> {
        let instance = self.resolve_erased(key.name())?;
        instance
            .downcast::<Arc<T>>()
            .map(|wrapper| Arc::clone(&*wrapper))
            .map_err(|_| ShelfwiseError::DowncastFailed {
                key: key.name().to_string(),
            })
    }

    /// The registry the current resolution started from.
    pub fn registry(&self) -> &Registry {
        &self.scope
    }

    fn resolve_erased(&self, key: &'static str) -> Result<Instance> {
        if self.chain.iter().any(|frame| frame.key == key) {
            return Err(ShelfwiseError::CircularDependency {
                cycle: self.describe_cycle(key),
            });
        }
        if self.chain.len() >= MAX_RESOLUTION_DEPTH {
            return Err(ShelfwiseError::CircularDependency {
                cycle: format!(
                    "resolution depth exceeded {MAX_RESOLUTION_DEPTH} at {}",
                    self.describe_cycle(key)
                ),
            });
        }

        let (entry, owner) =
            self.scope
                .lookup(key)
                .ok_or_else(|| ShelfwiseError::DependencyNotFound {
                    key: key.to_string(),
                })?;

        if entry.lifetime == Lifetime::Scoped {
            if let Some(singleton) = self
                .chain
                .iter()
                .rev()
                .find(|frame| frame.lifetime == Lifetime::Singleton)
            {
                return Err(ShelfwiseError::ScopeMismatch {
                    message: format!(
                        "singleton '{}' cannot depend on scoped '{}'",
                        singleton.key, key
                    ),
                });
            }
        }

        match entry.lifetime {
            Lifetime::Transient => self.build(&entry, &self.scope),
            Lifetime::Singleton => {
                let cached = owner.inner.singletons.get(key).map(|i| i.value().clone());
                if let Some(instance) = cached {
                    return Ok(instance);
                }
                let instance = self.build(&entry, &owner)?;
                Ok(owner
                    .inner
                    .singletons
                    .entry(key)
                    .or_insert(instance)
                    .value()
                    .clone())
            }
            Lifetime::Scoped => {
                let cached = self.scope.inner.scoped.get(key).and_then(|cached| {
                    let (factory, instance) = cached.value();
                    Arc::ptr_eq(factory, &entry.factory).then(|| instance.clone())
                });
                if let Some(instance) = cached {
                    return Ok(instance);
                }
                let instance = self.build(&entry, &self.scope)?;
                let mut slot = self
                    .scope
                    .inner
                    .scoped
                    .entry(key)
                    .or_insert_with(|| (entry.factory.clone(), instance.clone()));
                if !Arc::ptr_eq(&slot.0, &entry.factory) {
                    *slot = (entry.factory.clone(), instance);
                }
                Ok(slot.1.clone())
            }
        }
    }

    /// Runs the factory with a resolver rooted at `scope`. Singletons are
    /// built from their owner so they never see a child scope's overrides.
    fn build(&self, entry: &Entry, scope: &Registry) -> Result<Instance> {
        let mut chain = self.chain.clone();
        chain.push(Frame {
            key: entry.key,
            lifetime: entry.lifetime,
        });
        let child = Resolver {
            scope: scope.clone(),
            chain,
        };
        (entry.factory)(&child)
    }

    fn describe_cycle(&self, key: &str) -> String {
        self.chain
            .iter()
            .map(|frame| frame.key)
            .chain(std::iter::once(key))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
