use crate::di::{Registry, RegistryBuilder};
use crate::error::Result;
use async_trait::async_trait;

/// A unit of registration for one area of the application.
///
/// A module registers the entries it owns and nothing else. It may resolve
/// keys owned by other modules from inside its factories, since resolution
/// only happens after the whole registry has been built.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use shelfwise::di::{Key, Registry};
/// use shelfwise::error::Result;
/// use shelfwise::module::Module;
///
/// pub struct Clock;
/// pub const CLOCK: Key<Clock> = Key::new("clock");
///
/// pub struct ClockModule;
///
/// #[async_trait]
/// impl Module for ClockModule {
///     fn name(&self) -> &'static str {
///         "clock"
///     }
///
///     async fn register(&self, registry: &Registry) -> Result<()> {
///         registry.register([CLOCK.singleton(|_| Ok(Clock))]);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Module: Send + Sync {
    fn name(&self) -> &'static str;

    /// Registers this module's entries. May await external setup first.
    async fn register(&self, registry: &Registry) -> Result<()>;
}

/// Folds `modules`, in order, into a fresh registry.
pub async fn build_registry(modules: Vec<Box<dyn Module>>) -> Result<Registry> {
    RegistryBuilder::new().modules(modules).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::Key;
    use crate::error::ShelfwiseError;
    use std::sync::Arc;

    const NAME: Key<String> = Key::new("name");
    const GREETING: Key<String> = Key::new("greeting");

    struct NameModule(&'static str);

    #[async_trait]
    impl Module for NameModule {
        fn name(&self) -> &'static str {
            "name"
        }

        async fn register(&self, registry: &Registry) -> Result<()> {
            let name = self.0;
            registry.register([NAME.singleton(move |_| Ok(name.to_string()))]);
            Ok(())
        }
    }

    struct GreetingModule;

    #[async_trait]
    impl Module for GreetingModule {
        fn name(&self) -> &'static str {
            "greeting"
        }

        async fn register(&self, registry: &Registry) -> Result<()> {
            registry.register([GREETING.singleton(|r| Ok(format!("hello {}", r.resolve(&NAME)?)))]);
            Ok(())
        }
    }

    struct FailingModule;

    #[async_trait]
    impl Module for FailingModule {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn register(&self, _registry: &Registry) -> Result<()> {
            tokio::task::yield_now().await;
            Err(ShelfwiseError::ModuleRegistrationFailed {
                module: "failing".into(),
                message: "resource unavailable".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_disjoint_modules_are_order_independent() {
        let forward = build_registry(vec![Box::new(NameModule("ada")), Box::new(GreetingModule)])
            .await
            .unwrap();
        let backward = build_registry(vec![Box::new(GreetingModule), Box::new(NameModule("ada"))])
            .await
            .unwrap();

        assert_eq!(forward.keys(), backward.keys());
        assert_eq!(
            forward.resolve(&GREETING).unwrap(),
            backward.resolve(&GREETING).unwrap()
        );
    }

    #[tokio::test]
    async fn test_last_module_wins_on_shared_key() {
        let registry = build_registry(vec![
            Box::new(NameModule("production")),
            Box::new(NameModule("override")),
        ])
        .await
        .unwrap();

        assert_eq!(registry.resolve(&NAME).unwrap().as_str(), "override");
    }

    #[tokio::test]
    async fn test_failing_module_aborts_build() {
        let result = RegistryBuilder::new()
            .module(NameModule("ada"))
            .module(FailingModule)
            .module(GreetingModule)
            .build()
            .await;

        assert!(matches!(
            result,
            Err(ShelfwiseError::ModuleRegistrationFailed { ref module, .. }) if module == "failing"
        ));
    }

    #[tokio::test]
    async fn test_builder_overrides_apply_after_modules() {
        let registry = RegistryBuilder::new()
            .module(NameModule("production"))
            .entries([NAME.value("test".to_string())])
            .build()
            .await
            .unwrap();

        let name: Arc<String> = registry.resolve(&NAME).unwrap();
        assert_eq!(name.as_str(), "test");
    }
}
