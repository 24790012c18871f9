use crate::di::{Entry, Registry};
use crate::error::Result;
use crate::module::Module;

/// Builder for assembling a [`Registry`] from an ordered list of modules.
///
/// Modules are registered one after another, each awaited to completion
/// before the next starts, so two modules registering the same key always
/// resolve to the later one. Extra entries added with [`entries`](Self::entries)
/// are applied after every module.
///
/// # Example
/// ```rust,ignore
/// let registry = RegistryBuilder::new()
///     .module(DbModule::new(config.clone()))
///     .module(BookModule)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    modules: Vec<Box<dyn Module>>,
    overrides: Vec<Entry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a module to the composition list
    pub fn module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Appends already boxed modules, keeping their order
    pub fn modules(mut self, modules: impl IntoIterator<Item = Box<dyn Module>>) -> Self {
        self.modules.extend(modules);
        self
    }

    /// Entries registered after all modules, typically test overrides
    pub fn entries(mut self, entries: impl IntoIterator<Item = Entry>) -> Self {
        self.overrides.extend(entries);
        self
    }

    /// Runs every module against a fresh registry.
    ///
    /// The first failing module aborts the build and its error is returned;
    /// the partially filled registry is dropped.
    pub async fn build(self) -> Result<Registry> {
        let registry = Registry::new();

        for module in &self.modules {
            tracing::debug!(module = module.name(), "Loading module");
            if let Err(err) = module.register(&registry).await {
                tracing::error!(module = module.name(), error = %err, "Module registration failed");
                return Err(err);
            }
        }
        registry.register(self.overrides);

        tracing::info!(
            modules = self.modules.len(),
            keys = registry.keys().len(),
            "Registry built"
        );
        Ok(registry)
    }
}
