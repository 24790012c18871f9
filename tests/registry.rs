use async_trait::async_trait;
use shelfwise::di::{Key, Registry};
use shelfwise::module::{Module, build_registry};
use shelfwise::Result;
use std::sync::Arc;

const SHELF: Key<String> = Key::new("shelf");
const LABEL: Key<String> = Key::new("label");
const COUNTER: Key<Vec<u32>> = Key::new("counter");

struct ShelfModule(&'static str);

#[async_trait]
impl Module for ShelfModule {
    fn name(&self) -> &'static str {
        "shelf"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        let shelf = self.0;
        registry.register([
            SHELF.singleton(move |_| Ok(shelf.to_string())),
            COUNTER.singleton(|_| Ok(vec![1, 2, 3])),
        ]);
        Ok(())
    }
}

struct LabelModule;

#[async_trait]
impl Module for LabelModule {
    fn name(&self) -> &'static str {
        "label"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([LABEL.singleton(|r| Ok(format!("label for {}", r.resolve(&SHELF)?)))]);
        Ok(())
    }
}

#[tokio::test]
async fn test_disjoint_modules_resolve_the_same_in_any_order() {
    let forward = build_registry(vec![Box::new(ShelfModule("fiction")), Box::new(LabelModule)])
        .await
        .unwrap();
    let backward = build_registry(vec![Box::new(LabelModule), Box::new(ShelfModule("fiction"))])
        .await
        .unwrap();

    for registry in [&forward, &backward] {
        assert_eq!(*registry.resolve(&SHELF).unwrap(), "fiction");
        assert_eq!(*registry.resolve(&LABEL).unwrap(), "label for fiction");
        assert_eq!(*registry.resolve(&COUNTER).unwrap(), vec![1, 2, 3]);
    }

    let mut forward_keys = forward.keys();
    let mut backward_keys = backward.keys();
    forward_keys.sort_unstable();
    backward_keys.sort_unstable();
    assert_eq!(forward_keys, backward_keys);
}

#[tokio::test]
async fn test_last_registration_wins() {
    let registry = build_registry(vec![
        Box::new(ShelfModule("fiction")),
        Box::new(ShelfModule("poetry")),
    ])
    .await
    .unwrap();

    assert_eq!(*registry.resolve(&SHELF).unwrap(), "poetry");
}

#[tokio::test]
async fn test_singleton_is_built_once() {
    let registry = build_registry(vec![Box::new(ShelfModule("fiction")), Box::new(LabelModule)])
        .await
        .unwrap();

    let first = registry.resolve(&LABEL).unwrap();
    let second = registry.resolve(&LABEL).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let scope = registry.create_scope();
    assert!(Arc::ptr_eq(&first, &scope.resolve(&LABEL).unwrap()));
}

#[tokio::test]
async fn test_unregistered_key_is_reported_by_name() {
    let registry = build_registry(vec![Box::new(LabelModule)]).await.unwrap();

    let err = registry.resolve(&LABEL).unwrap_err();
    assert!(err.to_string().contains("shelf"), "unexpected error: {err}");
}
