use shelfwise::Result;
use shelfwise::di::{Key, Registry};
use shelfwise::transactional::UnitOfWork;
use std::ops::Deref;
use std::sync::Arc;

/// What a test body gets from the internal runner.
///
/// The registry is a child scope of the environment's registry in which
/// `UNIT_OF_WORK` is the test's unit of work and `TRANSACTION_RUNNER`
/// joins it.
#[derive(Clone)]
pub struct TestContext {
    pub(crate) uow: UnitOfWork,
    pub(crate) scope: Registry,
}

impl TestContext {
    pub fn uow(&self) -> &UnitOfWork {
        &self.uow
    }

    pub fn registry(&self) -> &Registry {
        &self.scope
    }

    /// Resolves a service or repository factory from the test scope.
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self, key: &Key<T>) -> Result<Arc<T>> {
        self.scope.resolve(key)
    }
}

/// What a test body gets from the external runner: the internal context
/// plus a live server sharing its unit of work.
pub struct TestServerContext {
    pub(crate) context: TestContext,
    pub(crate) base_url: String,
    pub(crate) client: reqwest::Client,
}

impl TestServerContext {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Deref for TestServerContext {
    type Target = TestContext;

    fn deref(&self) -> &TestContext {
        &self.context
    }
}
