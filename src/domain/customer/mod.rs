pub mod dto;
pub mod entity;
pub mod repository;
pub mod service;

pub use dto::{CustomerDto, CustomerMapper};
pub use repository::{CustomerFilter, CustomerRepository, CustomerRepositoryFactory};
pub use service::CustomerService;

use crate::di::{Key, Registry};
use crate::domain::user::USER_REPOSITORY_FACTORY;
use crate::error::Result;
use crate::module::Module;
use async_trait::async_trait;

pub const CUSTOMER_MAPPER: Key<CustomerMapper> = Key::new("customerMapper");
pub const CUSTOMER_REPOSITORY_FACTORY: Key<CustomerRepositoryFactory> =
    Key::new("customerRepositoryFactory");
pub const CUSTOMER_SERVICE: Key<CustomerService> = Key::new("customerService");

pub struct CustomerModule;

#[async_trait]
impl Module for CustomerModule {
    fn name(&self) -> &'static str {
        "customer"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([
            CUSTOMER_MAPPER.singleton(|_| Ok(CustomerMapper)),
            CUSTOMER_REPOSITORY_FACTORY
                .singleton(|r| Ok(CustomerRepositoryFactory::new(r.resolve(&CUSTOMER_MAPPER)?))),
            CUSTOMER_SERVICE.singleton(|r| {
                Ok(CustomerService::new(
                    r.resolve(&CUSTOMER_REPOSITORY_FACTORY)?,
                    r.resolve(&USER_REPOSITORY_FACTORY)?,
                ))
            }),
        ]);
        Ok(())
    }
}
