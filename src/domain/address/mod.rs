pub mod dto;
pub mod entity;
pub mod repository;
pub mod service;

pub use dto::{AddressDto, AddressMapper};
pub use repository::{AddressFilter, AddressRepository, AddressRepositoryFactory};
pub use service::AddressService;

use crate::di::{Key, Registry};
use crate::domain::customer::CUSTOMER_REPOSITORY_FACTORY;
use crate::error::Result;
use crate::module::Module;
use async_trait::async_trait;

pub const ADDRESS_MAPPER: Key<AddressMapper> = Key::new("addressMapper");
pub const ADDRESS_REPOSITORY_FACTORY: Key<AddressRepositoryFactory> =
    Key::new("addressRepositoryFactory");
pub const ADDRESS_SERVICE: Key<AddressService> = Key::new("addressService");

pub struct AddressModule;

#[async_trait]
impl Module for AddressModule {
    fn name(&self) -> &'static str {
        "address"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([
            ADDRESS_MAPPER.singleton(|_| Ok(AddressMapper)),
            ADDRESS_REPOSITORY_FACTORY
                .singleton(|r| Ok(AddressRepositoryFactory::new(r.resolve(&ADDRESS_MAPPER)?))),
            ADDRESS_SERVICE.singleton(|r| {
                Ok(AddressService::new(
                    r.resolve(&ADDRESS_REPOSITORY_FACTORY)?,
                    r.resolve(&CUSTOMER_REPOSITORY_FACTORY)?,
                ))
            }),
        ]);
        Ok(())
    }
}
