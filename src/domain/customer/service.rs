use crate::common::Pagination;
use crate::domain::customer::dto::CustomerDto;
use crate::domain::customer::repository::{CustomerFilter, CustomerRepositoryFactory};
use crate::domain::user::UserRepositoryFactory;
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use std::sync::Arc;
use uuid::Uuid;

pub struct CustomerService {
    repository_factory: Arc<CustomerRepositoryFactory>,
    user_repository_factory: Arc<UserRepositoryFactory>,
}

impl CustomerService {
    pub fn new(
        repository_factory: Arc<CustomerRepositoryFactory>,
        user_repository_factory: Arc<UserRepositoryFactory>,
    ) -> Self {
        Self {
            repository_factory,
            user_repository_factory,
        }
    }

    pub async fn create_customer(&self, uow: &UnitOfWork, user_id: Uuid) -> Result<CustomerDto> {
        tracing::debug!(user_id = %user_id, "Creating customer");

        if self
            .user_repository_factory
            .create(uow)
            .find_one_by_id(user_id)
            .await?
            .is_none()
        {
            return Err(ShelfwiseError::not_found("user", format!("id={user_id}")));
        }

        let customer = self.repository_factory.create(uow).create_one(user_id).await?;
        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn find_customer(&self, uow: &UnitOfWork, customer_id: Uuid) -> Result<CustomerDto> {
        self.repository_factory
            .create(uow)
            .find_one_by_id(customer_id)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("customer", format!("id={customer_id}")))
    }

    pub async fn find_customers(
        &self,
        uow: &UnitOfWork,
        filter: &CustomerFilter,
        pagination: Pagination,
    ) -> Result<Vec<CustomerDto>> {
        self.repository_factory
            .create(uow)
            .find_many(filter, pagination)
            .await
    }

    pub async fn remove_customer(&self, uow: &UnitOfWork, customer_id: Uuid) -> Result<()> {
        self.repository_factory.create(uow).remove_one(customer_id).await?;
        tracing::info!(customer_id = %customer_id, "Customer removed");
        Ok(())
    }
}
