use crate::domain::user::dto::{AccessTokenDto, UserDto};
use crate::domain::user::entity::UserRole;
use crate::domain::user::hash_service::HashService;
use crate::domain::user::repository::{
    CreateUserData, UpdateUserData, UserFilter, UserRepositoryFactory,
};
use crate::domain::user::token_service::{AuthPayload, TokenService};
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use std::sync::Arc;
use uuid::Uuid;

pub struct RegisterUserData {
    pub email: String,
    pub password: String,
}

pub struct UserService {
    repository_factory: Arc<UserRepositoryFactory>,
    hash_service: Arc<dyn HashService>,
    token_service: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(
        repository_factory: Arc<UserRepositoryFactory>,
        hash_service: Arc<dyn HashService>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            repository_factory,
            hash_service,
            token_service,
        }
    }

    pub async fn register_user(&self, uow: &UnitOfWork, data: RegisterUserData) -> Result<UserDto> {
        tracing::debug!(email = %data.email, "Registering user");

        let password_hash = self.hash_service.hash(&data.password)?;
        let user = self
            .repository_factory
            .create(uow)
            .create_one(CreateUserData {
                email: data.email,
                password_hash,
                role: UserRole::User,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Unknown email is `NotFound`; a wrong password is `InvalidCredentials`.
    pub async fn login_user(
        &self,
        uow: &UnitOfWork,
        email: &str,
        password: &str,
    ) -> Result<AccessTokenDto> {
        let user = self
            .repository_factory
            .create(uow)
            .find_one(&UserFilter::by_email(email))
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("user", format!("email={email}")))?;

        if !self.hash_service.verify(password, &user.password)? {
            tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
            return Err(ShelfwiseError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(AuthPayload {
            user_id: user.id,
            role: user.role,
        })?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AccessTokenDto { access_token })
    }

    pub async fn set_password(&self, uow: &UnitOfWork, user_id: Uuid, password: &str) -> Result<()> {
        let password_hash = self.hash_service.hash(password)?;
        self.repository_factory
            .create(uow)
            .update_one(
                user_id,
                UpdateUserData {
                    password_hash: Some(password_hash),
                    ..UpdateUserData::default()
                },
            )
            .await?;
        tracing::info!(user_id = %user_id, "Password updated");
        Ok(())
    }

    pub async fn find_user(&self, uow: &UnitOfWork, user_id: Uuid) -> Result<UserDto> {
        self.repository_factory
            .create(uow)
            .find_one_by_id(user_id)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("user", format!("id={user_id}")))
    }

    pub async fn remove_user(&self, uow: &UnitOfWork, user_id: Uuid) -> Result<()> {
        self.repository_factory.create(uow).remove_one(user_id).await?;
        tracing::info!(user_id = %user_id, "User removed");
        Ok(())
    }
}
