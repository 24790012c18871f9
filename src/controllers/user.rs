use super::extract::JsonBody;
use super::{parse_body, parse_id};
use crate::common::ApiResponse;
use crate::domain::user::dto::{AccessTokenDto, LoginUserDto, RegisterUserDto, SetPasswordDto};
use crate::domain::user::service::RegisterUserData;
use crate::domain::user::{AuthPayload, UserDto, UserService};
use crate::error::Result;
use crate::guard::{GuardLayer, ensure_same_user};
use crate::transactional::TransactionRunner;
use axum::{
    Extension, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

pub struct UserController {
    runner: Arc<TransactionRunner>,
    service: Arc<UserService>,
}

impl UserController {
    pub fn new(runner: Arc<TransactionRunner>, service: Arc<UserService>) -> Self {
        Self { runner, service }
    }

    pub fn router(self: Arc<Self>, guard: GuardLayer) -> Router {
        Router::new()
            .route("/users/set-password", post(Self::set_password))
            .route("/users/{id}", get(Self::find_user).delete(Self::remove_user))
            .route_layer(guard)
            .route("/users/register", post(Self::register))
            .route("/users/login", post(Self::login))
            .with_state(self)
    }

    async fn register(
        State(this): State<Arc<Self>>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<UserDto>> {
        let dto: RegisterUserDto = parse_body(body)?;
        let service = &this.service;
        let user = this
            .runner
            .run_in_transaction(|uow| async move {
                service
                    .register_user(
                        &uow,
                        RegisterUserData {
                            email: dto.email,
                            password: dto.password,
                        },
                    )
                    .await
            })
            .await?;
        Ok(ApiResponse::created(user))
    }

    async fn login(
        State(this): State<Arc<Self>>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<AccessTokenDto>> {
        let dto: LoginUserDto = parse_body(body)?;
        let service = &this.service;
        let token = this
            .runner
            .run_in_transaction(|uow| async move {
                service.login_user(&uow, &dto.email, &dto.password).await
            })
            .await?;
        Ok(ApiResponse::ok(token))
    }

    async fn set_password(
        State(this): State<Arc<Self>>,
        Extension(auth): Extension<AuthPayload>,
        JsonBody(body): JsonBody,
    ) -> Result<StatusCode> {
        let dto: SetPasswordDto = parse_body(body)?;
        ensure_same_user(&auth, dto.user_id)?;
        let service = &this.service;
        this.runner
            .run_in_transaction(|uow| async move {
                service.set_password(&uow, dto.user_id, &dto.password).await
            })
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    async fn find_user(
        State(this): State<Arc<Self>>,
        Extension(auth): Extension<AuthPayload>,
        Path(id): Path<String>,
    ) -> Result<ApiResponse<UserDto>> {
        let user_id = parse_id("id", id)?;
        ensure_same_user(&auth, user_id)?;
        let service = &this.service;
        let user = this
            .runner
            .run_in_transaction(|uow| async move { service.find_user(&uow, user_id).await })
            .await?;
        Ok(ApiResponse::ok(user))
    }

    async fn remove_user(
        State(this): State<Arc<Self>>,
        Extension(auth): Extension<AuthPayload>,
        Path(id): Path<String>,
    ) -> Result<StatusCode> {
        let user_id = parse_id("id", id)?;
        ensure_same_user(&auth, user_id)?;
        let service = &this.service;
        this.runner
            .run_in_transaction(|uow| async move { service.remove_user(&uow, user_id).await })
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
