//! # Shelfwise
//!
//! Bookstore backend built from loadable modules over a keyed dependency
//! registry, with explicit units of work for every database transaction.
//!
//! ## Layout
//!
//! - [`di`]: keyed registry with transient, scoped, and singleton lifetimes
//! - [`module`]: loadable modules folded into a registry in order
//! - [`transactional`]: units of work and the transaction runner
//! - [`domain`]: entities, repositories, and services per domain area
//! - [`controllers`]: HTTP routes, one controller per domain area
//! - [`app`]: the production module list and router
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shelfwise::app::{build_router, default_modules};
//! use shelfwise::config::{AppConfig, ConfigService};
//! use shelfwise::module::build_registry;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AppConfig::from_service(&ConfigService::from_env())?;
//! let registry = build_registry(default_modules(&config)).await?;
//! let router = build_router(&registry)?;
//!
//! let listener = tokio::net::TcpListener::bind(config.http.address()).await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod common;
pub mod config;
pub mod controllers;
pub mod database;
pub mod di;
pub mod domain;
pub mod error;
pub mod exception;
pub mod guard;
pub mod lifecycle;
pub mod logging;
pub mod module;
pub mod pipe;
pub mod transactional;

pub use common::ApiResponse;
pub use di::{Key, Registry, RegistryBuilder};
pub use error::{Result, ShelfwiseError};
pub use module::Module;

pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use shelfwise::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ApiResponse, Pagination};
    pub use crate::database::{DATABASE, Database, DbModule, TRANSACTION_RUNNER, UNIT_OF_WORK};
    pub use crate::di::{Key, Lifetime, Registry, RegistryBuilder, Resolver};
    pub use crate::error::{Result, ShelfwiseError};
    pub use crate::exception::ExceptionFilter;
    pub use crate::guard::{Guard, GuardError, GuardLayer, GuardResult};
    pub use crate::lifecycle::{
        Application, ApplicationBuilder, LifecycleError, LifecycleManager, OnModuleDestroy,
        OnModuleInit, shutdown_signal,
    };
    pub use crate::module::{Module, build_registry};
    pub use crate::pipe::{ParseUuidPipe, Pipe, PipeError, PipeResult, Validate, ValidationPipe};
    pub use crate::transactional::{TransactionOptions, TransactionRunner, UnitOfWork};
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
