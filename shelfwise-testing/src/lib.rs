//! Test transaction runners for shelfwise.
//!
//! A [`TestEnvironment`] composes the production module list against a
//! fresh in-memory SQLite database. Each test body then runs inside one
//! unit of work that is always rolled back, so tests never see each
//! other's rows and never need to rebuild the schema.
//!
//! ```rust,no_run
//! use shelfwise_testing::TestEnvironment;
//! use shelfwise::domain::author::AUTHOR_SERVICE;
//!
//! # async fn example() -> shelfwise::Result<()> {
//! let env = TestEnvironment::new().await?;
//! env.run_in_test_transaction(|ctx| async move {
//!     let authors = ctx.resolve(&AUTHOR_SERVICE).unwrap();
//!     let author = authors
//!         .create_author(ctx.uow(), shelfwise_testing::generators::create_author_dto())
//!         .await
//!         .unwrap();
//!     assert!(!author.first_name.is_empty());
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod context;
mod environment;
pub mod generators;

pub use auth::AuthHelper;
pub use context::{TestContext, TestServerContext};
pub use environment::{TestEnvironment, test_config};
