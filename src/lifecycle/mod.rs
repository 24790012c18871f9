//! Lifecycle hooks
//!
//! Services that hold external resources register init and destroy hooks
//! with a [`LifecycleManager`]. The [`Application`] runs the init hooks once
//! the registry is built, serves HTTP until a shutdown signal arrives, and
//! then runs the destroy hooks in reverse registration order.
//!
//! ```text
//! 1. Configuration loading
//! 2. Registry build (modules in order)
//! 3. OnModuleInit (each registered service)
//! 4. Server start
//!    [running]
//! 5. Shutdown signal (SIGTERM/SIGINT)
//! 6. OnModuleDestroy (reverse order)
//! ```

mod application;
mod error;
mod hooks;
mod manager;
mod shutdown;

pub use application::{Application, ApplicationBuilder};
pub use error::{LifecycleError, Result};
pub use hooks::{OnModuleDestroy, OnModuleInit};
pub use manager::LifecycleManager;
pub use shutdown::shutdown_signal;
