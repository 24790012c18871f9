mod builder;
mod key;
mod registry;

pub use builder::RegistryBuilder;
pub use key::{Entry, Key, Lifetime};
pub use registry::{MAX_RESOLUTION_DEPTH, Registry, Resolver};
