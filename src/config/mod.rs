//! Application and per-list configuration.

mod list;
mod loader;
mod store;
mod types;

pub use list::{ListConfig, NamedListView, QuickFilter};
pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{Config, Defaults, StorageConfig};
