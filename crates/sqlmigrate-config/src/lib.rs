pub mod loader;
pub mod model;

pub use loader::ConfigLoader;
pub use model::{DEFAULT_DATABASE, LogConfig, LogFormat, MigrateConfig};
