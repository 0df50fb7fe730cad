//! Configuration for the nebula landing page.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! field has a default, so a partial file (or no file at all) is valid.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::{default_config_path, load_default, load_from_path, log_dir, save};
pub use schema::{Config, CycleSettings, FieldSettings, SpringSettings};
