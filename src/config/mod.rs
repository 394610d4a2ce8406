//! Configuration file support.
//!
//! A `.jsreshape.toml` carries printer options under `[format]` and a list
//! of rewrite rules. Loading validates the file by compiling every rule, so
//! a broken rule is reported with the file that contains it.

pub mod loader;
pub mod schema;

pub use loader::{discover, load_from_path, load_from_str, ConfigError, CONFIG_FILE_NAME};
pub use schema::{Config, ValidationError, ValidationIssue};
