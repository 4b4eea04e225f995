//! Parsing and validation of `revue.toml` configuration files.
//!
//! This crate reads the optional project configuration file and produces a
//! strongly-typed [`Config`]. Validation is eager: a configuration that loads
//! successfully never fails later because of a bad exclude pattern or an
//! empty bridge command. Environment overrides are applied with
//! [`Config::apply_env`].

#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod loader;
pub mod types;

pub use env::EnvOverrides;
pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
