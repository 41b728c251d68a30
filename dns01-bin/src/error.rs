pub use anyhow::{anyhow, Context};
use thiserror::Error;

/// Describes things that can go wrong when looking up the configuration store
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read config file: {0}")]
  Io(#[from] std::io::Error),
  #[error("Invalid toml file: {0}")]
  InvalidToml(#[from] toml::de::Error),
  #[error("Key not found: [{section}] {key}")]
  KeyNotFound { section: String, key: String },
  #[error("Value of [{section}] {key} is not a string")]
  NotAString { section: String, key: String },
}
