use crate::error::ConfigError;
use rustc_hash::FxHashMap as HashMap;
use serde::Deserialize;
use std::fs;
use toml::Value;

/// Key-value configuration store addressed by section and key.
///
/// Backed by a toml file whose tables are the sections, e.g.,
/// ```toml
/// [hostinfo]
/// cafile = "/etc/opi/op_ca.pem"
/// hostname = "host1"
/// domain = "example.org"
/// unitid = "0123456789"
/// ```
#[derive(Deserialize, Debug, Default, PartialEq, Clone)]
#[serde(transparent)]
pub struct ConfigStore(HashMap<String, Value>);

impl ConfigStore {
  pub fn new(config_file: &str) -> Result<Self, ConfigError> {
    let config_str = fs::read_to_string(config_file)?;
    config_str.parse()
  }

  /// Look up a value as string. Scalar values other than strings are rendered as they are written.
  pub fn get_key_as_string(&self, section: &str, key: &str) -> Result<String, ConfigError> {
    let value = self
      .0
      .get(section)
      .and_then(Value::as_table)
      .and_then(|table| table.get(key))
      .ok_or_else(|| ConfigError::KeyNotFound {
        section: section.to_string(),
        key: key.to_string(),
      })?;
    match value {
      Value::String(s) => Ok(s.to_owned()),
      Value::Integer(i) => Ok(i.to_string()),
      Value::Float(f) => Ok(f.to_string()),
      Value::Boolean(b) => Ok(b.to_string()),
      Value::Datetime(d) => Ok(d.to_string()),
      Value::Array(_) | Value::Table(_) => Err(ConfigError::NotAString {
        section: section.to_string(),
        key: key.to_string(),
      }),
    }
  }

  /// Look up a value that may legitimately be absent
  pub fn get_opt(&self, section: &str, key: &str) -> Option<String> {
    self.get_key_as_string(section, key).ok()
  }
}

impl std::str::FromStr for ConfigStore {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(toml::from_str(s)?)
  }
}
