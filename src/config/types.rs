//! Key/value configuration access
//!
//! Values are stored as strings and coerced on read.

use crate::config::parse::{parse_config, parse_config_file};
use crate::error::{ConfigError, ConfigResult, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// A source of string key/value pairs with typed accessors
pub trait Configuration {
    /// Raw string value for `key`
    fn get(&self, key: &str) -> ConfigResult<String>;

    fn has(&self, key: &str) -> bool;

    fn set(&mut self, key: &str, value: String);

    /// All keys, sorted
    fn keys(&self) -> Vec<String>;

    /// Accepts `1`/`true`/`yes` and `0`/`false`/`no`, case-insensitively
    fn get_bool(&self, key: &str) -> ConfigResult<bool> {
        let value = self.get(key)?;
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(bad_value(key, value)),
        }
    }

    fn get_int(&self, key: &str) -> ConfigResult<i32> {
        parse_value(key, self.get(key)?)
    }

    fn get_int64(&self, key: &str) -> ConfigResult<i64> {
        parse_value(key, self.get(key)?)
    }

    fn get_double(&self, key: &str) -> ConfigResult<f64> {
        parse_value(key, self.get(key)?)
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" }.to_string());
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.set(key, value.to_string());
    }

    fn set_int64(&mut self, key: &str, value: i64) {
        self.set(key, value.to_string());
    }

    fn set_double(&mut self, key: &str, value: f64) {
        self.set(key, value.to_string());
    }
}

fn bad_value(key: &str, value: String) -> ConfigError {
    ConfigError::BadValue {
        key: key.to_string(),
        value,
    }
}

fn parse_value<T: FromStr>(key: &str, value: String) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| bad_value(key, value))
}

/// In-memory configuration, usually loaded from a YAML file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryConfig {
    values: BTreeMap<String, String>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a YAML document into dotted keys
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        parse_config(yaml)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        parse_config_file(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Configuration for MemoryConfig {
    fn get(&self, key: &str) -> ConfigResult<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))
    }

    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MemoryConfig {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MemoryConfig {
        [
            ("flag.on", "Yes"),
            ("flag.off", "0"),
            ("flag.bad", "maybe"),
            ("num.small", "42"),
            ("num.big", "8589934592"),
            ("num.neg", "-7"),
            ("num.pi", "3.5"),
            ("text", "hello"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_get_and_has() {
        let cfg = config();
        assert!(cfg.has("text"));
        assert_eq!(cfg.get("text").unwrap(), "hello");
        assert!(!cfg.has("missing"));
        assert_eq!(
            cfg.get("missing"),
            Err(ConfigError::KeyNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_get_bool() {
        let cfg = config();
        assert_eq!(cfg.get_bool("flag.on"), Ok(true));
        assert_eq!(cfg.get_bool("flag.off"), Ok(false));
        assert!(matches!(cfg.get_bool("flag.bad"), Err(ConfigError::BadValue { .. })));
        assert!(matches!(cfg.get_bool("nope"), Err(ConfigError::KeyNotFound(_))));
    }

    #[test]
    fn test_get_numbers() {
        let cfg = config();
        assert_eq!(cfg.get_int("num.small"), Ok(42));
        assert_eq!(cfg.get_int("num.neg"), Ok(-7));
        assert_eq!(cfg.get_int64("num.big"), Ok(8_589_934_592));
        assert_eq!(cfg.get_double("num.pi"), Ok(3.5));
        assert_eq!(cfg.get_double("num.small"), Ok(42.0));
    }

    #[test]
    fn test_bad_numbers() {
        let cfg = config();
        assert!(matches!(cfg.get_int("text"), Err(ConfigError::BadValue { .. })));
        // Out of range for i32
        assert!(matches!(cfg.get_int("num.big"), Err(ConfigError::BadValue { .. })));
        assert!(matches!(cfg.get_int64("num.pi"), Err(ConfigError::BadValue { .. })));
    }

    #[test]
    fn test_from_yaml() {
        let cfg = MemoryConfig::from_yaml("log:\n  verbosity: quiet\nretries: 3\n").unwrap();
        assert_eq!(cfg.get("log.verbosity").unwrap(), "quiet");
        assert_eq!(cfg.get_int("retries"), Ok(3));
        assert!(MemoryConfig::load("/nonexistent/vobla.yml").is_err());
    }

    #[test]
    fn test_typed_setters() {
        let mut cfg = MemoryConfig::new();
        cfg.set_bool("a", true);
        cfg.set_int("b", 12);
        cfg.set_int64("c", -5_000_000_000);
        cfg.set_double("d", 0.25);
        assert_eq!(cfg.get_bool("a"), Ok(true));
        assert_eq!(cfg.get_int("b"), Ok(12));
        assert_eq!(cfg.get_int64("c"), Ok(-5_000_000_000));
        assert_eq!(cfg.get_double("d"), Ok(0.25));
        assert_eq!(cfg.keys(), vec!["a", "b", "c", "d"]);
    }
}
