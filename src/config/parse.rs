//! Configuration file parsing and discovery

use crate::config::types::{Configuration, MemoryConfig};
use crate::error::{ConfigError, ConfigResult, Result};
use directories::ProjectDirs;
use serde_yaml::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file names searched in the working directory and its parents
const CONFIG_FILE_NAMES: &[&str] = &["vobla.yml", "vobla.yaml"];

/// File name inside the per-user configuration directory
const USER_CONFIG_FILE: &str = "config.yml";

/// Find the configuration file starting from the current directory
pub fn find_config_file() -> ConfigResult<PathBuf> {
    find_config_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the configuration file starting from a specific directory.
///
/// Walks up to the filesystem root, then falls back to the user config dir.
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = current_dir.join(file_name);
            searched_paths.push(config_path.display().to_string());

            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => break,
        }
    }

    if let Some(user_config) = user_config_file() {
        searched_paths.push(user_config.display().to_string());
        if user_config.is_file() {
            return Ok(user_config);
        }
    }

    Err(ConfigError::NotFound(searched_paths.join(", ")))
}

/// Per-user configuration file path, if the platform has a config dir
pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "vobla").map(|dirs| dirs.config_dir().join(USER_CONFIG_FILE))
}

/// Parse a configuration file from a path
pub fn parse_config_file(path: &Path) -> Result<MemoryConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e))
    })?;

    parse_config(&contents)
}

/// Parse configuration from a YAML string.
///
/// Nested mappings become dotted keys (`log: {verbosity: quiet}` is
/// `log.verbosity`). Scalars are kept as their textual form; sequences are
/// rejected.
pub fn parse_config(yaml: &str) -> Result<MemoryConfig> {
    let mut config = MemoryConfig::new();
    if yaml.trim().is_empty() {
        return Ok(config);
    }

    let value: Value = serde_yaml::from_str(yaml)?;

    match value {
        Value::Null => {}
        Value::Mapping(_) => flatten("", &value, &mut config)?,
        _ => {
            return Err(ConfigError::Invalid("top level must be a mapping".to_string()).into());
        }
    }

    Ok(config)
}

/// Load the explicit file if given, else a discovered one, else nothing
pub fn load_config(explicit: Option<&Path>) -> Result<(MemoryConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((parse_config_file(path)?, Some(path.to_path_buf())));
    }

    match find_config_file() {
        Ok(path) => Ok((parse_config_file(&path)?, Some(path))),
        Err(ConfigError::NotFound(_)) => Ok((MemoryConfig::new(), None)),
        Err(e) => Err(e.into()),
    }
}

fn flatten(prefix: &str, value: &Value, config: &mut MemoryConfig) -> ConfigResult<()> {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let key = scalar_text(key)
                    .ok_or_else(|| ConfigError::Invalid(format!("unsupported key under '{}'", prefix)))?;
                let full_key = if prefix.is_empty() {
                    key
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&full_key, child, config)?;
            }
            Ok(())
        }
        other => {
            let text = scalar_text(other)
                .ok_or_else(|| ConfigError::Invalid(format!("'{}' must be a scalar or a mapping", prefix)))?;
            config.set(prefix, text);
            Ok(())
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoblaError;
    use tempfile::TempDir;

    #[test]
    fn test_parse_flat_config() {
        let yaml = r#"
name: demo
retries: 3
enabled: true
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config.get("name").unwrap(), "demo");
        assert_eq!(config.get_int("retries"), Ok(3));
        assert_eq!(config.get_bool("enabled"), Ok(true));
    }

    #[test]
    fn test_parse_nested_config() {
        let yaml = r#"
log:
  verbosity: quiet
server:
  limits:
    timeout: 2.5
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.get("log.verbosity").unwrap(), "quiet");
        assert_eq!(config.get_double("server.limits.timeout"), Ok(2.5));
    }

    #[test]
    fn test_parse_empty_config() {
        assert!(parse_config("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_sequences() {
        let result = parse_config("items:\n  - a\n  - b\n");
        assert!(matches!(result, Err(VoblaError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_parse_rejects_scalar_document() {
        let result = parse_config("just a string");
        assert!(matches!(result, Err(VoblaError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_config("a: [unclosed");
        assert!(matches!(result, Err(VoblaError::Yaml(_))));
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("vobla.yml");
        fs::write(&config_path, "name: test\n").unwrap();

        let found = find_config_file_from(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("vobla.yaml");
        let sub_dir = temp_dir.path().join("subdir");

        fs::create_dir(&sub_dir).unwrap();
        fs::write(&config_path, "name: test\n").unwrap();

        let found = find_config_file_from(sub_dir).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.yml");
        fs::write(&config_path, "key: value\n").unwrap();

        let (config, path) = load_config(Some(&config_path)).unwrap();
        assert_eq!(config.get("key").unwrap(), "value");
        assert_eq!(path, Some(config_path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_config(Some(&temp_dir.path().join("absent.yml")));
        assert!(matches!(result, Err(VoblaError::Config(ConfigError::Invalid(_)))));
    }
}
