//! Service configuration.
//!
//! Values come from the environment (optionally via a `.env` file loaded by
//! the binary) and may be overridden by CLI flags. The dataset path is
//! resolved to an absolute path once, at startup.
//!
//! | Variable                | Default                       |
//! |-------------------------|-------------------------------|
//! | `COL_DATASET_PATH`      | `data/cost-of-living_v2.csv`  |
//! | `COL_DATA_ROOT`         | current directory at startup  |
//! | `COL_PORT` / `PORT`     | `8000`                        |
//! | `COL_DEFAULT_LANGUAGE`  | `en`                          |

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::labels::Language;

pub const DEFAULT_DATASET_PATH: &str = "data/cost-of-living_v2.csv";
pub const DEFAULT_PORT: u16 = 8000;

/// Resolved configuration handed to the service at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Absolute path of the CSV file.
    pub dataset_path: PathBuf,
    pub port: u16,
    /// Language used when a request omits `language`.
    pub default_language: Language,
}

impl ServiceConfig {
    /// Build from environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = match lookup("COL_DATA_ROOT") {
            Some(root) => PathBuf::from(root),
            None => env::current_dir()?,
        };
        let dataset = lookup("COL_DATASET_PATH").unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string());

        let port = match lookup("COL_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                var: "COL_PORT".into(),
                message: format!("'{}' is not a port number: {}", raw, e),
            })?,
            None => DEFAULT_PORT,
        };

        let default_language = match lookup("COL_DEFAULT_LANGUAGE") {
            Some(raw) => raw.parse::<Language>().map_err(|_| ConfigError::InvalidVar {
                var: "COL_DEFAULT_LANGUAGE".into(),
                message: format!("'{}' is not one of: en, de", raw),
            })?,
            None => Language::default(),
        };

        Ok(Self {
            dataset_path: resolve(&root, dataset),
            port,
            default_language,
        })
    }

    /// Replace the dataset path, resolving it against the current directory.
    pub fn with_dataset(mut self, path: impl AsRef<Path>) -> ConfigResult<Self> {
        let root = env::current_dir()?;
        self.dataset_path = resolve(&root, path);
        Ok(self)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

fn resolve(root: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[("COL_DATA_ROOT", "/srv/col")])).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("/srv/col/data/cost-of-living_v2.csv"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.default_language, Language::En);
    }

    #[test]
    fn test_absolute_dataset_path_ignores_root() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("COL_DATA_ROOT", "/srv/col"),
            ("COL_DATASET_PATH", "/data/col.csv"),
        ]))
        .unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("/data/col.csv"));
    }

    #[test]
    fn test_port_and_language_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("COL_DATA_ROOT", "/srv"),
            ("PORT", "9090"),
            ("COL_DEFAULT_LANGUAGE", "de"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.default_language, Language::De);

        let config = ServiceConfig::from_lookup(lookup(&[
            ("COL_DATA_ROOT", "/srv"),
            ("PORT", "9090"),
            ("COL_PORT", "7070"),
        ]))
        .unwrap();
        assert_eq!(config.port, 7070);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ServiceConfig::from_lookup(lookup(&[("COL_DATA_ROOT", "/srv"), ("COL_PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("COL_PORT"));

        let err = ServiceConfig::from_lookup(lookup(&[
            ("COL_DATA_ROOT", "/srv"),
            ("COL_DEFAULT_LANGUAGE", "fr"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("COL_DEFAULT_LANGUAGE"));
    }
}
