// Configuration loading (config.toml). The file is optional; every field has
// a default so the app starts against the standard dataset layout.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

/// Application configuration.
///
/// `deliveries_path` may point at a plain CSV or at a zip archive containing
/// one; `matches_path` is optional metadata (season/venue/winner) joined
/// against the deliveries when present.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub deliveries_path: PathBuf,
    pub matches_path: Option<PathBuf>,
    /// Window (in matches) for the batting form rolling average.
    pub rolling_window: usize,
    /// Minimum distinct matches before a player appears in rate-based
    /// rankings (economy, strike rate).
    pub min_qualifying_matches: usize,
    /// Number of rows shown in record listings.
    pub record_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deliveries_path: PathBuf::from("data/deliveries.csv.zip"),
            matches_path: Some(PathBuf::from("data/matches.csv")),
            rolling_window: 5,
            min_qualifying_matches: 5,
            record_limit: 10,
        }
    }
}

impl Config {
    /// Load configuration from `path`. A missing file yields the defaults;
    /// an unreadable or invalid file is an error.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            validate(&config)?;
            return Ok(config);
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.rolling_window == 0 {
        return Err(ConfigError::ValidationError {
            field: "rolling_window".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.min_qualifying_matches == 0 {
        return Err(ConfigError::ValidationError {
            field: "min_qualifying_matches".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.record_limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "record_limit".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.rolling_window, 5);
        assert_eq!(config.min_qualifying_matches, 5);
        assert_eq!(config.record_limit, 10);
        assert_eq!(
            config.deliveries_path,
            PathBuf::from("data/deliveries.csv.zip")
        );
    }

    #[test]
    fn loads_partial_file_with_defaults_for_the_rest() {
        let tmp = std::env::temp_dir().join("crickview_config_partial");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let path = tmp.join("config.toml");
        fs::write(
            &path,
            "deliveries_path = \"fixtures/deliveries.csv\"\nrecord_limit = 25\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.deliveries_path, PathBuf::from("fixtures/deliveries.csv"));
        assert_eq!(config.record_limit, 25);
        assert_eq!(config.rolling_window, 5);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_rolling_window() {
        let tmp = std::env::temp_dir().join("crickview_config_zero_window");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let path = tmp.join("config.toml");
        fs::write(&path, "rolling_window = 0\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "rolling_window");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = std::env::temp_dir().join("crickview_config_invalid");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let path = tmp.join("config.toml");
        fs::write(&path, "this is not valid [[[ toml").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_fields() {
        let tmp = std::env::temp_dir().join("crickview_config_unknown");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let path = tmp.join("config.toml");
        fs::write(&path, "rollling_window = 5\n").unwrap();

        assert!(matches!(
            Config::load(&path).unwrap_err(),
            ConfigError::ParseError { .. }
        ));

        let _ = fs::remove_dir_all(&tmp);
    }
}
