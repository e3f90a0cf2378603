use crate::moment::CaptureMoment;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub dry_run_default: bool,
    /// Canonical date-time, e.g. `2010-01-01 00.00.00`.
    pub earliest_valid: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            dry_run_default: true,
            earliest_valid: None,
        }
    }
}

impl AppConfig {
    pub fn earliest_valid_moment(&self) -> Option<CaptureMoment> {
        self.earliest_valid.as_deref().and_then(CaptureMoment::parse)
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("org", "hawrylak", "iphone-rename")
        .context("cannot resolve the OS configuration directory")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    load_config_from(&paths.config_path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file: {}", path.display()))?;

    let config = toml::from_str::<AppConfig>(&raw)
        .with_context(|| format!("cannot parse config file: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{load_config_from, AppConfig};
    use crate::moment::moment;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().expect("tempdir");
        let config = load_config_from(&temp.path().join("config.toml")).expect("load");
        assert_eq!(config, AppConfig::default());
        assert!(config.dry_run_default);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "earliest_valid = \"2010-01-01 00.00.00\"\n").expect("write");

        let config = load_config_from(&path).expect("load");
        assert!(config.dry_run_default);
        assert_eq!(
            config.earliest_valid_moment(),
            Some(moment(2010, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn invalid_file_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "dry_run_default = \"maybe\"\n").expect("write");

        let err = load_config_from(&path).expect_err("wrong type");
        assert!(format!("{err:#}").contains("cannot parse config file"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AppConfig {
            log_level: "debug".to_string(),
            dry_run_default: false,
            earliest_valid: Some("2015-06-01 00.00.00".to_string()),
        };
        let body = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&body).expect("parse");
        assert_eq!(parsed, config);
    }
}
