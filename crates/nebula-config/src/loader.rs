//! Locating, reading and writing `config.toml`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::schema::Config;

const CONFIG_FILE: &str = "config.toml";

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "nebula").ok_or(ConfigError::NoConfigDir)
}

/// Platform config file path, e.g. `~/.config/nebula/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// Directory the log file is written to.
pub fn log_dir() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Load config from `path`.
///
/// Missing fields take their defaults. A file that parses but fails
/// validation is logged and replaced by the default config.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content)?;

    if let Err(e) = config.validate() {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(Config::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform path, writing a default file on first run.
pub fn load_default() -> Result<Config, ConfigError> {
    let path = default_config_path()?;
    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        let config = Config::default();
        save(&path, &config)?;
        return Ok(config);
    }
    load_from_path(&path)
}

/// Validate and write `config` to `path`, creating parent directories.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    config.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_core::ColorTheme;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("nebula-config-{}-{name}", std::process::id()))
            .join(CONFIG_FILE)
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("save");
        let mut config = Config::default();
        config.theme = ColorTheme::Pink;
        config.cycle.words = vec!["bold".into(), "bright".into()];
        save(&path, &config).unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let path = scratch("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[cycle]\nwords = []\n").unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded, Config::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = scratch("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "theme = = \"violet\"").unwrap();

        assert!(matches!(load_from_path(&path), Err(ConfigError::Parse(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = scratch("missing");
        assert!(matches!(load_from_path(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let path = scratch("reject");
        let mut config = Config::default();
        config.cycle.interval_ms = 0;
        assert!(matches!(save(&path, &config), Err(ConfigError::Invalid(_))));
        assert!(!path.exists());
    }
}
