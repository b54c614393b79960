//! Locating and reading the `sxplot` TOML file.
//!
//! The file holds the same settings as the command line: the directory to
//! scan, the selections and the figure options. See [`AppConfig`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use sxplot::{SxplotError, config::AppConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Configuration file does not exist: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for SxplotError {
    fn from(err: ConfigError) -> Self {
        SxplotError::Config(err.to_string())
    }
}

/// Reads the first configuration file found, or the defaults.
///
/// An `--config` path must exist. Without one, `sxplot/config.toml` under
/// the working directory is tried, then `config.toml` in the user's
/// configuration directory (e.g. `~/.config/sxplot` on Linux).
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, SxplotError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:? = path; "Reading configuration given on the command line");
        return load_config_file(path);
    }

    let local_config = Path::new("sxplot/config.toml");
    if local_config.exists() {
        info!(path:? = local_config; "Reading configuration from working directory");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "sxplot", "sxplot") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:? = system_config; "Reading user configuration");
            return load_config_file(&system_config);
        }

        debug!(path:? = system_config; "No user configuration");
    } else {
        debug!("No home directory, skipping user configuration");
    }

    debug!("Using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, SxplotError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}
