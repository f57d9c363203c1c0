use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{config_dirs, Settings};

/// Errors produced while loading settings from disk.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot read settings file `{}`: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file `{}`: {}", path.display(), source)]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load settings from an explicit file. The file must exist.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Settings::from_toml(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings from the per-user config directory.
///
/// A missing file (or a platform without a config directory) yields the
/// defaults; a file that exists but cannot be read or parsed is an error.
pub fn load_settings() -> Result<Settings, SettingsError> {
    match config_dirs::settings_file() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "loading settings");
            load_settings_from(&path)
        }
        _ => Ok(Settings::default()),
    }
}
