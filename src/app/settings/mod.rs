pub mod config_dirs;
pub mod read_settings;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fs_op::detection::DEFAULT_PROBE_BYTES;

// Re-export commonly used types/functions for convenience
pub use config_dirs::{project_config_dir, settings_file};
pub use read_settings::{load_settings, load_settings_from, SettingsError};

/// User-tunable options, read from `settings.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory served as the root of every listing.
    pub base_dir: PathBuf,
    /// Upper bound on bytes read when sniffing a file's content type.
    pub content_probe_bytes: usize,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_dir: PathBuf::from("/"),
            content_probe_bytes: DEFAULT_PROBE_BYTES,
            log_filter: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
