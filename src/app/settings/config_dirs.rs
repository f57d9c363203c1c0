use std::path::PathBuf;

use directories_next::ProjectDirs;

/// File name looked up inside the project config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Per-user configuration directory for this program, if the platform has one.
pub fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fileTree").map(|d| d.config_dir().to_path_buf())
}

/// Default location of the settings file.
pub fn settings_file() -> Option<PathBuf> {
    project_config_dir().map(|d| d.join(SETTINGS_FILE_NAME))
}
