// src/core/config_loader.rs

use directories::BaseDirs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "battery-bridge";

const DEFAULT_FILE: &str = "default.toml";
const USER_FILE: &str = "config.toml";

// Where the two config layers live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub system: PathBuf,
    pub user: PathBuf,
}

impl ConfigPaths {
    pub fn discover() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));
        let config_dir = BaseDirs::new().map(|d| d.config_dir().to_path_buf());

        ConfigPaths {
            system: system_default(exe_dir.as_deref(), Path::new(env!("CARGO_MANIFEST_DIR"))),
            user: user_config(config_dir.as_deref()),
        }
    }
}

// `default.toml` beside the binary, else the crate's `config/` during development
fn system_default(exe_dir: Option<&Path>, manifest_dir: &Path) -> PathBuf {
    let installed = exe_dir.unwrap_or(Path::new(".")).join(DEFAULT_FILE);
    if installed.exists() {
        return installed;
    }
    let dev = manifest_dir.join("config").join(DEFAULT_FILE);
    if dev.exists() { dev } else { installed }
}

// $XDG_CONFIG_HOME/battery-bridge/config.toml, or ./battery-bridge/config.toml without a home
fn user_config(config_dir: Option<&Path>) -> PathBuf {
    config_dir
        .unwrap_or(Path::new("."))
        .join(APP_NAME)
        .join(USER_FILE)
}
