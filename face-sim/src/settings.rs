use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use face_ui::FaceConfig;
use log::info;

/// Path of an optional TOML file overriding the face defaults
pub const CONFIG_VAR: &str = "WATCHFACE_CONFIG";

/// Directory holding the artwork; placeholder art is generated when unset
pub const ASSETS_VAR: &str = "WATCHFACE_ASSETS";

pub fn load_config() -> Result<FaceConfig> {
    let Some(path) = env::var_os(CONFIG_VAR).map(PathBuf::from) else {
        return Ok(FaceConfig::default());
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: FaceConfig =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

pub fn assets_dir() -> Option<PathBuf> {
    env::var_os(ASSETS_VAR).map(PathBuf::from)
}
