use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use face_ui::{AssetId, AssetSource};
use log::{info, warn};

/// Artwork read from a directory of BMP files.
///
/// Absent files are kept as gaps so the face itself reports which asset is
/// missing.
pub struct DirAssets {
    files: Vec<Option<Vec<u8>>>,
}

pub fn file_name(id: AssetId) -> String {
    match id {
        AssetId::InteractiveBackground => "background_interactive.bmp".to_string(),
        AssetId::AmbientBackground => "background_ambient.bmp".to_string(),
        AssetId::Overlay(index) => format!("overlay_{:02}.bmp", index),
    }
}

impl DirAssets {
    pub fn load(dir: &Path) -> Result<Self> {
        let mut files = Vec::new();
        for id in AssetId::all() {
            let path = dir.join(file_name(id));
            match fs::read(&path) {
                Ok(bytes) => files.push(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!("{} not found", path.display());
                    files.push(None);
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("reading {}", path.display()));
                }
            }
        }
        info!("read artwork from {}", dir.display());
        Ok(Self { files })
    }
}

impl AssetSource for DirAssets {
    fn asset(&self, id: AssetId) -> Option<&[u8]> {
        self.files.get(id.ordinal())?.as_deref()
    }
}
