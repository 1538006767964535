//! Asset manifest loading
//!
//! Assets are looked up by logical name and loaded as raw bytes; decoding is
//! left to the renderer and audio backend. Images and fonts are required,
//! sounds are optional.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing required asset '{name}' at {}", path.display())]
    Missing { name: &'static str, path: PathBuf },
    #[error("failed to read asset '{name}': {source}")]
    Io {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Font,
    Sound,
}

/// One manifest entry
#[derive(Debug, Clone, Copy)]
pub struct AssetSpec {
    pub name: &'static str,
    /// Path relative to the asset directory
    pub path: &'static str,
    pub kind: AssetKind,
}

impl AssetSpec {
    pub fn required(&self) -> bool {
        self.kind != AssetKind::Sound
    }
}

pub const MANIFEST: &[AssetSpec] = &[
    AssetSpec {
        name: "player",
        path: "images/dopaman.png",
        kind: AssetKind::Image,
    },
    AssetSpec {
        name: "helper",
        path: "images/mjf.jpeg",
        kind: AssetKind::Image,
    },
    AssetSpec {
        name: "hazard",
        path: "images/enemy.png",
        kind: AssetKind::Image,
    },
    AssetSpec {
        name: "retro_font",
        path: "fonts/PressStart2P.ttf",
        kind: AssetKind::Font,
    },
    AssetSpec {
        name: "collect",
        path: "sounds/collect_sound.mp3",
        kind: AssetKind::Sound,
    },
    AssetSpec {
        name: "game_over",
        path: "sounds/game_over.mp3",
        kind: AssetKind::Sound,
    },
    AssetSpec {
        name: "music",
        path: "sounds/background_music.mp3",
        kind: AssetKind::Sound,
    },
];

/// Loaded asset bytes by logical name
#[derive(Debug, Clone, Default)]
pub struct Assets {
    entries: HashMap<&'static str, Vec<u8>>,
}

impl Assets {
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn insert(&mut self, name: &'static str, bytes: Vec<u8>) {
        self.entries.insert(name, bytes);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load everything in `manifest` from `dir`.
///
/// A missing required asset is an error; a missing optional one is logged
/// and skipped.
pub fn load_manifest(dir: &Path, manifest: &[AssetSpec]) -> Result<Assets, AssetError> {
    let mut assets = Assets::default();
    for spec in manifest {
        let path = dir.join(spec.path);
        match fs::read(&path) {
            Ok(bytes) => {
                log::debug!("Loaded {} ({} bytes)", spec.name, bytes.len());
                assets.insert(spec.name, bytes);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if spec.required() {
                    return Err(AssetError::Missing {
                        name: spec.name,
                        path,
                    });
                }
                log::warn!("Sound '{}' not found at {}, disabled", spec.name, path.display());
            }
            Err(source) => {
                if spec.required() {
                    return Err(AssetError::Io {
                        name: spec.name,
                        source,
                    });
                }
                log::warn!("Sound '{}' unreadable ({}), disabled", spec.name, source);
            }
        }
    }
    log::info!("Loaded {} assets from {}", assets.len(), dir.display());
    Ok(assets)
}

/// Load the game's assets from `dir`
pub fn load_assets(dir: &Path) -> Result<Assets, AssetError> {
    load_manifest(dir, MANIFEST)
}
