//! Static audio assets and uniform random selection.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

use crate::storage::AssetsConfig;

/// Notification sounds and music tracks, resolved against a common root.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
    notification_sounds: Vec<PathBuf>,
    music_tracks: Vec<PathBuf>,
}

impl AssetCatalog {
    pub fn new(
        root: impl Into<PathBuf>,
        notification_sounds: Vec<PathBuf>,
        music_tracks: Vec<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            notification_sounds,
            music_tracks,
        }
    }

    pub fn from_config(config: &AssetsConfig) -> Self {
        Self::new(
            &config.root,
            config.notification_sounds.iter().map(PathBuf::from).collect(),
            config.music_tracks.iter().map(PathBuf::from).collect(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolved notification sound paths.
    pub fn notification_sounds(&self) -> Vec<PathBuf> {
        self.notification_sounds.iter().map(|p| self.resolve(p)).collect()
    }

    /// Resolved music track paths.
    pub fn music_tracks(&self) -> Vec<PathBuf> {
        self.music_tracks.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn pick_notification<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PathBuf> {
        self.notification_sounds.choose(rng).map(|p| self.resolve(p))
    }

    pub fn pick_track<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PathBuf> {
        self.music_tracks.choose(rng).map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::from_config(&AssetsConfig::default())
    }
}

/// RNG for asset picks. Seeded runs repeat the same sequence.
pub fn picker_rng(seed: Option<u64>) -> Mcg128Xsl64 {
    match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    }
}
