//! Badge Assets
//!
//! Nutrition badge images decoded once per (family, kind) and shared by every
//! graphic through `Arc`. Each image is resized to a fixed footprint at load.

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::catalog::{BadgeKind, ProductFamily};

/// Badge footprint after load
pub const BADGE_WIDTH: u32 = 672;
pub const BADGE_HEIGHT: u32 = 198;

/// Errors raised while loading badge images
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("badge asset not found: {0:?}")]
    Missing(PathBuf),
    #[error("failed to decode badge asset {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded, resized badge image
#[derive(Debug)]
pub struct Badge {
    pub family: ProductFamily,
    pub kind: BadgeKind,
    pub image: RgbaImage,
}

/// The four badges of one product family, in stacking order
#[derive(Debug, Clone)]
pub struct BadgeSet {
    badges: [Arc<Badge>; 4],
}

impl BadgeSet {
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Badge>> {
        self.badges.iter()
    }

    pub fn get(&self, kind: BadgeKind) -> &Arc<Badge> {
        &self.badges[kind as usize]
    }
}

/// Memoized badge loader keyed by (family, kind)
pub struct BadgeCache {
    dir: PathBuf,
    size: (u32, u32),
    loaded: Mutex<HashMap<(ProductFamily, BadgeKind), Arc<Badge>>>,
}

impl BadgeCache {
    /// Create a cache reading `<kind>_<family>.png` files from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_size(dir, (BADGE_WIDTH, BADGE_HEIGHT))
    }

    /// Create a cache with a custom badge footprint
    pub fn with_size(dir: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            dir: dir.into(),
            size,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Directory badges are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the asset file for a badge
    pub fn asset_path(&self, family: ProductFamily, kind: BadgeKind) -> PathBuf {
        self.dir
            .join(format!("{}_{}.png", kind.asset_stem(), family.asset_suffix()))
    }

    /// Number of badges decoded so far
    pub fn len(&self) -> usize {
        self.loaded.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register an already decoded image, resized to the badge footprint
    pub fn insert_image(
        &self,
        family: ProductFamily,
        kind: BadgeKind,
        image: DynamicImage,
    ) -> Arc<Badge> {
        let badge = Arc::new(self.prepare(family, kind, image));
        self.loaded.lock().insert((family, kind), badge.clone());
        badge
    }

    /// Get a badge, decoding it from disk on first use
    pub fn get(&self, family: ProductFamily, kind: BadgeKind) -> Result<Arc<Badge>, AssetError> {
        let mut loaded = self.loaded.lock();
        if let Some(badge) = loaded.get(&(family, kind)) {
            return Ok(badge.clone());
        }

        let path = self.asset_path(family, kind);
        if !path.exists() {
            return Err(AssetError::Missing(path));
        }

        debug!("Decoding badge {:?}", path);
        let image = image::open(&path).map_err(|source| AssetError::Decode {
            path: path.clone(),
            source,
        })?;

        let badge = Arc::new(self.prepare(family, kind, image));
        loaded.insert((family, kind), badge.clone());
        Ok(badge)
    }

    /// Get all four badges of a family
    pub fn badge_set(&self, family: ProductFamily) -> Result<BadgeSet, AssetError> {
        Ok(BadgeSet {
            badges: [
                self.get(family, BadgeKind::SaturatedFat)?,
                self.get(family, BadgeKind::Sodium)?,
                self.get(family, BadgeKind::Calories)?,
                self.get(family, BadgeKind::Sugars)?,
            ],
        })
    }

    /// Decode every badge up front
    pub fn preload(&self) -> Result<(), AssetError> {
        for family in ProductFamily::ALL {
            self.badge_set(family)?;
        }
        info!("Loaded {} badge images from {:?}", self.len(), self.dir);
        Ok(())
    }

    fn prepare(&self, family: ProductFamily, kind: BadgeKind, image: DynamicImage) -> Badge {
        let (width, height) = self.size;
        let image = image::imageops::resize(&image.to_rgba8(), width, height, FilterType::Triangle);
        Badge { family, kind, image }
    }
}
