//! Asset lookup under the media root
//!
//! Every file the engine loads lives below one media directory. The resolver
//! turns relative asset names into checked absolute paths so that a missing
//! file is reported as an asset problem instead of a generic failure.

pub mod font;

pub use font::LabelFont;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Asset system errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file does not exist under the media root
    #[error("Asset not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The file exists but could not be read or decoded
    #[error("Failed to load asset {}: {reason}", path.display())]
    LoadFailed {
        /// Path of the asset
        path: PathBuf,
        /// Decoder or IO message
        reason: String,
    },
}

/// Resolves asset names relative to the media root
#[derive(Debug, Clone)]
pub struct AssetResolver {
    media_root: PathBuf,
}

impl AssetResolver {
    /// Create a resolver for the given media root
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    /// Media root directory
    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// Resolve an asset name to an existing file path
    pub fn resolve(&self, name: &str) -> Result<PathBuf, AssetError> {
        let path = self.media_root.join(name);
        if path.is_file() {
            log::trace!("Resolved asset '{}' to {:?}", name, path);
            Ok(path)
        } else {
            log::warn!("Asset '{}' not found at {:?}", name, path);
            Err(AssetError::NotFound { path })
        }
    }
}
