//! Label font loading
//!
//! The label font is a bitmap sheet. Only its header is decoded; glyph
//! rasterisation belongs to the window backend.

use std::path::{Path, PathBuf};

use crate::assets::AssetError;

/// File name of the label font under the media root
pub const LABEL_FONT_FILE: &str = "fontlucida.png";

/// Loaded label font sheet
#[derive(Debug, Clone)]
pub struct LabelFont {
    /// Where the font was loaded from
    pub path: PathBuf,
    /// Sheet width in pixels
    pub width: u32,
    /// Sheet height in pixels
    pub height: u32,
}

impl LabelFont {
    /// Read the font sheet header from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        log::debug!("Loading label font from: {:?}", path);

        let (width, height) = image::image_dimensions(path).map_err(|e| AssetError::LoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        log::info!("Loaded label font {}x{} from {:?}", width, height, path);
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
        })
    }
}
