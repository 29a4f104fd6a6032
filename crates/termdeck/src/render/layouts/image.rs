use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use image::ImageError;
use tracing::debug;

/// Resolve an image slide's path and make sure it is a readable picture.
///
/// Relative paths are taken from `base_dir`, the directory of the deck file.
pub fn resolve(content: &str, base_dir: &Path) -> Result<PathBuf> {
    let path = Path::new(content.trim());
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };
    let absolute = std::path::absolute(&joined)
        .with_context(|| format!("Failed to resolve image path {}", joined.display()))?;
    if !std::fs::metadata(&absolute)
        .with_context(|| format!("Failed to read image {}", absolute.display()))?
        .is_file()
    {
        bail!("Image path is not a file: {}", absolute.display());
    }

    // Formats the decoder lacks are left for the terminal to judge
    match image::image_dimensions(&absolute) {
        Ok((width, height)) => {
            debug!(path = %absolute.display(), width, height, "image slide");
        }
        Err(ImageError::Unsupported(e)) => {
            debug!(path = %absolute.display(), "image format not probed: {e}");
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read image {}", absolute.display()));
        }
    }
    Ok(absolute)
}
