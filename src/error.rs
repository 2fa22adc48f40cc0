//! Error type shared by the renderers and the asset pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while drawing or writing assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Icons must be at least one pixel wide.
    #[error("icon size must be positive, got {0}")]
    InvalidSize(u32),

    /// Backgrounds must have a non-zero width and height.
    #[error("background dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The rasterizer refused to allocate a surface of this size.
    #[error("failed to allocate a {width}x{height} canvas")]
    PixmapAllocation { width: u32, height: u32 },

    /// The `image` crate was built without PNG encoding support.
    #[error("PNG encoding support is not available in this build")]
    EncoderUnavailable,

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write manifest {}", path.display())]
    WriteManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize manifest")]
    SerializeManifest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AssetError>;
