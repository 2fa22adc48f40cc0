//! pomo-assets: Procedural artwork for the Pomo macOS app
//!
//! This crate draws the tomato-timer app icon at every size an Xcode icon
//! set needs, writes the matching `Contents.json`, and paints the DMG
//! installer background. Everything is computed from a handful of color
//! constants and size ratios, so repeated runs give the same output.
//!
//! # Example
//!
//! ```
//! use pomo_assets::{render_icon, Manifest, MAC_ICON_SET};
//!
//! let icon = render_icon(64)?;
//! assert_eq!(icon.dimensions(), (64, 64));
//!
//! let json = Manifest::for_icon_set(&MAC_ICON_SET).to_xcode_json()?;
//! assert!(json.starts_with(b"{\n  \"images\" : ["));
//! # Ok::<(), pomo_assets::AssetError>(())
//! ```
//!
//! # Writing Assets
//!
//! [`AssetPipeline`] renders everything and lays it out under a project
//! root:
//!
//! ```no_run
//! use pomo_assets::{AssetPipeline, BackgroundConfig, PipelineConfig};
//!
//! let config = PipelineConfig::new(".").with_background(BackgroundConfig::textured());
//! let report = AssetPipeline::new(config).run()?;
//! println!("wrote {} files", report.len());
//! # Ok::<(), pomo_assets::AssetError>(())
//! ```

mod background;
mod canvas;
pub mod color;
mod error;
mod icon;
mod iconset;
mod manifest;
mod pipeline;

pub use background::{render_background, render_background_with, BackgroundConfig, BackgroundStyle};
pub use canvas::{composite_over, Bounds, Canvas};
pub use error::{AssetError, Result};
pub use icon::{render_icon, render_icon_with, IconGeometry, IconStyle};
pub use iconset::{IconImage, IconSet, IconSpec, MAC_ICON_SET};
pub use manifest::{Manifest, ManifestImage, ManifestInfo, MANIFEST_FILENAME};
pub use pipeline::{
    Artifact, ArtifactKind, AssetPipeline, OutputLayout, PipelineConfig, PipelineReport,
    README_ICON_SIZE,
};
