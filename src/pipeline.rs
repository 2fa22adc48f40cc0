//! Renders every asset and writes it to disk.
//!
//! [`AssetPipeline`] is strictly sequential and fail-fast: the first error
//! aborts the run and whatever was already written stays on disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::{EncodableLayout, ImageBuffer, ImageFormat, PixelWithColorType};
use log::{debug, info};

use crate::background::{render_background_with, BackgroundConfig};
use crate::error::{AssetError, Result};
use crate::icon::{render_icon_with, IconStyle};
use crate::iconset::{IconSet, IconSpec, MAC_ICON_SET};
use crate::manifest::{Manifest, MANIFEST_FILENAME};

/// Size of the standalone icon copy used in documentation.
pub const README_ICON_SIZE: u32 = 512;

// ============================================================================
// OutputLayout
// ============================================================================

/// Where each artifact lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// The Xcode `AppIcon.appiconset` directory.
    pub iconset_dir: PathBuf,
    /// Flat directory for documentation images.
    pub assets_dir: PathBuf,
    /// Build output directory picked up by the DMG packaging step.
    pub build_dir: PathBuf,
}

impl OutputLayout {
    /// The project layout under `root`.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            iconset_dir: root
                .join("Pomo")
                .join("Assets.xcassets")
                .join("AppIcon.appiconset"),
            assets_dir: root.join("assets"),
            build_dir: root.join("build"),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.iconset_dir.join(MANIFEST_FILENAME)
    }

    pub fn readme_icon_path(&self) -> PathBuf {
        self.assets_dir.join("icon.png")
    }

    pub fn background_path(&self) -> PathBuf {
        self.build_dir.join("dmg_background.png")
    }

    fn dirs(&self) -> [&Path; 3] {
        [&self.iconset_dir, &self.assets_dir, &self.build_dir]
    }
}

// ============================================================================
// PipelineConfig
// ============================================================================

/// Everything a pipeline run needs. All fields are plain values.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub layout: OutputLayout,
    pub icon_set: Vec<IconSpec>,
    pub icon_style: IconStyle,
    pub background: BackgroundConfig,
}

impl PipelineConfig {
    /// The standard asset set written under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            layout: OutputLayout::from_root(root),
            icon_set: MAC_ICON_SET.to_vec(),
            icon_style: IconStyle::default(),
            background: BackgroundConfig::default(),
        }
    }

    /// Replaces the background design.
    pub fn with_background(mut self, background: BackgroundConfig) -> Self {
        self.background = background;
        self
    }
}

// ============================================================================
// Artifacts
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// One icon set rendition.
    Icon,
    /// The documentation icon copy.
    ReadmeIcon,
    Background,
    Manifest,
}

/// A file the pipeline wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    /// Pixel size, for images.
    pub dimensions: Option<(u32, u32)>,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy());
        write!(f, "{name}")?;
        if let Some((w, h)) = self.dimensions {
            write!(f, " ({w}x{h})")?;
        }
        Ok(())
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub artifacts: Vec<Artifact>,
}

impl PipelineReport {
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Number of artifacts of one kind.
    pub fn count(&self, kind: ArtifactKind) -> usize {
        self.artifacts.iter().filter(|a| a.kind == kind).count()
    }
}

// ============================================================================
// AssetPipeline
// ============================================================================

pub struct AssetPipeline {
    config: PipelineConfig,
}

impl AssetPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Writes every asset.
    pub fn run(&self) -> Result<PipelineReport> {
        self.run_with_progress(|_| {})
    }

    /// Writes every asset, calling `on_artifact` after each file lands.
    ///
    /// Order: icon set renditions, documentation icon, background, manifest.
    pub fn run_with_progress<F>(&self, mut on_artifact: F) -> Result<PipelineReport>
    where
        F: FnMut(&Artifact),
    {
        check_encoder()?;

        let layout = &self.config.layout;
        for dir in layout.dirs() {
            create_dir(dir)?;
        }

        let mut report = PipelineReport::default();
        let mut record = |artifact: Artifact| {
            info!("wrote {}", artifact.path.display());
            on_artifact(&artifact);
            report.artifacts.push(artifact);
        };

        let icons = IconSet::render(&self.config.icon_set, &self.config.icon_style)?;
        for icon in &icons {
            let path = layout.iconset_dir.join(icon.spec.filename);
            save_png(&icon.data, &path)?;
            record(Artifact {
                kind: ArtifactKind::Icon,
                path,
                dimensions: Some(icon.data.dimensions()),
            });
        }

        let readme = render_icon_with(README_ICON_SIZE, &self.config.icon_style)?;
        let path = layout.readme_icon_path();
        save_png(&readme, &path)?;
        record(Artifact {
            kind: ArtifactKind::ReadmeIcon,
            path,
            dimensions: Some(readme.dimensions()),
        });

        let bg = &self.config.background;
        let background = render_background_with(bg.width, bg.height, bg)?;
        let path = layout.background_path();
        save_png(&background, &path)?;
        record(Artifact {
            kind: ArtifactKind::Background,
            path,
            dimensions: Some(background.dimensions()),
        });

        let path = layout.manifest_path();
        write_manifest(&Manifest::for_icon_set(&self.config.icon_set), &path)?;
        record(Artifact {
            kind: ArtifactKind::Manifest,
            path,
            dimensions: None,
        });

        Ok(report)
    }
}

/// Fails fast when PNG encoding was compiled out of `image`.
fn check_encoder() -> Result<()> {
    if ImageFormat::Png.writing_enabled() {
        Ok(())
    } else {
        Err(AssetError::EncoderUnavailable)
    }
}

fn create_dir(path: &Path) -> Result<()> {
    debug!("ensuring directory {}", path.display());
    fs::create_dir_all(path).map_err(|source| AssetError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn save_png<P>(image: &ImageBuffer<P, Vec<P::Subpixel>>, path: &Path) -> Result<()>
where
    P: PixelWithColorType,
    [P::Subpixel]: EncodableLayout,
{
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| AssetError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let bytes = manifest.to_xcode_json()?;
    fs::write(path, bytes).map_err(|source| AssetError::WriteManifest {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Tests
// ============================================================================
