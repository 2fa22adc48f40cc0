//! The macOS app icon set: which renditions exist and their rendered images.

use image::RgbaImage;

use crate::error::Result;
use crate::icon::{render_icon_with, IconStyle};

/// One rendition of the app icon.
///
/// `points` is the logical size the system asks for and `scale` the display
/// scale factor, so a `16 pt @2x` entry is drawn at 32 pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    /// Pixel width and height of the rendered image.
    pub pixels: u32,
    /// File name inside the icon set directory.
    pub filename: &'static str,
    pub points: u32,
    pub scale: u32,
}

impl IconSpec {
    const fn new(points: u32, scale: u32, filename: &'static str) -> Self {
        Self {
            pixels: points * scale,
            filename,
            points,
            scale,
        }
    }

    /// Logical size as written in the manifest, e.g. `"16x16"`.
    pub fn size_label(&self) -> String {
        format!("{0}x{0}", self.points)
    }

    /// Scale as written in the manifest, e.g. `"2x"`.
    pub fn scale_label(&self) -> String {
        format!("{}x", self.scale)
    }
}

/// The ten renditions a macOS `AppIcon.appiconset` needs.
pub const MAC_ICON_SET: [IconSpec; 10] = [
    IconSpec::new(16, 1, "icon_16x16.png"),
    IconSpec::new(16, 2, "icon_16x16@2x.png"),
    IconSpec::new(32, 1, "icon_32x32.png"),
    IconSpec::new(32, 2, "icon_32x32@2x.png"),
    IconSpec::new(128, 1, "icon_128x128.png"),
    IconSpec::new(128, 2, "icon_128x128@2x.png"),
    IconSpec::new(256, 1, "icon_256x256.png"),
    IconSpec::new(256, 2, "icon_256x256@2x.png"),
    IconSpec::new(512, 1, "icon_512x512.png"),
    IconSpec::new(512, 2, "icon_512x512@2x.png"),
];

/// A rendered icon together with the rendition it was drawn for.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    pub spec: IconSpec,
    pub data: RgbaImage,
}

impl IconImage {
    /// Logical size of the icon (pixels / scale).
    ///
    /// For a 64x64 @2x icon, the logical size is 32.
    pub fn logical_size(&self) -> u32 {
        self.data.width() / self.spec.scale
    }
}

/// Every rendition of the icon, in manifest order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconSet {
    pub images: Vec<IconImage>,
}

impl IconSet {
    /// Renders one image per spec.
    ///
    /// Stops at the first spec that fails to render.
    pub fn render(specs: &[IconSpec], style: &IconStyle) -> Result<Self> {
        let images = specs
            .iter()
            .map(|&spec| {
                Ok(IconImage {
                    spec,
                    data: render_icon_with(spec.pixels, style)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconImage> {
        self.images.iter()
    }
}

impl<'a> IntoIterator for &'a IconSet {
    type Item = &'a IconImage;
    type IntoIter = std::slice::Iter<'a, IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
