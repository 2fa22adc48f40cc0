//! Installer (DMG) window background.
//!
//! Two styles exist. [`BackgroundStyle::Clean`] is the production look: a
//! dark vertical gradient, a soft teal glow where the app icon sits, and a
//! dashed "drag here" arrow. [`BackgroundStyle::Textured`] is the earlier
//! design with a faint diagonal line texture and a solid arrow.
//!
//! The output is always fully opaque RGB. Alpha is only used while layering.

use image::imageops;
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};
use log::debug;
use palette::Srgb;

use crate::canvas::{composite_over, Canvas};
use crate::color::{self, lerp, opaque, translucent};
use crate::error::{AssetError, Result};

/// Where the app icon sits in the clean layout.
const GLOW_CENTER: (f32, f32) = (165.0, 180.0);
/// Largest glow circle; smaller ones step down by [`GLOW_RADIUS_STEP`].
const GLOW_MAX_RADIUS: u32 = 100;
const GLOW_RADIUS_STEP: u32 = 2;
const GLOW_PEAK_ALPHA: f32 = 8.0;
const GLOW_BLUR_SIGMA: f32 = 30.0;

const DASHED_ARROW_Y: f32 = 180.0;
const DASHED_ARROW_START: f32 = 270.0;
const DASHED_ARROW_END: f32 = 390.0;
const DASH_LEN: f32 = 12.0;
const GAP_LEN: f32 = 8.0;
/// Distance from the arrow tip at which the dashes stop.
const DASH_STOP: f32 = 25.0;
const DASHED_HEAD: (f32, f32) = (18.0, 10.0);

const STRIPE_SPACING: usize = 40;
const STRIPE_ALPHA: u8 = 20;
const SOLID_ARROW_ALPHA: u8 = 180;
const SOLID_ARROW_START_RATIO: f32 = 0.35;
const SOLID_ARROW_END_RATIO: f32 = 0.65;
const SOLID_LINE_STOP: f32 = 20.0;
const SOLID_HEAD: (f32, f32) = (25.0, 15.0);

const ARROW_WIDTH: f32 = 3.0;

// ============================================================================
// Configuration
// ============================================================================

/// Which background design to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum BackgroundStyle {
    /// Gradient, icon glow and dashed arrow.
    #[default]
    Clean,
    /// Gradient, diagonal texture and solid arrow.
    Textured,
}

/// Colors and canonical size of a background design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundConfig {
    pub style: BackgroundStyle,
    /// Canonical width for this design.
    pub width: u32,
    /// Canonical height for this design.
    pub height: u32,
    /// Gradient color of the first row.
    pub top: Srgb<u8>,
    /// Gradient color approached by the last row.
    pub bottom: Srgb<u8>,
    /// Glow, texture and arrow color.
    pub accent: Srgb<u8>,
}

impl BackgroundConfig {
    /// The 660x400 production background.
    pub fn clean() -> Self {
        Self {
            style: BackgroundStyle::Clean,
            width: 660,
            height: 400,
            top: color::CLEAN_TOP,
            bottom: color::CLEAN_BOTTOM,
            accent: color::TEAL,
        }
    }

    /// The 600x400 textured background.
    pub fn textured() -> Self {
        Self {
            style: BackgroundStyle::Textured,
            width: 600,
            height: 400,
            top: color::TEXTURED_TOP,
            bottom: color::TEXTURED_BOTTOM,
            accent: color::TEAL,
        }
    }

    pub fn for_style(style: BackgroundStyle) -> Self {
        match style {
            BackgroundStyle::Clean => Self::clean(),
            BackgroundStyle::Textured => Self::textured(),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self::clean()
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders the clean background at the given size.
pub fn render_background(width: u32, height: u32) -> Result<RgbImage> {
    render_background_with(width, height, &BackgroundConfig::clean())
}

/// Renders `config`'s design at the given size.
///
/// The glow and the dashed arrow of the clean style sit at fixed pixel
/// positions; the textured arrow scales with the canvas. The first and last
/// rows only keep the configured gradient colors when the canvas is large
/// enough to clear the glow, about 200 px tall for the clean style. Shorter
/// canvases clip the glow and the arrow at the bottom edge.
pub fn render_background_with(
    width: u32,
    height: u32,
    config: &BackgroundConfig,
) -> Result<RgbImage> {
    if width == 0 || height == 0 {
        return Err(AssetError::InvalidDimensions { width, height });
    }
    debug!("background {:?} {}x{}", config.style, width, height);

    let mut base = vertical_gradient(width, height, config.top, config.bottom);

    let canvas = match config.style {
        BackgroundStyle::Clean => {
            let glow = glow_layer(width, height, config.accent);
            composite_over(&mut base, &glow, 0, 0);
            let mut canvas = Canvas::from_image(&base)?;
            draw_dashed_arrow(&mut canvas, config.accent);
            canvas
        }
        BackgroundStyle::Textured => {
            let mut canvas = Canvas::from_image(&base)?;
            draw_stripes(&mut canvas, config.accent);
            draw_solid_arrow(&mut canvas, config.accent);
            canvas
        }
    };

    Ok(DynamicImage::ImageRgba8(canvas.into_image()).to_rgb8())
}

/// Fills each row with the color `y / height` of the way from `top` to `bottom`.
fn vertical_gradient(width: u32, height: u32, top: Srgb<u8>, bottom: Srgb<u8>) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for (y, row) in image.rows_mut().enumerate() {
        let c = lerp(top, bottom, y as f32 / height as f32);
        for pixel in row {
            *pixel = Rgba([c.red, c.green, c.blue, 255]);
        }
    }
    image
}

/// Builds the blurred glow around the icon position.
///
/// Concentric circles of radius 100, 98, ... 2 are painted largest first,
/// each replacing what is underneath, so a pixel ends up with the alpha of
/// the smallest circle that still contains it.
fn glow_layer(width: u32, height: u32, accent: Srgb<u8>) -> RgbaImage {
    let (cx, cy) = GLOW_CENTER;
    let mut layer = RgbaImage::new(width, height);

    for (x, y, pixel) in layer.enumerate_pixels_mut() {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        if let Some(alpha) = glow_alpha((dx * dx + dy * dy).sqrt()) {
            *pixel = Rgba([accent.red, accent.green, accent.blue, alpha]);
        }
    }

    imageops::blur(&layer, GLOW_BLUR_SIGMA)
}

/// Alpha of the innermost glow circle covering a point `distance` away from
/// the glow center, or `None` outside the largest circle.
fn glow_alpha(distance: f32) -> Option<u8> {
    if distance > GLOW_MAX_RADIUS as f32 {
        return None;
    }
    let steps = (distance / GLOW_RADIUS_STEP as f32).ceil().max(1.0) as u32;
    let radius = (steps * GLOW_RADIUS_STEP).min(GLOW_MAX_RADIUS);
    Some((GLOW_PEAK_ALPHA * (1.0 - radius as f32 / GLOW_MAX_RADIUS as f32)) as u8)
}

fn draw_dashed_arrow(canvas: &mut Canvas, accent: Srgb<u8>) {
    let y = DASHED_ARROW_Y;
    let stop = DASHED_ARROW_END - DASH_STOP;

    let mut x = DASHED_ARROW_START;
    while x < stop {
        let end = (x + DASH_LEN).min(stop);
        canvas.stroke_line((x, y), (end, y), ARROW_WIDTH, opaque(accent));
        x += DASH_LEN + GAP_LEN;
    }

    draw_arrow_head(canvas, DASHED_ARROW_END, y, DASHED_HEAD, opaque(accent));
}

/// Diagonal lines every 40 px, running down and to the right at 45 degrees.
fn draw_stripes(canvas: &mut Canvas, accent: Srgb<u8>) {
    let height = canvas.height() as f32;
    for x in (0..canvas.width()).step_by(STRIPE_SPACING) {
        let x = x as f32;
        canvas.stroke_line(
            (x, 0.0),
            (x + height, height),
            1.0,
            translucent(accent, STRIPE_ALPHA),
        );
    }
}

fn draw_solid_arrow(canvas: &mut Canvas, accent: Srgb<u8>) {
    let width = canvas.width() as f32;
    let y = (canvas.height() / 2) as f32;
    let start = width * SOLID_ARROW_START_RATIO;
    let end = width * SOLID_ARROW_END_RATIO;
    let color = translucent(accent, SOLID_ARROW_ALPHA);

    canvas.stroke_line((start, y), (end - SOLID_LINE_STOP, y), ARROW_WIDTH, color);
    draw_arrow_head(canvas, end, y, SOLID_HEAD, color);
}

/// Right-pointing triangle with its tip at `(tip_x, y)`.
fn draw_arrow_head(
    canvas: &mut Canvas,
    tip_x: f32,
    y: f32,
    (length, half_height): (f32, f32),
    color: palette::Srgba<u8>,
) {
    canvas.fill_polygon(
        &[
            (tip_x, y),
            (tip_x - length, y - half_height),
            (tip_x - length, y + half_height),
        ],
        color,
    );
}

// ============================================================================
// Tests
// ============================================================================
