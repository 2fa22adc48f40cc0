//! The app icon: a teal tomato with a stem and a timer progress ring.
//!
//! Every measurement is a fixed fraction of the icon size, so a 16 px and a
//! 1024 px render share the same proportions. [`IconGeometry`] holds the
//! derived layout; [`render_icon_with`] paints it in layer order:
//!
//! 1. Drop shadow (three offset ellipses)
//! 2. Body
//! 3. Specular highlight
//! 4. Stem
//! 5. Progress track, progress arc and end dot

use image::RgbaImage;
use log::debug;
use palette::Srgb;

use crate::canvas::{Bounds, Canvas};
use crate::color::{self, opaque, translucent};
use crate::error::{AssetError, Result};

const PADDING_RATIO: f32 = 0.08;
const SHADOW_STEP_RATIO: f32 = 0.01;
const SHADOW_ALPHAS: [u8; 3] = [30, 40, 50];
const HIGHLIGHT_RATIO: f32 = 0.3;
const HIGHLIGHT_ALPHA: u8 = 100;
const STEM_WIDTH_RATIO: f32 = 0.08;
const STEM_HEIGHT_RATIO: f32 = 0.12;
const ARC_PADDING_RATIO: f32 = 0.2;
const ARC_WIDTH_RATIO: f32 = 0.06;
const TRACK_ALPHA: u8 = 150;
const DOT_RATIO: f32 = 0.6;

/// Arc start, twelve o'clock.
const ARC_START_DEG: f32 = -90.0;
/// End of the full track.
const TRACK_END_DEG: f32 = 270.0;
/// End of the progress arc: three quarters of the way round.
const PROGRESS_END_DEG: f32 = 180.0;

// ============================================================================
// IconStyle
// ============================================================================

/// Colors used to paint the icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconStyle {
    pub body: Srgb<u8>,
    /// Shadow ellipses and the progress track.
    pub shadow: Srgb<u8>,
    pub highlight: Srgb<u8>,
    pub stem: Srgb<u8>,
    /// Progress arc and its end dot.
    pub progress: Srgb<u8>,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            body: color::TEAL,
            shadow: color::TEAL_DARK,
            highlight: color::TEAL_LIGHT,
            stem: color::STEM_GREEN,
            progress: color::WHITE,
        }
    }
}

// ============================================================================
// IconGeometry
// ============================================================================

/// Layout of every icon element for one pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct IconGeometry {
    pub size: u32,
    pub padding: f32,
    /// Center of the canvas on both axes.
    pub center: f32,
    /// Radius of the body.
    pub radius: f32,
    pub body: Bounds,
    /// Shadow ellipses in drawing order with their alpha.
    pub shadows: [(Bounds, u8); 3],
    pub highlight: Bounds,
    /// Rectangular part of the stem.
    pub stem: Bounds,
    /// Ellipse rounding the top of the stem.
    pub stem_cap: Bounds,
    /// Box the progress ring is inscribed in.
    pub arc_bounds: Bounds,
    /// Nominal ring width, `size * 0.06`.
    pub arc_width: f32,
    /// Whole-pixel stroke width actually used for the ring.
    pub arc_stroke: f32,
    pub end_dot_center: (f32, f32),
    pub end_dot_radius: f32,
}

impl IconGeometry {
    /// Computes the layout for a `size` x `size` icon.
    pub fn for_size(size: u32) -> Self {
        let s = size as f32;
        let padding = s * PADDING_RATIO;
        let center = s / 2.0;
        let radius = (s - padding * 2.0) / 2.0;
        let body = Bounds::new(padding, padding, s - padding, s - padding);

        let shadows = std::array::from_fn(|i| {
            let offset = s * SHADOW_STEP_RATIO * (3 - i) as f32;
            (body.offset(offset, offset), SHADOW_ALPHAS[i])
        });

        let highlight_offset = radius * HIGHLIGHT_RATIO;
        let highlight = Bounds::circle(
            center - highlight_offset,
            center - highlight_offset,
            radius * HIGHLIGHT_RATIO / 2.0,
        );

        let stem_width = s * STEM_WIDTH_RATIO;
        let stem_height = s * STEM_HEIGHT_RATIO;
        let stem_x = center - stem_width / 2.0;
        let stem_y = padding - stem_height * 0.3;
        let stem = Bounds::new(
            stem_x,
            stem_y + stem_height * 0.3,
            stem_x + stem_width,
            stem_y + stem_height,
        );
        let stem_cap = Bounds::new(
            stem_x,
            stem_y,
            stem_x + stem_width,
            stem_y + stem_height * 0.6,
        );

        let arc_padding = s * ARC_PADDING_RATIO;
        let arc_bounds = Bounds::new(arc_padding, arc_padding, s - arc_padding, s - arc_padding);
        let arc_width = s * ARC_WIDTH_RATIO;
        let arc_stroke = arc_width.floor().max(1.0);

        // The dot sits a quarter turn behind the arc's end angle.
        let dot_angle = (PROGRESS_END_DEG - 90.0).to_radians();
        let arc_radius = (s - arc_padding * 2.0) / 2.0;
        let end_dot_center = (
            center + arc_radius * dot_angle.cos(),
            center + arc_radius * dot_angle.sin(),
        );

        Self {
            size,
            padding,
            center,
            radius,
            body,
            shadows,
            highlight,
            stem,
            stem_cap,
            arc_bounds,
            arc_width,
            arc_stroke,
            end_dot_center,
            end_dot_radius: arc_width * DOT_RATIO,
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders the icon at `size` x `size` pixels with the default colors.
pub fn render_icon(size: u32) -> Result<RgbaImage> {
    render_icon_with(size, &IconStyle::default())
}

/// Renders the icon at `size` x `size` pixels.
///
/// Any positive size renders. From 5 px up, pixels outside the padded body
/// (and its shadow and stem) stay fully transparent and the center is
/// opaque; below that, anti-aliasing bleeds into the corners.
pub fn render_icon_with(size: u32, style: &IconStyle) -> Result<RgbaImage> {
    if size == 0 {
        return Err(AssetError::InvalidSize(size));
    }

    let geometry = IconGeometry::for_size(size);
    debug!(
        "icon {}px: radius {:.2}, ring stroke {}px",
        size, geometry.radius, geometry.arc_stroke
    );

    let mut canvas = Canvas::new(size, size)?;
    draw_shadow(&mut canvas, &geometry, style);
    canvas.fill_ellipse(geometry.body, opaque(style.body));
    canvas.fill_ellipse(
        geometry.highlight,
        translucent(style.highlight, HIGHLIGHT_ALPHA),
    );
    draw_stem(&mut canvas, &geometry, style);
    draw_progress(&mut canvas, &geometry, style);

    Ok(canvas.into_image())
}

fn draw_shadow(canvas: &mut Canvas, geometry: &IconGeometry, style: &IconStyle) {
    for &(bounds, alpha) in &geometry.shadows {
        canvas.fill_ellipse(bounds, translucent(style.shadow, alpha));
    }
}

fn draw_stem(canvas: &mut Canvas, geometry: &IconGeometry, style: &IconStyle) {
    canvas.fill_rect(geometry.stem, opaque(style.stem));
    canvas.fill_ellipse(geometry.stem_cap, opaque(style.stem));
}

fn draw_progress(canvas: &mut Canvas, geometry: &IconGeometry, style: &IconStyle) {
    canvas.stroke_arc(
        geometry.arc_bounds,
        ARC_START_DEG,
        TRACK_END_DEG,
        geometry.arc_stroke,
        translucent(style.shadow, TRACK_ALPHA),
    );
    canvas.stroke_arc(
        geometry.arc_bounds,
        ARC_START_DEG,
        PROGRESS_END_DEG,
        geometry.arc_stroke,
        opaque(style.progress),
    );

    let (x, y) = geometry.end_dot_center;
    canvas.fill_ellipse(
        Bounds::circle(x, y, geometry.end_dot_radius),
        opaque(style.progress),
    );
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

    #[test]
    fn every_small_size_renders() {
        for size in 1..=128 {
            let icon = render_icon(size).unwrap();
            assert_eq!(icon.dimensions(), (size, size));
            if size >= 5 {
                assert_eq!(icon.get_pixel(0, 0).0[3], 0, "corner of {size}px icon");
                assert_eq!(
                    icon.get_pixel(size / 2, size / 2).0[3],
                    255,
                    "center of {size}px icon"
                );
            }
        }
    }

    #[test]
    fn icon_is_square_with_transparent_corner_and_opaque_center() {
        for size in SIZES {
            let icon = render_icon(size).unwrap();
            assert_eq!(icon.dimensions(), (size, size));
            assert_eq!(icon.get_pixel(0, 0).0[3], 0, "corner of {size}px icon");
            assert_eq!(
                icon.get_pixel(size / 2, size / 2).0[3],
                255,
                "center of {size}px icon"
            );
        }
    }

    #[test]
    fn center_pixel_is_body_color() {
        let icon = render_icon(512).unwrap();
        assert_eq!(icon.get_pixel(256, 256).0, [13, 148, 136, 255]);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(render_icon(0), Err(AssetError::InvalidSize(0))));
    }

    #[test]
    fn end_dot_sits_below_center() {
        let geometry = IconGeometry::for_size(512);
        let (x, y) = geometry.end_dot_center;

        assert!((x - 256.0).abs() < 0.01);
        assert!(y > geometry.center);
        // center + (512 - 2 * 102.4) / 2
        assert!((y - 409.6).abs() < 0.01);

        let icon = render_icon(512).unwrap();
        assert_eq!(icon.get_pixel(x as u32, y as u32).0, [255, 255, 255, 255]);
    }

    #[test]
    fn proportions_hold_across_sizes() {
        for size in [16, 1024] {
            let geometry = IconGeometry::for_size(size);
            let s = size as f32;
            assert!((geometry.stem.width() / s - 0.08).abs() < 1e-4);
            assert!((geometry.padding / s - 0.08).abs() < 1e-4);
            assert!((geometry.arc_width / s - 0.06).abs() < 1e-4);
        }
        assert!(render_icon(16).is_ok());
        assert!(render_icon(1024).is_ok());
    }

    #[test]
    fn ring_stroke_never_vanishes() {
        assert_eq!(IconGeometry::for_size(16).arc_stroke, 1.0);
        assert_eq!(IconGeometry::for_size(512).arc_stroke, 30.0);
    }

    #[test]
    fn shadows_step_toward_body() {
        let geometry = IconGeometry::for_size(100);
        let offsets: Vec<f32> = geometry
            .shadows
            .iter()
            .map(|(b, _)| b.left - geometry.body.left)
            .collect();
        assert!(offsets[0] > offsets[1] && offsets[1] > offsets[2]);
        assert!((offsets[0] - 3.0).abs() < 1e-4);

        let alphas: Vec<u8> = geometry.shadows.iter().map(|(_, a)| *a).collect();
        assert_eq!(alphas, vec![30, 40, 50]);
    }

    #[test]
    fn stem_is_drawn_above_body() {
        let geometry = IconGeometry::for_size(1024);
        let icon = render_icon(1024).unwrap();

        // Inside the stem cap, above the body's top edge.
        let y = (geometry.stem_cap.top + geometry.stem_cap.height() / 2.0) as u32;
        assert!((y as f32) < geometry.body.top);
        assert_eq!(icon.get_pixel(512, y).0, [34, 197, 94, 255]);
    }

    #[test]
    fn highlight_lightens_body() {
        let geometry = IconGeometry::for_size(512);
        let (hx, hy) = geometry.highlight.center();
        let pixel = render_icon(512).unwrap().get_pixel(hx as u32, hy as u32).0;

        assert_eq!(pixel[3], 255);
        assert!(pixel[1] > 148 && pixel[1] < 184, "green {}", pixel[1]);
    }

    #[test]
    fn progress_covers_three_quarters() {
        let icon = render_icon(512).unwrap();
        let geometry = IconGeometry::for_size(512);
        let ring = geometry.arc_bounds.width() / 2.0 - geometry.arc_stroke / 2.0;
        let at = |deg: f32| {
            let a = deg.to_radians();
            let x = geometry.center + ring * a.cos();
            let y = geometry.center + ring * a.sin();
            icon.get_pixel(x as u32, y as u32).0
        };

        assert_eq!(at(45.0), [255, 255, 255, 255]);
        assert_eq!(at(-45.0), [255, 255, 255, 255]);
        let unfinished = at(225.0);
        assert_ne!(unfinished, [255, 255, 255, 255]);
        assert_eq!(unfinished[3], 255);
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_icon(128).unwrap(), render_icon(128).unwrap());
    }

    #[test]
    fn custom_style_changes_body() {
        let style = IconStyle {
            body: Srgb::new(200, 40, 40),
            ..IconStyle::default()
        };
        let icon = render_icon_with(64, &style).unwrap();
        assert_eq!(icon.get_pixel(32, 32).0, [200, 40, 40, 255]);
    }
}
