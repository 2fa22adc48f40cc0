//! Drawing surface used by both renderers.
//!
//! [`Canvas`] wraps a `tiny_skia` pixmap and exposes the handful of
//! anti-aliased primitives the assets are built from. Every draw blends
//! source-over onto what is already there.

use image::{Rgba, RgbaImage};
use palette::Srgba;
use resvg::tiny_skia::{
    ColorU8, FillRule, LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use crate::color::to_skia;
use crate::error::{AssetError, Result};

// ============================================================================
// Bounds
// ============================================================================

/// An axis-aligned box in floating point pixel coordinates.
///
/// Ellipses and arcs are described by the box they are inscribed in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The square box around a circle.
    pub fn circle(cx: f32, cy: f32, radius: f32) -> Self {
        Self::new(cx - radius, cy - radius, cx + radius, cy + radius)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Moves the box by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    fn to_rect(self) -> Option<Rect> {
        Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// A fixed-size RGBA drawing surface.
///
/// Degenerate shapes (zero area, non-finite coordinates) are skipped rather
/// than reported; at the smallest icon sizes some details shrink below a
/// pixel and simply vanish.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Creates a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(AssetError::PixmapAllocation { width, height })?;
        Ok(Self { pixmap })
    }

    /// Creates a canvas holding a copy of `image`.
    pub fn from_image(image: &RgbaImage) -> Result<Self> {
        let mut canvas = Self::new(image.width(), image.height())?;
        for (dst, src) in canvas.pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fills the ellipse inscribed in `bounds`.
    pub fn fill_ellipse(&mut self, bounds: Bounds, color: Srgba<u8>) {
        let Some(path) = bounds.to_rect().and_then(PathBuilder::from_oval) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    pub fn fill_rect(&mut self, bounds: Bounds, color: Srgba<u8>) {
        // Filled as a path: the pixmap's rect fast path trips over
        // sub-2px widths that straddle a pixel edge.
        let Some(path) = bounds.to_rect().map(PathBuilder::from_rect) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Fills the closed polygon through `points`.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Srgba<u8>) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        for &(x, y) in rest {
            pb.line_to(x, y);
        }
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Strokes a straight segment with butt ends, centered on the segment.
    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Srgba<u8>) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.0, from.1);
        pb.line_to(to.0, to.1);
        let Some(path) = pb.finish() else {
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &paint(color),
            &butt_stroke(width),
            Transform::identity(),
            None,
        );
    }

    /// Strokes the arc of the circle inscribed in `bounds`.
    ///
    /// Angles are in degrees, measured clockwise from three o'clock (the
    /// y axis points down). The stroke lies entirely inside `bounds`, its
    /// outer edge touching the box.
    pub fn stroke_arc(
        &mut self,
        bounds: Bounds,
        start_deg: f32,
        end_deg: f32,
        width: f32,
        color: Srgba<u8>,
    ) {
        let (cx, cy) = bounds.center();
        let radius = bounds.width().min(bounds.height()) / 2.0 - width / 2.0;
        if radius <= 0.0 || width <= 0.0 {
            return;
        }

        let mut pb = PathBuilder::new();
        if (end_deg - start_deg).abs() >= 360.0 {
            pb.push_circle(cx, cy, radius);
        } else {
            push_arc(&mut pb, cx, cy, radius, start_deg, end_deg);
        }
        let Some(path) = pb.finish() else {
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &paint(color),
            &butt_stroke(width),
            Transform::identity(),
            None,
        );
    }

    /// Converts the canvas to a straight-alpha RGBA image.
    pub fn into_image(self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }
}

fn paint(color: Srgba<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn butt_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Butt,
        ..Stroke::default()
    }
}

/// Appends a circular arc as cubic Béziers, one per quarter turn at most.
fn push_arc(pb: &mut PathBuilder, cx: f32, cy: f32, radius: f32, start_deg: f32, end_deg: f32) {
    let sweep = (end_deg - start_deg).to_radians();
    let segments = (sweep.abs() / std::f32::consts::FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    // Control point distance for a unit-circle arc of `step` radians.
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut a0 = start_deg.to_radians();
    let (s0, c0) = a0.sin_cos();
    pb.move_to(cx + radius * c0, cy + radius * s0);

    for _ in 0..segments {
        let a1 = a0 + step;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        pb.cubic_to(
            cx + radius * (c0 - k * s0),
            cy + radius * (s0 + k * c0),
            cx + radius * (c1 + k * s1),
            cy + radius * (s1 - k * c1),
            cx + radius * c1,
            cy + radius * s1,
        );
        a0 = a1;
    }
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites `src` onto `dest` with its top-left corner at `(x, y)`.
///
/// Both images carry straight (non-premultiplied) alpha. Parts of `src`
/// falling outside `dest` are clipped.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    for (sx, sy, top) in src.enumerate_pixels() {
        let (Ok(dx), Ok(dy)) = (u32::try_from(x + sx as i32), u32::try_from(y + sy as i32)) else {
            continue;
        };
        if dx >= dest.width() || dy >= dest.height() {
            continue;
        }

        let bottom = dest.get_pixel_mut(dx, dy);
        // Weights of each layer in the result, before normalizing.
        let top_w = f32::from(top[3]) / 255.0;
        let bottom_w = f32::from(bottom[3]) / 255.0 * (1.0 - top_w);
        let alpha = top_w + bottom_w;
        if alpha <= 0.0 {
            *bottom = Rgba([0, 0, 0, 0]);
            continue;
        }

        let mut out = [0u8; 4];
        for (c, channel) in out.iter_mut().take(3).enumerate() {
            let mixed = f32::from(top[c]) * top_w + f32::from(bottom[c]) * bottom_w;
            *channel = (mixed / alpha).round() as u8;
        }
        out[3] = (alpha * 255.0).round() as u8;
        *bottom = Rgba(out);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{opaque, translucent, TEAL, WHITE};

    #[test]
    fn new_canvas_is_transparent() {
        let image = Canvas::new(8, 4).unwrap().into_image();
        assert_eq!(image.dimensions(), (8, 4));
        assert!(image.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(AssetError::PixmapAllocation { width: 0, height: 10 })
        ));
    }

    #[test]
    fn filled_ellipse_covers_center_not_corners() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.fill_ellipse(Bounds::new(2.0, 2.0, 18.0, 18.0), opaque(TEAL));
        let image = canvas.into_image();

        assert_eq!(image.get_pixel(10, 10).0, [13, 148, 136, 255]);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        assert_eq!(image.get_pixel(19, 19).0[3], 0);
    }

    #[test]
    fn translucent_fill_blends_over_opaque() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.fill_rect(Bounds::new(0.0, 0.0, 4.0, 4.0), opaque(TEAL));
        canvas.fill_rect(Bounds::new(0.0, 0.0, 4.0, 4.0), translucent(WHITE, 128));
        let pixel = *canvas.into_image().get_pixel(1, 1);

        assert_eq!(pixel[3], 255, "blending onto opaque stays opaque");
        assert!(pixel[0] > 100 && pixel[0] < 160, "red halfway to white: {pixel:?}");
    }

    #[test]
    fn arc_stroke_stays_inside_bounds() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        canvas.stroke_arc(Bounds::new(10.0, 10.0, 30.0, 30.0), -90.0, 270.0, 4.0, opaque(WHITE));
        let image = canvas.into_image();

        // Ring spans radius 6..10 around (20, 20).
        assert!(image.get_pixel(20, 12).0[3] > 200);
        assert_eq!(image.get_pixel(20, 20).0[3], 0);
        assert_eq!(image.get_pixel(20, 8).0[3], 0);
    }

    #[test]
    fn partial_arc_leaves_last_quarter_empty() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        // Top, clockwise through right and bottom, ending at the left.
        canvas.stroke_arc(Bounds::new(0.0, 0.0, 40.0, 40.0), -90.0, 180.0, 4.0, opaque(WHITE));
        let image = canvas.into_image();

        assert!(image.get_pixel(38, 20).0[3] > 200, "right side drawn");
        assert!(image.get_pixel(20, 38).0[3] > 200, "bottom drawn");
        // Upper-left quadrant of the ring is the unfinished part.
        assert_eq!(image.get_pixel(6, 6).0[3], 0);
    }

    #[test]
    fn narrow_rect_straddling_pixel_edge() {
        // Icons of 16 to 24 px draw stems 1.28 to 1.92 px wide.
        for width in [1.28, 1.6, 1.76, 1.92] {
            let mut canvas = Canvas::new(24, 24).unwrap();
            let left = 12.0 - width / 2.0;
            canvas.fill_rect(Bounds::new(left, 2.0, left + width, 10.0), opaque(TEAL));
            let image = canvas.into_image();

            assert!(image.get_pixel(11, 5).0[3] > 0, "width {width}");
            assert_eq!(image.get_pixel(0, 5).0[3], 0);
        }
    }

    #[test]
    fn polygon_fills_interior() {
        let mut canvas = Canvas::new(30, 30).unwrap();
        canvas.fill_polygon(&[(25.0, 15.0), (5.0, 5.0), (5.0, 25.0)], opaque(TEAL));
        let image = canvas.into_image();

        assert_eq!(image.get_pixel(10, 15).0[3], 255);
        assert_eq!(image.get_pixel(25, 2).0[3], 0);
    }

    #[test]
    fn image_roundtrip_preserves_opaque_pixels() {
        let source = RgbaImage::from_pixel(3, 3, Rgba([22, 22, 26, 255]));
        let image = Canvas::from_image(&source).unwrap().into_image();
        assert_eq!(image, source);
    }

    #[test]
    fn composite_opaque_layer_replaces_pixels() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([22, 22, 26, 255]));
        let layer = RgbaImage::from_pixel(4, 4, Rgba([13, 148, 136, 255]));

        composite_over(&mut dest, &layer, 3, 3);

        assert_eq!(dest.get_pixel(5, 5).0, [13, 148, 136, 255]);
        assert_eq!(dest.get_pixel(0, 0).0, [22, 22, 26, 255]);
    }

    #[test]
    fn composite_faint_glow_tints_background() {
        let mut dest = RgbaImage::from_pixel(2, 2, Rgba([22, 22, 26, 255]));
        let glow = RgbaImage::from_pixel(2, 2, Rgba([13, 148, 136, 8]));

        composite_over(&mut dest, &glow, 0, 0);

        let pixel = dest.get_pixel(0, 0);
        assert_eq!(pixel[3], 255);
        assert!(pixel[2] > 26, "blue pulled toward teal: {pixel:?}");
        assert!(pixel[1] > 22, "green pulled toward teal: {pixel:?}");
    }

    #[test]
    fn composite_clips_negative_offsets() {
        let mut dest = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));

        composite_over(&mut dest, &src, -2, -2);

        assert_eq!(dest.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(dest.get_pixel(2, 2).0, [0, 0, 0, 255]);
    }
}
