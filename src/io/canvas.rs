//! Raster canvas accumulating paint events, with boundary outline overlays

use crate::algorithm::subdivision::Canvas;
use crate::io::configuration::{OUTLINE_COLOR, OUTLINE_OPACITY};
use crate::spatial::pixels::to_rgba8;
use crate::spatial::{Color, Rect};
use image::{Rgba, RgbaImage};

/// Stroke used when overlaying boundary crosses on a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    /// Stroke color (RGB)
    pub color: [u8; 3],
    /// Stroke opacity in `[0, 1]`
    pub opacity: f32,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            color: OUTLINE_COLOR,
            opacity: OUTLINE_OPACITY,
        }
    }
}

/// 8-bit RGBA raster that paint events are filled into
///
/// Starts fully transparent. Painting replaces pixels, it does not blend.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Continue painting onto an existing raster
    pub const fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Canvas bounds
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.image.width(), self.image.height())
    }

    /// Current accumulated raster
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take ownership of the accumulated raster
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fill the part of `rect` that lies on the canvas with a solid color
    pub fn fill(&mut self, rect: Rect, color: Rgba<u8>) {
        let clipped = self.clip(rect);
        for (x, y) in clipped.pixels() {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Render a copy of the canvas with a cross through each boundary
    ///
    /// Every boundary gets a vertical stroke at its midpoint column spanning
    /// its height and a horizontal stroke at its midpoint row spanning its
    /// width. The canvas itself is left untouched.
    pub fn outlined(&self, boundaries: &[Rect], style: &OutlineStyle) -> RgbaImage {
        let mut frame = self.image.clone();

        for boundary in boundaries {
            if boundary.is_empty() {
                continue;
            }
            let (mid_x, mid_y) = boundary.midpoint();

            let column = self.clip(Rect::new(mid_x, boundary.min_y, mid_x + 1, boundary.max_y));
            for (x, y) in column.pixels() {
                blend(frame.get_pixel_mut(x, y), style);
            }

            let row = self.clip(Rect::new(boundary.min_x, mid_y, boundary.max_x, mid_y + 1));
            for (x, y) in row.pixels().filter(|&(x, _)| x != mid_x) {
                blend(frame.get_pixel_mut(x, y), style);
            }
        }

        frame
    }

    fn clip(&self, rect: Rect) -> Rect {
        let bounds = self.bounds();
        let min_x = rect.min_x.min(bounds.max_x);
        let min_y = rect.min_y.min(bounds.max_y);
        Rect::new(
            min_x,
            min_y,
            rect.max_x.clamp(min_x, bounds.max_x),
            rect.max_y.clamp(min_y, bounds.max_y),
        )
    }
}

impl Canvas for RasterCanvas {
    fn paint(&mut self, rect: Rect, color: Color) {
        self.fill(rect, to_rgba8(color));
    }
}

/// Source-over blend of the outline stroke onto one pixel
fn blend(pixel: &mut Rgba<u8>, style: &OutlineStyle) {
    let opacity = style.opacity.clamp(0.0, 1.0);
    let Rgba(channels) = pixel;

    for (channel, &stroke) in channels.iter_mut().zip(style.color.iter()) {
        let mixed = f32::from(*channel).mul_add(1.0 - opacity, f32::from(stroke) * opacity);
        *channel = mixed.round().clamp(0.0, 255.0) as u8;
    }

    if let Some(alpha) = channels.get_mut(3) {
        let mixed = (255.0 - f32::from(*alpha)).mul_add(opacity, f32::from(*alpha));
        *alpha = mixed.round().clamp(0.0, 255.0) as u8;
    }
}
