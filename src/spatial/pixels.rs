//! Read-only pixel access used by region scoring
//!
//! Samples are always reported as four 16-bit channels. Eight-bit buffers are
//! widened by byte replication (`v * 257`) so both depths share one scale.

use crate::spatial::rect::Rect;
use image::{ImageBuffer, Rgba, RgbaImage};

/// Representative color of a region, four 16-bit channels (RGBA)
pub type Color = Rgba<u16>;

/// Bounded random-access sampling over a decoded image
///
/// Implementations are never mutated by the subdivision engine.
pub trait PixelSource {
    /// Rectangle covering every addressable pixel
    fn bounds(&self) -> Rect;

    /// Sample the pixel at `(x, y)`
    ///
    /// Callers guarantee the coordinate lies within [`PixelSource::bounds`].
    fn sample(&self, x: u32, y: u32) -> Color;
}

impl PixelSource for ImageBuffer<Rgba<u16>, Vec<u16>> {
    fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    fn sample(&self, x: u32, y: u32) -> Color {
        *self.get_pixel(x, y)
    }
}

impl PixelSource for RgbaImage {
    fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    fn sample(&self, x: u32, y: u32) -> Color {
        let Rgba([r, g, b, a]) = *self.get_pixel(x, y);
        Rgba([widen(r), widen(g), widen(b), widen(a)])
    }
}

/// Replicate an 8-bit channel into the 16-bit range
pub const fn widen(channel: u8) -> u16 {
    channel as u16 * 257
}

/// Keep the high byte of a 16-bit channel
pub const fn narrow(channel: u16) -> u8 {
    (channel >> 8) as u8
}

/// Convert a 16-bit color to its 8-bit counterpart
pub const fn to_rgba8(color: Color) -> Rgba<u8> {
    let Rgba([r, g, b, a]) = color;
    Rgba([narrow(r), narrow(g), narrow(b), narrow(a)])
}
