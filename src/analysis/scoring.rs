//! Average-color and error scoring of rectangular regions
//!
//! A region's error is the root mean squared RGB distance of its pixels from the
//! region's average color, weighted by `log2(area)`. The weighting makes a large
//! noisy region outrank a small region with the same per-pixel error, which is
//! what drives the worst-region-first subdivision order.

use crate::spatial::{Color, PixelSource, Rect};
use image::Rgba;

/// A rectangle paired with its representative color and error score
///
/// Built once by [`score_region`] and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRegion {
    rect: Rect,
    average_color: Color,
    error_score: f64,
}

impl ScoredRegion {
    /// Region bounds
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Mean color of the pixels in the region
    pub const fn average_color(&self) -> Color {
        self.average_color
    }

    /// Size-weighted RMS error of the average color
    pub const fn error_score(&self) -> f64 {
        self.error_score
    }
}

/// Score a rectangle of the pixel source
///
/// The rectangle must lie within `pixels.bounds()`. Empty rectangles score zero
/// with a fully transparent color.
pub fn score_region<P: PixelSource + ?Sized>(pixels: &P, rect: Rect) -> ScoredRegion {
    let average_color = average_color(pixels, rect);
    let error_score = error_score(pixels, rect, average_color);

    ScoredRegion {
        rect,
        average_color,
        error_score,
    }
}

/// Per-channel mean over the rectangle, truncated toward zero
///
/// Samples are averaged exactly as the source reports them, including any
/// alpha premultiplication.
pub fn average_color<P: PixelSource + ?Sized>(pixels: &P, rect: Rect) -> Color {
    let area = rect.area();
    if area == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    if area == 1 {
        return pixels.sample(rect.min_x, rect.min_y);
    }

    let mut sums = [0u64; 4];
    for (x, y) in rect.pixels() {
        let Rgba(channels) = pixels.sample(x, y);
        for (sum, channel) in sums.iter_mut().zip(channels) {
            *sum += u64::from(channel);
        }
    }

    // Each mean is bounded by the largest sample, so it always fits a u16
    Rgba(sums.map(|sum| (sum / area) as u16))
}

/// `sqrt(mean squared RGB error) * log2(area)` against `average`
///
/// Alpha does not contribute. Regions of area 0 or 1 score exactly zero.
pub fn error_score<P: PixelSource + ?Sized>(pixels: &P, rect: Rect, average: Color) -> f64 {
    let area = rect.area();
    if area <= 1 {
        return 0.0;
    }

    let total: u128 = rect
        .pixels()
        .map(|(x, y)| u128::from(squared_rgb_distance(pixels.sample(x, y), average)))
        .sum();

    let mean_squared_error = total as f64 / area as f64;
    mean_squared_error.sqrt() * (area as f64).log2()
}

/// Sum of squared red, green and blue differences
pub const fn squared_rgb_distance(a: Color, b: Color) -> u64 {
    let Rgba([r1, g1, b1, _]) = a;
    let Rgba([r2, g2, b2, _]) = b;
    let dr = r1.abs_diff(r2) as u64;
    let dg = g1.abs_diff(g2) as u64;
    let db = b1.abs_diff(b2) as u64;
    dr * dr + dg * dg + db * db
}
