//! Half-open axis-aligned rectangles over the pixel grid
//!
//! A [`Rect`] covers `[min_x, max_x) x [min_y, max_y)`. Splitting always happens
//! at the floor midpoint, so odd extents leave the smaller half on the top/left.

use std::fmt;

/// Axis-aligned integer region `[min_x, max_x) x [min_y, max_y)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge (inclusive)
    pub min_x: u32,
    /// Top edge (inclusive)
    pub min_y: u32,
    /// Right edge (exclusive)
    pub max_x: u32,
    /// Bottom edge (exclusive)
    pub max_y: u32,
}

impl Rect {
    /// Create a rectangle from its corner coordinates
    pub const fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle anchored at the origin with the given size
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Horizontal extent
    pub const fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    /// Vertical extent
    pub const fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// True when the rectangle covers no pixel
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Check if a pixel coordinate lies inside
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Check if `other` lies entirely inside this rectangle
    ///
    /// Empty rectangles are contained as long as their corners are within bounds.
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
            && other.min_x <= other.max_x
            && other.min_y <= other.max_y
    }

    /// Floor midpoint `(min_x + width / 2, min_y + height / 2)`
    pub const fn midpoint(&self) -> (u32, u32) {
        (
            self.min_x + self.width() / 2,
            self.min_y + self.height() / 2,
        )
    }

    /// Split into top-left, top-right, bottom-left and bottom-right quadrants
    ///
    /// The quadrants tile `self` exactly. A side of length 1 yields empty
    /// quadrants on the top/left half.
    pub const fn quadrants(&self) -> [Self; 4] {
        let (mid_x, mid_y) = self.midpoint();
        [
            Self::new(self.min_x, self.min_y, mid_x, mid_y),
            Self::new(mid_x, self.min_y, self.max_x, mid_y),
            Self::new(self.min_x, mid_y, mid_x, self.max_y),
            Self::new(mid_x, mid_y, self.max_x, self.max_y),
        ]
    }

    /// Iterate pixel coordinates in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..self.max_y).flat_map(move |y| (min_x..max_x).map(move |x| (x, y)))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})x[{}, {})",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}
