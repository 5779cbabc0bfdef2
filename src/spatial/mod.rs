//! Spatial primitives shared by the scorer and the subdivision driver
//!
//! This module contains:
//! - Half-open integer rectangles and the quadrant split rule
//! - Read-only pixel sampling over decoded image buffers

/// Read-only 16-bit pixel sampling over decoded buffers
pub mod pixels;
/// Half-open rectangles and midpoint quadrant splitting
pub mod rect;

pub use pixels::{Color, PixelSource};
pub use rect::Rect;
