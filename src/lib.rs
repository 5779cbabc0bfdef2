//! Worst-region-first quadtree approximation of raster images
//!
//! An image is approximated by repeatedly splitting the rectangle whose single
//! average color fits its pixels worst into four quadrants. Every split paints
//! the quadrants' average colors, so the stream of paint events is a progressive
//! reconstruction that sharpens where the image has the most detail.

#![forbid(unsafe_code)]

/// Max-error priority queue and the subdivision driver
pub mod algorithm;
/// Average color and error scoring of regions
pub mod analysis;
/// Image I/O, canvas rendering, snapshots, progress and the CLI
pub mod io;
/// Rectangles, quadrant splitting and pixel sampling
pub mod spatial;

pub use algorithm::subdivision::{Canvas, SubdivisionConfig, Subdivider, subdivide};
pub use io::error::{QuadError, Result};
