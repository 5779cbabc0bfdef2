//! Runtime defaults and output naming

/// Default number of pop-and-split iterations
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default snapshot stride in iterations
pub const DEFAULT_SNAPSHOT_EVERY: usize = 5;

// Large sources are scaled down before subdivision, as the web front end did
/// Default cap on the longer side of a source image in pixels
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// File extensions accepted as source images (lowercase)
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

// Output settings
/// Suffix added to the reconstructed image filename
pub const OUTPUT_SUFFIX: &str = "_quad";
/// Suffix of the directory receiving numbered snapshot frames
pub const FRAMES_SUFFIX: &str = "_frames";
/// Suffix of the animated GIF built from snapshots
pub const GIF_SUFFIX: &str = "_quadtree";

/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 100;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Multiplier applied to the delay of the final GIF frame
pub const FINAL_FRAME_HOLD: u32 = 25;

// Boundary outlines are drawn as crosses through each split rectangle
/// Outline stroke color (RGB)
pub const OUTLINE_COLOR: [u8; 3] = [0, 0, 0];
/// Outline stroke opacity in `[0, 1]`
pub const OUTLINE_OPACITY: f32 = 0.5;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Iterations between progress bar refreshes
pub const PROGRESS_REFRESH_INTERVAL: usize = 10;
