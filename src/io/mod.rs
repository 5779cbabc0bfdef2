/// Raster canvas receiving paint events and drawing boundary outlines
pub mod canvas;
/// Command-line parsing and batch file processing
pub mod cli;
/// Runtime defaults and output naming constants
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Source image decoding and PNG export
pub mod image;
/// Terminal progress display
pub mod progress;
/// Snapshot frames and animated GIF export
pub mod visualization;
