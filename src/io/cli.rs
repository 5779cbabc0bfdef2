//! Command-line interface for rendering quadtree approximations of images

use crate::algorithm::subdivision::{SubdivisionConfig, Subdivider};
use crate::io::canvas::{OutlineStyle, RasterCanvas};
use crate::io::configuration::{
    DEFAULT_ITERATIONS, DEFAULT_MAX_DIMENSION, DEFAULT_SNAPSHOT_EVERY, FRAMES_SUFFIX,
    GIF_FRAME_DELAY_MS, GIF_SUFFIX, OUTPUT_SUFFIX, PROGRESS_REFRESH_INTERVAL,
    SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, invalid_target};
use crate::io::image::{load_source, save_png};
use crate::io::progress::ProgressManager;
use crate::io::visualization::FrameRecorder;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "quadart")]
#[command(
    author,
    version,
    about = "Approximate images by splitting the worst-fitting region first"
)]
/// Command-line arguments for the quadtree renderer
// Output toggles are independent switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image (jpg, jpeg, png) or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of regions to split
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Take a snapshot every N iterations (iteration 0 included)
    #[arg(short, long, default_value_t = DEFAULT_SNAPSHOT_EVERY)]
    pub snapshot_every: usize,

    /// Write snapshots as numbered PNG files into <input>_frames/
    #[arg(short, long)]
    pub frames: bool,

    /// Assemble snapshots into an animated GIF
    #[arg(short, long)]
    pub gif: bool,

    /// Outline split regions on snapshots
    #[arg(short, long)]
    pub outline: bool,

    /// Delay between GIF frames in milliseconds
    #[arg(short = 'd', long, default_value_t = GIF_FRAME_DELAY_MS)]
    pub frame_delay: u32,

    /// Downscale sources whose longer side exceeds this many pixels
    #[arg(short, long, default_value_t = DEFAULT_MAX_DIMENSION)]
    pub max_dimension: u32,

    /// Keep the source at its original resolution
    #[arg(long, conflicts_with = "max_dimension")]
    pub full_size: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Resize limit applied to sources, `None` when disabled
    pub const fn max_dimension(&self) -> Option<u32> {
        if self.full_size {
            None
        } else {
            Some(self.max_dimension)
        }
    }

    /// Driver parameters from the command line
    pub const fn subdivision_config(&self) -> SubdivisionConfig {
        SubdivisionConfig {
            iterations: self.iterations,
            snapshot_every: self.snapshot_every,
        }
    }

    /// Default log filter when `RUST_LOG` is unset
    pub const fn default_log_filter(&self) -> &'static str {
        if self.quiet { "error" } else { "warn" }
    }
}

/// Orchestrates batch processing of source images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, decoding, subdivision or any
    /// output write fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.subdivision_config().validate()?;

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Source images selected by the target argument, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a supported image nor a
    /// readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if !is_supported_image(target) {
                return Err(invalid_target(target, "target file must be a JPEG or PNG image"));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if path.is_file()
                    && is_supported_image(&path)
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(
                target,
                "target must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            warn!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let config = self.cli.subdivision_config();

        let source = load_source(input_path, self.cli.max_dimension())?;

        let mut recorder = FrameRecorder::new(RasterCanvas::new(source.width(), source.height()));
        if self.cli.outline {
            recorder = recorder.with_outline(OutlineStyle::default());
        }
        if self.cli.frames {
            recorder = recorder.with_frames_dir(Self::get_frames_dir(input_path));
        }
        if self.cli.gif {
            recorder = recorder.keeping_frames();
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, config.iterations);
        }

        let mut subdivider = Subdivider::new(&source);
        for iteration in 1..=config.iterations {
            let step = subdivider.advance(&config, &mut recorder)?;

            if let Some(ref pm) = self.progress_manager
                && (iteration % PROGRESS_REFRESH_INTERVAL == 0 || iteration == config.iterations)
            {
                pm.update_iteration(iteration, step.popped.error_score());
            }
        }

        let output_path = Self::get_output_path(input_path);
        save_png(recorder.canvas().image(), &output_path)?;

        if self.cli.gif {
            if recorder.kept_frames() == 0 {
                warn!(input = %input_path.display(), "no snapshots taken, GIF not written");
            } else {
                recorder.export_gif(&Self::get_gif_path(input_path), self.cli.frame_delay)?;
            }
        }

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            width = source.width(),
            height = source.height(),
            iterations = config.iterations,
            snapshots = recorder.snapshot_count(),
            frontier = subdivider.frontier().len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "rendered quadtree approximation"
        );

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file(start_time.elapsed());
        }

        Ok(())
    }

    /// Path of the reconstructed image for `input_path`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, &format!("{OUTPUT_SUFFIX}.png"))
    }

    /// Directory receiving numbered snapshot frames for `input_path`
    pub fn get_frames_dir(input_path: &Path) -> PathBuf {
        sibling_path(input_path, FRAMES_SUFFIX)
    }

    /// Path of the animated GIF for `input_path`
    pub fn get_gif_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, &format!("{GIF_SUFFIX}.gif"))
    }
}

// `<parent>/<stem><suffix>`
fn sibling_path(input_path: &Path, suffix: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Check the extension against the supported source formats, ignoring case
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// True for images this tool wrote itself, so reruns on a directory skip them
///
/// A `<name>_quad.png` only counts as generated when a source `<name>.<ext>`
/// sits next to it; otherwise it is a user image that happens to share the
/// suffix.
pub fn is_generated_output(path: &Path) -> bool {
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    let Some(source_stem) = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.strip_suffix(OUTPUT_SUFFIX))
    else {
        return false;
    };

    is_png
        && SUPPORTED_EXTENSIONS
            .iter()
            .flat_map(|ext| [ext.to_ascii_lowercase(), ext.to_ascii_uppercase()])
            .any(|ext| path.with_file_name(format!("{source_stem}.{ext}")).is_file())
}
