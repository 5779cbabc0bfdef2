//! Snapshot capture: numbered PNG frames and animated GIF export

use crate::algorithm::subdivision::{Canvas, PaintEvent};
use crate::io::canvas::{OutlineStyle, RasterCanvas};
use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{QuadError, Result, invalid_parameter};
use crate::io::image::save_png;
use crate::spatial::{Color, Rect};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::path::{Path, PathBuf};

/// Canvas wrapper that turns snapshot events into frames
///
/// Paint events go straight to the wrapped [`RasterCanvas`]. On each snapshot
/// a frame is rendered (with boundary crosses when an outline style is set)
/// and optionally written to `<frames_dir>/<iteration>.png`. For GIF export
/// only the paint log and a mark per snapshot are kept; frames are rebuilt
/// one at a time in [`FrameRecorder::export_gif`].
pub struct FrameRecorder {
    canvas: RasterCanvas,
    outline: Option<OutlineStyle>,
    frames_dir: Option<PathBuf>,
    history: Option<PaintHistory>,
    snapshot_count: usize,
}

/// Everything needed to replay the canvas state at each snapshot
struct PaintHistory {
    initial: RgbaImage,
    paints: Vec<PaintEvent>,
    boundaries: Vec<Rect>,
    marks: Vec<SnapshotMark>,
}

/// Paint and boundary log lengths when a snapshot was taken
#[derive(Clone, Copy)]
struct SnapshotMark {
    paints: usize,
    boundaries: usize,
}

impl PaintHistory {
    const fn new(initial: RgbaImage) -> Self {
        Self {
            initial,
            paints: Vec::new(),
            boundaries: Vec::new(),
            marks: Vec::new(),
        }
    }

    // Boundaries arrive as the full pop history, so only the unseen tail is appended
    fn mark(&mut self, boundaries: &[Rect]) {
        if let Some(unseen) = boundaries.get(self.boundaries.len()..) {
            self.boundaries.extend_from_slice(unseen);
        }
        self.marks.push(SnapshotMark {
            paints: self.paints.len(),
            boundaries: boundaries.len().min(self.boundaries.len()),
        });
    }
}

impl FrameRecorder {
    /// Record snapshots of `canvas` without persisting anything yet
    pub const fn new(canvas: RasterCanvas) -> Self {
        Self {
            canvas,
            outline: None,
            frames_dir: None,
            history: None,
            snapshot_count: 0,
        }
    }

    /// Overlay boundary crosses on every frame
    #[must_use]
    pub const fn with_outline(mut self, style: OutlineStyle) -> Self {
        self.outline = Some(style);
        self
    }

    /// Write every frame as a numbered PNG into `dir`
    #[must_use]
    pub fn with_frames_dir(mut self, dir: PathBuf) -> Self {
        self.frames_dir = Some(dir);
        self
    }

    /// Log paints and snapshots so they can be exported as a GIF
    #[must_use]
    pub fn keeping_frames(mut self) -> Self {
        self.history = Some(PaintHistory::new(self.canvas.image().clone()));
        self
    }

    /// Accumulated reconstruction
    pub const fn canvas(&self) -> &RasterCanvas {
        &self.canvas
    }

    /// Release the accumulated reconstruction
    pub fn into_canvas(self) -> RasterCanvas {
        self.canvas
    }

    /// Snapshots available for GIF export
    pub fn kept_frames(&self) -> usize {
        self.history.as_ref().map_or(0, |history| history.marks.len())
    }

    /// Number of snapshot events received
    pub const fn snapshot_count(&self) -> usize {
        self.snapshot_count
    }

    /// Path of the numbered PNG for `iteration` inside `dir`
    pub fn frame_path(dir: &Path, iteration: usize) -> PathBuf {
        dir.join(format!("{iteration}.png"))
    }

    /// Encode the kept snapshots as a looping GIF with automatic frame skipping
    ///
    /// Delays shorter than viewers honour are raised to the viewer minimum and
    /// frames are dropped to keep the apparent speed. The last frame is always
    /// kept and shown longer. Frames are replayed from the paint log and
    /// encoded as they are rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were kept
    /// - `frame_delay_ms` is zero
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        let Some(history) = self
            .history
            .as_ref()
            .filter(|history| !history.marks.is_empty())
        else {
            return Err(QuadError::InvalidSourceData {
                reason: "No snapshot frames captured for GIF export".to_string(),
            });
        };
        if frame_delay_ms == 0 {
            return Err(invalid_parameter(
                "frame_delay_ms",
                &frame_delay_ms,
                &"frame delay must be at least 1 ms",
            ));
        }

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms).max(1) as usize;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| QuadError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| QuadError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let export_error = |source| QuadError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        };

        let mut encoder = GifEncoder::new(file);
        encoder.set_repeat(Repeat::Infinite).map_err(export_error)?;

        let delay = Delay::from_numer_denom_ms(effective_delay_ms, 1);
        let last_index = history.marks.len().saturating_sub(1);
        let mut replay = RasterCanvas::from_image(history.initial.clone());
        let mut replayed = 0;
        let mut final_frame = None;

        for (index, mark) in history.marks.iter().enumerate() {
            for event in history.paints.get(replayed..mark.paints).unwrap_or_default() {
                replay.paint(event.rect, event.color);
            }
            replayed = mark.paints;

            if index % skip_factor != 0 && index != last_index {
                continue;
            }

            let boundaries = history
                .boundaries
                .get(..mark.boundaries)
                .unwrap_or_default();
            let frame = self.render(&replay, boundaries);
            if index == last_index {
                final_frame = Some(frame.clone());
            }
            encoder
                .encode_frame(Frame::from_parts(frame, 0, 0, delay))
                .map_err(export_error)?;
        }

        // Final frame displays longer so the finished reconstruction is visible
        if let Some(frame) = final_frame {
            let hold_ms = effective_delay_ms.saturating_mul(FINAL_FRAME_HOLD);
            let hold = Delay::from_numer_denom_ms(hold_ms, 1);
            encoder
                .encode_frame(Frame::from_parts(frame, 0, 0, hold))
                .map_err(export_error)?;
        }

        Ok(())
    }

    fn render(&self, canvas: &RasterCanvas, boundaries: &[Rect]) -> RgbaImage {
        match &self.outline {
            Some(style) => canvas.outlined(boundaries, style),
            None => canvas.image().clone(),
        }
    }
}

impl Canvas for FrameRecorder {
    fn paint(&mut self, rect: Rect, color: Color) {
        self.canvas.paint(rect, color);
        if let Some(history) = &mut self.history {
            history.paints.push(PaintEvent { rect, color });
        }
    }

    fn snapshot(&mut self, iteration: usize, boundaries: &[Rect]) -> Result<()> {
        if let Some(dir) = &self.frames_dir {
            let frame = self.render(&self.canvas, boundaries);
            save_png(&frame, &Self::frame_path(dir, iteration))?;
        }

        if let Some(history) = &mut self.history {
            history.mark(boundaries);
        }

        self.snapshot_count += 1;
        Ok(())
    }
}
