//! Worst-region-first quadtree subdivision driver
//!
//! Each iteration pops the frontier region with the highest error score, splits
//! it into four quadrants at its midpoint, scores and queues the quadrants, and
//! paints them onto a [`Canvas`]. Popped rectangles accumulate as boundaries
//! that snapshots may outline.

use crate::algorithm::heap::ErrorHeap;
use crate::analysis::{ScoredRegion, score_region};
use crate::io::configuration::{DEFAULT_ITERATIONS, DEFAULT_SNAPSHOT_EVERY};
use crate::io::error::{QuadError, Result, invalid_parameter};
use crate::spatial::{Color, PixelSource, Rect};
use tracing::debug;

/// Receiver of paint and snapshot events
///
/// The driver borrows its canvas mutably for the length of a run; painting
/// accumulates the reconstruction while snapshots only observe it.
pub trait Canvas {
    /// Fill `rect` with `color`
    fn paint(&mut self, rect: Rect, color: Color);

    /// Capture a frame after `iteration` completed
    ///
    /// `boundaries` lists every popped rectangle so far, in pop order.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the frame fails
    fn snapshot(&mut self, iteration: usize, boundaries: &[Rect]) -> Result<()> {
        let _ = (iteration, boundaries);
        Ok(())
    }
}

/// A single recorded paint event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintEvent {
    /// Painted area
    pub rect: Rect,
    /// Solid fill color
    pub color: Color,
}

impl Canvas for Vec<PaintEvent> {
    fn paint(&mut self, rect: Rect, color: Color) {
        self.push(PaintEvent { rect, color });
    }
}

/// Iteration budget and snapshot stride
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubdivisionConfig {
    /// Number of regions to pop and split
    pub iterations: usize,
    /// Snapshot every n-th iteration, starting with iteration 0
    pub snapshot_every: usize,
}

impl Default for SubdivisionConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            snapshot_every: DEFAULT_SNAPSHOT_EVERY,
        }
    }
}

impl SubdivisionConfig {
    /// Check parameters before a run
    ///
    /// # Errors
    ///
    /// Returns an error if `snapshot_every` is zero
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_every == 0 {
            return Err(invalid_parameter(
                "snapshot_every",
                &self.snapshot_every,
                &"snapshot stride must be at least 1",
            ));
        }
        Ok(())
    }

    /// Whether the given 0-based iteration ends with a snapshot
    pub const fn snapshot_due(&self, iteration: usize) -> bool {
        matches!(iteration.checked_rem(self.snapshot_every), Some(0))
    }
}

/// Outcome of one pop-and-split iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitStep {
    /// 0-based iteration index
    pub iteration: usize,
    /// Region removed from the frontier
    pub popped: ScoredRegion,
    /// Scored quadrants in top-left, top-right, bottom-left, bottom-right order
    pub quadrants: [ScoredRegion; 4],
}

/// Totals reported after a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Iterations performed
    pub iterations: usize,
    /// Paint events emitted
    pub paint_events: usize,
    /// Regions left in the frontier
    pub frontier_len: usize,
    /// Error score of the last popped region
    pub last_error: Option<f64>,
}

/// Owns the frontier and boundary history for one pixel source
pub struct Subdivider<'a, P: PixelSource + ?Sized> {
    pixels: &'a P,
    frontier: ErrorHeap,
    boundaries: Vec<Rect>,
    iteration: usize,
}

impl<'a, P: PixelSource + ?Sized> Subdivider<'a, P> {
    /// Seed the frontier with a single region covering the whole source
    pub fn new(pixels: &'a P) -> Self {
        let mut frontier = ErrorHeap::new();
        frontier.push(score_region(pixels, pixels.bounds()));

        Self {
            pixels,
            frontier,
            boundaries: Vec::new(),
            iteration: 0,
        }
    }

    /// Regions not yet subdivided
    pub const fn frontier(&self) -> &ErrorHeap {
        &self.frontier
    }

    /// Popped rectangles in pop order
    pub fn boundaries(&self) -> &[Rect] {
        &self.boundaries
    }

    /// Number of iterations performed so far
    pub const fn iterations_completed(&self) -> usize {
        self.iteration
    }

    /// Pop the worst region, split it and queue the scored quadrants
    ///
    /// Emits nothing; use [`Subdivider::advance`] to drive a canvas.
    ///
    /// # Errors
    ///
    /// Returns [`QuadError::EmptyFrontier`] if the frontier has no region to pop
    pub fn step(&mut self) -> Result<SplitStep> {
        let iteration = self.iteration;
        let popped = self
            .frontier
            .pop_max()
            .ok_or(QuadError::EmptyFrontier { iteration })?;

        let pixels = self.pixels;
        let quadrants = popped
            .rect()
            .quadrants()
            .map(|rect| score_region(pixels, rect));

        self.frontier.extend(quadrants);
        self.boundaries.push(popped.rect());
        self.iteration += 1;

        debug!(
            iteration,
            rect = %popped.rect(),
            error = popped.error_score(),
            frontier = self.frontier.len(),
            "split region"
        );

        Ok(SplitStep {
            iteration,
            popped,
            quadrants,
        })
    }

    /// Run one iteration, painting the quadrants and snapshotting when due
    ///
    /// # Errors
    ///
    /// Returns an error if the frontier is empty or the canvas fails to snapshot
    pub fn advance<C: Canvas + ?Sized>(
        &mut self,
        config: &SubdivisionConfig,
        canvas: &mut C,
    ) -> Result<SplitStep> {
        let step = self.step()?;

        for quadrant in &step.quadrants {
            canvas.paint(quadrant.rect(), quadrant.average_color());
        }

        if config.snapshot_due(step.iteration) {
            canvas.snapshot(step.iteration, &self.boundaries)?;
        }

        Ok(step)
    }

    /// Run `config.iterations` iterations against `canvas`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the frontier runs
    /// empty, or a snapshot fails
    pub fn run<C: Canvas + ?Sized>(
        &mut self,
        config: &SubdivisionConfig,
        canvas: &mut C,
    ) -> Result<RunSummary> {
        config.validate()?;

        let mut paint_events = 0;
        let mut last_error = None;
        for _ in 0..config.iterations {
            let step = self.advance(config, canvas)?;
            paint_events += step.quadrants.len();
            last_error = Some(step.popped.error_score());
        }

        Ok(RunSummary {
            iterations: config.iterations,
            paint_events,
            frontier_len: self.frontier.len(),
            last_error,
        })
    }
}

/// Subdivide `pixels` from scratch, streaming events into `canvas`
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a snapshot fails
pub fn subdivide<P, C>(
    pixels: &P,
    config: &SubdivisionConfig,
    canvas: &mut C,
) -> Result<RunSummary>
where
    P: PixelSource + ?Sized,
    C: Canvas + ?Sized,
{
    Subdivider::new(pixels).run(config, canvas)
}
