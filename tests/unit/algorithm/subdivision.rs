//! Tests for the subdivision driver loop, paint ordering and snapshots

#[cfg(test)]
mod tests {
    use bitvec::prelude::*;
    use image::{ImageBuffer, Rgba};
    use quadart::algorithm::subdivision::{
        Canvas, PaintEvent, SubdivisionConfig, Subdivider, subdivide,
    };
    use quadart::io::configuration::{DEFAULT_ITERATIONS, DEFAULT_SNAPSHOT_EVERY};
    use quadart::io::error::{QuadError, Result};
    use quadart::spatial::{Color, Rect};

    type Image16 = ImageBuffer<Rgba<u16>, Vec<u16>>;

    fn gradient(width: u32, height: u32) -> Image16 {
        let mut img = Image16::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let r = (x * 65535 / width.max(1)) as u16;
            let g = (y * 65535 / height.max(1)) as u16;
            *pixel = Rgba([r, g, r ^ g, 65535]);
        }
        img
    }

    /// Records snapshot iterations and boundary counts
    #[derive(Default)]
    struct SnapshotLog {
        paints: Vec<PaintEvent>,
        snapshots: Vec<(usize, usize)>,
    }

    impl Canvas for SnapshotLog {
        fn paint(&mut self, rect: Rect, color: Color) {
            self.paints.push(PaintEvent { rect, color });
        }

        fn snapshot(&mut self, iteration: usize, boundaries: &[Rect]) -> Result<()> {
            self.snapshots.push((iteration, boundaries.len()));
            Ok(())
        }
    }

    struct FailingSnapshots;

    impl Canvas for FailingSnapshots {
        fn paint(&mut self, _: Rect, _: Color) {}

        fn snapshot(&mut self, iteration: usize, _: &[Rect]) -> Result<()> {
            Err(QuadError::InvalidSourceData {
                reason: format!("snapshot {iteration} rejected"),
            })
        }
    }

    fn config(iterations: usize, snapshot_every: usize) -> SubdivisionConfig {
        SubdivisionConfig {
            iterations,
            snapshot_every,
        }
    }

    // Tests N iterations give 4N paints and a frontier of 1 + 3N regions
    // Verified by skipping the push of the last quadrant
    #[test]
    fn test_event_and_frontier_counts() {
        let img = gradient(37, 23);

        for iterations in [0, 1, 2, 10, 57] {
            let mut paints: Vec<PaintEvent> = Vec::new();
            let summary = subdivide(&img, &config(iterations, 5), &mut paints)
                .expect("subdivision should succeed");

            assert_eq!(paints.len(), 4 * iterations);
            assert_eq!(summary.paint_events, 4 * iterations);
            assert_eq!(summary.frontier_len, 1 + 3 * iterations);
            assert_eq!(summary.iterations, iterations);
            assert_eq!(summary.last_error.is_some(), iterations > 0);
        }
    }

    // Tests the frontier partitions the image after every iteration
    // Verified by splitting at mid + 1 on the right quadrants
    #[test]
    fn test_frontier_partitions_image() {
        let img = gradient(19, 13);
        let bounds = Rect::from_size(19, 13);
        let mut subdivider = Subdivider::new(&img);

        for _ in 0..40 {
            subdivider.step().expect("step should succeed");

            let mut covered = bitvec![0; bounds.area() as usize];
            for region in subdivider.frontier().iter() {
                assert!(bounds.contains_rect(&region.rect()));
                for (x, y) in region.rect().pixels() {
                    let index = (y * bounds.width() + x) as usize;
                    assert!(!covered[index], "pixel ({x}, {y}) covered twice");
                    covered.set(index, true);
                }
            }
            assert!(covered.all(), "frontier leaves pixels uncovered");
        }
    }

    // Tests every split pops the current maximum and paints its quadrants in order
    // Verified by painting quadrants in reverse order
    #[test]
    fn test_step_pops_maximum_and_paints_in_order() {
        let img = gradient(16, 16);
        let mut subdivider = Subdivider::new(&img);
        let mut canvas: Vec<PaintEvent> = Vec::new();
        let cfg = config(1, 1);

        for iteration in 0..20 {
            let expected_max = subdivider
                .frontier()
                .iter()
                .map(|r| r.error_score())
                .fold(f64::NEG_INFINITY, f64::max);

            let step = subdivider
                .advance(&cfg, &mut canvas)
                .expect("advance should succeed");

            assert_eq!(step.iteration, iteration);
            assert_eq!(step.popped.error_score(), expected_max);
            assert_eq!(step.popped.rect().quadrants(), step.quadrants.map(|q| q.rect()));

            let painted = canvas.get(canvas.len() - 4..).unwrap_or_default();
            for (event, quadrant) in painted.iter().zip(&step.quadrants) {
                assert_eq!(event.rect, quadrant.rect());
                assert_eq!(event.color, quadrant.average_color());
            }
        }
        assert_eq!(subdivider.iterations_completed(), 20);
    }

    // Tests boundaries record popped rectangles in pop order
    // Verified by recording the first quadrant instead of the popped region
    #[test]
    fn test_boundaries_in_pop_order() {
        let img = gradient(32, 8);
        let mut subdivider = Subdivider::new(&img);

        let popped: Vec<Rect> = (0..12)
            .map(|_| subdivider.step().map(|s| s.popped.rect()))
            .collect::<Result<_>>()
            .expect("steps should succeed");

        assert_eq!(subdivider.boundaries(), popped.as_slice());
        assert_eq!(popped.first(), Some(&Rect::from_size(32, 8)));
    }

    // Tests snapshots fire on every n-th iteration starting at 0
    // Verified by snapshotting when (iteration + 1) % n == 0
    #[test]
    fn test_snapshot_cadence() {
        let img = gradient(8, 8);
        let mut log = SnapshotLog::default();

        subdivide(&img, &config(12, 5), &mut log).expect("subdivision should succeed");

        assert_eq!(log.snapshots, vec![(0, 1), (5, 6), (10, 11)]);
        assert_eq!(log.paints.len(), 48);
    }

    #[test]
    fn test_snapshot_every_iteration() {
        let img = gradient(4, 4);
        let mut log = SnapshotLog::default();

        subdivide(&img, &config(3, 1), &mut log).expect("subdivision should succeed");

        assert_eq!(log.snapshots, vec![(0, 1), (1, 2), (2, 3)]);
    }

    // Tests a zero snapshot stride is rejected before any work
    // Verified by removing the validate call from run
    #[test]
    fn test_zero_snapshot_stride_rejected() {
        let img = gradient(4, 4);
        let mut paints: Vec<PaintEvent> = Vec::new();

        let result = subdivide(&img, &config(3, 0), &mut paints);

        assert!(matches!(
            result,
            Err(QuadError::InvalidParameter {
                parameter: "snapshot_every",
                ..
            })
        ));
        assert!(paints.is_empty());
    }

    #[test]
    fn test_snapshot_failure_propagates() {
        let img = gradient(4, 4);

        let result = subdivide(&img, &config(3, 1), &mut FailingSnapshots);

        assert!(matches!(result, Err(QuadError::InvalidSourceData { .. })));
    }

    // Tests a 1x1 source keeps splitting into degenerate pieces without failing
    // Verified by removing the empty-area guard in average_color
    #[test]
    fn test_single_pixel_source_runs_to_completion() {
        let img = Image16::from_pixel(1, 1, Rgba([7, 8, 9, 65535]));
        let mut paints: Vec<PaintEvent> = Vec::new();

        let summary = subdivide(&img, &config(25, 5), &mut paints).expect("subdivision should succeed");

        assert_eq!(summary.frontier_len, 76);
        assert_eq!(summary.last_error, Some(0.0));
        assert!(
            paints
                .iter()
                .filter(|event| !event.rect.is_empty())
                .all(|event| event.color == Rgba([7, 8, 9, 65535]))
        );
    }

    #[test]
    fn test_snapshot_due() {
        let cfg = config(10, 3);
        assert!(cfg.snapshot_due(0));
        assert!(!cfg.snapshot_due(1));
        assert!(cfg.snapshot_due(6));

        assert!(!config(10, 0).snapshot_due(0));
    }

    #[test]
    fn test_default_config() {
        let cfg = SubdivisionConfig::default();

        assert_eq!(cfg.iterations, DEFAULT_ITERATIONS);
        assert_eq!(cfg.snapshot_every, DEFAULT_SNAPSHOT_EVERY);
        assert!(cfg.validate().is_ok());
    }
}
