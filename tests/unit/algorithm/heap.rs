//! Tests for the max-error priority queue

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgba};
    use quadart::algorithm::heap::ErrorHeap;
    use quadart::analysis::{ScoredRegion, score_region};
    use quadart::spatial::Rect;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    type Image16 = ImageBuffer<Rgba<u16>, Vec<u16>>;

    // Pixel pair `i` is (0, 2 * errors[i]) in red, so region `i` scores exactly errors[i]
    fn regions_with_errors(errors: &[u16]) -> Vec<ScoredRegion> {
        let mut img = Image16::new(errors.len() as u32 * 2, 1);
        for (i, &error) in errors.iter().enumerate() {
            img.put_pixel(i as u32 * 2 + 1, 0, Rgba([error * 2, 0, 0, 0]));
        }

        (0..errors.len() as u32)
            .map(|i| score_region(&img, Rect::new(i * 2, 0, i * 2 + 2, 1)))
            .collect()
    }

    fn drain_scores(heap: &mut ErrorHeap) -> Vec<f64> {
        std::iter::from_fn(|| heap.pop_max())
            .map(|region| region.error_score())
            .collect()
    }

    // Tests regions come out in descending error order
    // Verified by inverting the comparison in Ord
    #[test]
    fn test_pop_max_descending() {
        let mut heap = ErrorHeap::new();
        for region in regions_with_errors(&[5, 40, 1, 17, 40, 0, 3]) {
            heap.push(region);
        }

        assert_eq!(heap.len(), 7);
        assert_eq!(
            drain_scores(&mut heap),
            vec![40.0, 40.0, 17.0, 5.0, 3.0, 1.0, 0.0]
        );
        assert!(heap.is_empty());
    }

    #[test]
    fn test_empty_heap() {
        let mut heap = ErrorHeap::with_capacity(4);

        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(heap.pop_max().is_none());
    }

    // Tests regions are returned whole and unchanged
    // Verified by rescoring regions on extraction
    #[test]
    fn test_regions_not_mutated() {
        let regions = regions_with_errors(&[7, 3]);
        let mut heap = ErrorHeap::new();
        heap.extend(regions.iter().copied());

        assert_eq!(heap.pop_max(), regions.first().copied());
        assert_eq!(heap.pop_max(), regions.get(1).copied());
    }

    // Tests interleaved pushes and pops always yield the current maximum
    // Verified by returning the most recently pushed region from pop_max
    #[test]
    fn test_interleaved_operations_match_sorted_reference() {
        let mut rng = StdRng::seed_from_u64(7);
        let errors: Vec<u16> = (0..64).map(|_| rng.random_range(0..1000)).collect();
        let mut pool = regions_with_errors(&errors).into_iter();

        let mut heap = ErrorHeap::new();
        let mut reference: Vec<f64> = Vec::new();

        for _ in 0..200 {
            let push = rng.random_bool(0.6) || reference.is_empty();
            if push {
                let Some(region) = pool.next() else { break };
                reference.push(region.error_score());
                heap.push(region);
            } else {
                reference.sort_by(f64::total_cmp);
                let expected = reference.pop();
                assert_eq!(heap.pop_max().map(|r| r.error_score()), expected);
            }
            assert_eq!(heap.len(), reference.len());
        }
    }

    #[test]
    fn test_iter_visits_all_regions() {
        let heap: ErrorHeap = regions_with_errors(&[1, 2, 3, 4]).into_iter().collect();

        let mut scores: Vec<f64> = heap.iter().map(ScoredRegion::error_score).collect();
        scores.sort_by(f64::total_cmp);

        assert_eq!(scores, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
