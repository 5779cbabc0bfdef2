//! Max-error priority queue over scored regions

use crate::analysis::ScoredRegion;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Orders regions by error score alone
///
/// Uses the IEEE total order so the heap stays consistent even if a score
/// were ever NaN. Ties are resolved by the heap layout.
#[derive(Debug, Clone, Copy)]
struct ByError(ScoredRegion);

impl PartialEq for ByError {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByError {}

impl PartialOrd for ByError {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByError {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.error_score().total_cmp(&other.0.error_score())
    }
}

/// Array-backed binary max-heap yielding the worst-approximated region first
///
/// Holds the frontier of regions that have not been subdivided yet. Regions are
/// moved in and out whole; nothing is rescored in place.
#[derive(Debug, Clone, Default)]
pub struct ErrorHeap {
    regions: BinaryHeap<ByError>,
}

impl ErrorHeap {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` regions
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            regions: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Insert a region, O(log n)
    pub fn push(&mut self, region: ScoredRegion) {
        self.regions.push(ByError(region));
    }

    /// Remove and return the region with the highest error score, O(log n)
    pub fn pop_max(&mut self) -> Option<ScoredRegion> {
        self.regions.pop().map(|ByError(region)| region)
    }

    /// Number of queued regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when no region is queued
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate queued regions in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &ScoredRegion> {
        self.regions.iter().map(|ByError(region)| region)
    }
}

impl Extend<ScoredRegion> for ErrorHeap {
    fn extend<I: IntoIterator<Item = ScoredRegion>>(&mut self, iter: I) {
        self.regions.extend(iter.into_iter().map(ByError));
    }
}

impl FromIterator<ScoredRegion> for ErrorHeap {
    fn from_iter<I: IntoIterator<Item = ScoredRegion>>(iter: I) -> Self {
        Self {
            regions: iter.into_iter().map(ByError).collect(),
        }
    }
}
