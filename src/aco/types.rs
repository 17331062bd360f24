//! Tour data types and best-result aggregation.

use crate::graph::Graph;

/// Tolerance for tour-length comparisons, used both as the strict
/// improvement gap and as the equality window of the best-set.
pub(crate) const LENGTH_EPS: f64 = 1e-9;

pub(crate) fn lengths_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= LENGTH_EPS
}

/// A single ant's closed tour.
///
/// `vertices` holds N+1 indices, starting and ending at the same vertex;
/// `length` is the sum of edge weights along the sequence. Dead-end walks
/// never become an `AntPath` — construction returns `None` for those.
#[derive(Debug, Clone)]
pub struct AntPath {
    pub vertices: Vec<usize>,
    pub length: f64,
}

/// Outcome of a solver run.
#[derive(Debug, Clone)]
pub struct TourResult {
    /// Smallest finite tour length seen, or `f64::INFINITY` when no ant
    /// ever completed a tour.
    pub best_length: f64,
    /// Canonicalized tours tying `best_length` within tolerance.
    pub best_paths: Vec<Vec<usize>>,
    /// The same tours rendered as `"L0->L1->...->L0"`; unique within the
    /// set and paired index-for-index with `best_paths`.
    pub best_paths_labels: Vec<String>,
    /// Wall time of the run in milliseconds.
    pub elapsed_ms: f64,
}

impl Default for TourResult {
    fn default() -> Self {
        Self {
            best_length: f64::INFINITY,
            best_paths: Vec::new(),
            best_paths_labels: Vec::new(),
            elapsed_ms: 0.0,
        }
    }
}

impl TourResult {
    /// True when at least one tour was found.
    pub fn has_tour(&self) -> bool {
        self.best_length.is_finite()
    }
}

/// Accumulates the set of shortest tours seen so far.
///
/// A strictly shorter tour (by more than the tolerance) replaces the set;
/// a tour tying the current best is canonicalized and appended unless its
/// label string is already present; anything longer is discarded. Workers
/// in the parallel runner keep their own tracker and the coordinator folds
/// them together with [`BestTracker::absorb`] under the same rules.
#[derive(Debug, Clone)]
pub struct BestTracker {
    best_length: f64,
    paths: Vec<Vec<usize>>,
    labels: Vec<String>,
}

impl BestTracker {
    pub fn new() -> Self {
        Self {
            best_length: f64::INFINITY,
            paths: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Offers one completed tour to the set.
    pub fn offer(&mut self, graph: &Graph, path: &AntPath) {
        if path.vertices.is_empty() || !path.length.is_finite() {
            return;
        }
        if self.paths.is_empty() || path.length + LENGTH_EPS < self.best_length {
            let canonical = graph.canonicalize_tour(&path.vertices);
            let label = graph.format_tour(&canonical);
            self.best_length = path.length;
            self.paths.clear();
            self.labels.clear();
            self.paths.push(canonical);
            self.labels.push(label);
        } else if lengths_equal(path.length, self.best_length) {
            let canonical = graph.canonicalize_tour(&path.vertices);
            let label = graph.format_tour(&canonical);
            if !self.labels.contains(&label) {
                self.paths.push(canonical);
                self.labels.push(label);
            }
        }
    }

    /// Folds another tracker into this one. Entries of `other` are already
    /// canonical, so no graph access is needed.
    pub fn absorb(&mut self, other: BestTracker) {
        if other.paths.is_empty() {
            return;
        }
        if self.paths.is_empty() || other.best_length + LENGTH_EPS < self.best_length {
            *self = other;
        } else if lengths_equal(other.best_length, self.best_length) {
            for (path, label) in other.paths.into_iter().zip(other.labels) {
                if !self.labels.contains(&label) {
                    self.paths.push(path);
                    self.labels.push(label);
                }
            }
        }
    }

    pub fn best_length(&self) -> f64 {
        self.best_length
    }

    /// Number of distinct canonical tours currently held.
    pub fn tour_count(&self) -> usize {
        self.paths.len()
    }

    pub fn into_result(self, elapsed_ms: f64) -> TourResult {
        TourResult {
            best_length: self.best_length,
            best_paths: self.paths,
            best_paths_labels: self.labels,
            elapsed_ms,
        }
    }
}

impl Default for BestTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        Graph::from_dot(
            "A -- B [weight=1]\n\
             B -- C [weight=2]\n\
             A -- C [weight=5]\n",
        )
        .unwrap()
    }

    fn path(vertices: Vec<usize>, length: f64) -> AntPath {
        AntPath { vertices, length }
    }

    #[test]
    fn test_starts_empty_and_infinite() {
        let tracker = BestTracker::new();
        assert!(tracker.best_length().is_infinite());
        let result = tracker.into_result(0.0);
        assert!(!result.has_tour());
        assert!(result.best_paths.is_empty());
        assert!(result.best_paths_labels.is_empty());
    }

    #[test]
    fn test_improvement_replaces_set() {
        let graph = triangle();
        let mut tracker = BestTracker::new();
        tracker.offer(&graph, &path(vec![0, 2, 1, 0], 10.0));
        tracker.offer(&graph, &path(vec![0, 1, 2, 0], 8.0));
        assert_eq!(tracker.best_length(), 8.0);
        let result = tracker.into_result(0.0);
        assert_eq!(result.best_paths.len(), 1);
        assert_eq!(result.best_paths_labels, vec!["A->B->C->A"]);
    }

    #[test]
    fn test_tie_appends_distinct_shapes_only() {
        let graph = triangle();
        let mut tracker = BestTracker::new();
        tracker.offer(&graph, &path(vec![0, 1, 2, 0], 8.0));
        // Rotations and the reverse of the same cycle collapse to one entry.
        tracker.offer(&graph, &path(vec![1, 2, 0, 1], 8.0));
        tracker.offer(&graph, &path(vec![0, 2, 1, 0], 8.0));
        let result = tracker.into_result(0.0);
        assert_eq!(result.best_paths.len(), 1);
        assert_eq!(result.best_paths.len(), result.best_paths_labels.len());
    }

    #[test]
    fn test_tie_within_tolerance() {
        let graph = triangle();
        let mut tracker = BestTracker::new();
        tracker.offer(&graph, &path(vec![0, 1, 2, 0], 8.0));
        // A hair longer, but within the equality window and a different
        // shape would still be appended; the same shape is not.
        tracker.offer(&graph, &path(vec![2, 0, 1, 2], 8.0 + 5e-10));
        let result = tracker.into_result(0.0);
        assert_eq!(result.best_paths.len(), 1);
        assert_eq!(result.best_length, 8.0);
    }

    #[test]
    fn test_longer_tour_discarded() {
        let graph = triangle();
        let mut tracker = BestTracker::new();
        tracker.offer(&graph, &path(vec![0, 1, 2, 0], 8.0));
        tracker.offer(&graph, &path(vec![0, 2, 1, 0], 9.0));
        assert_eq!(tracker.best_length(), 8.0);
        assert_eq!(tracker.into_result(0.0).best_paths.len(), 1);
    }

    #[test]
    fn test_non_finite_offers_ignored() {
        let graph = triangle();
        let mut tracker = BestTracker::new();
        tracker.offer(&graph, &path(vec![], f64::INFINITY));
        tracker.offer(&graph, &path(vec![0, 1, 2, 0], f64::NAN));
        assert!(tracker.best_length().is_infinite());
    }

    #[test]
    fn test_absorb_better_replaces() {
        let graph = triangle();
        let mut global = BestTracker::new();
        global.offer(&graph, &path(vec![0, 2, 1, 0], 10.0));
        let mut local = BestTracker::new();
        local.offer(&graph, &path(vec![0, 1, 2, 0], 8.0));
        global.absorb(local);
        assert_eq!(global.best_length(), 8.0);
        assert_eq!(global.into_result(0.0).best_paths_labels, vec!["A->B->C->A"]);
    }

    #[test]
    fn test_absorb_tie_dedups() {
        let graph = triangle();
        let mut global = BestTracker::new();
        global.offer(&graph, &path(vec![0, 1, 2, 0], 8.0));
        let mut local = BestTracker::new();
        local.offer(&graph, &path(vec![2, 0, 1, 2], 8.0));
        global.absorb(local);
        let result = global.into_result(0.0);
        assert_eq!(result.best_paths.len(), 1);
    }

    #[test]
    fn test_absorb_worse_and_empty_ignored() {
        let graph = triangle();
        let mut global = BestTracker::new();
        global.offer(&graph, &path(vec![0, 1, 2, 0], 8.0));
        let mut local = BestTracker::new();
        local.offer(&graph, &path(vec![0, 2, 1, 0], 12.0));
        global.absorb(local);
        global.absorb(BestTracker::new());
        assert_eq!(global.best_length(), 8.0);
        assert_eq!(global.into_result(0.0).best_paths.len(), 1);
    }

    #[test]
    fn test_absorb_into_empty() {
        let graph = triangle();
        let mut local = BestTracker::new();
        local.offer(&graph, &path(vec![0, 1, 2, 0], 8.0));
        let mut global = BestTracker::new();
        global.absorb(local);
        assert_eq!(global.best_length(), 8.0);
    }
}
