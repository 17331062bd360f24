//! Pheromone field and per-iteration reduction buffers.

use super::types::AntPath;

/// Floor applied after every update to keep the field from collapsing to
/// zero under full evaporation.
pub const PHEROMONE_FLOOR: f64 = 1e-12;

/// N×N pheromone matrix τ.
///
/// Read-only while an iteration's ants are walking; written exactly once
/// per iteration by [`PheromoneField::apply`].
#[derive(Debug, Clone)]
pub struct PheromoneField {
    values: Vec<Vec<f64>>,
}

impl PheromoneField {
    /// Uniform initial field of 1.0.
    pub fn new(n: usize) -> Self {
        Self {
            values: vec![vec![1.0; n]; n],
        }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from][to]
    }

    /// Applies one iteration's update: evaporate the whole field once, add
    /// the accumulated deposits, clamp to [`PHEROMONE_FLOOR`].
    pub fn apply(&mut self, delta: &DeltaBuffer, evaporation: f64) {
        let keep = 1.0 - evaporation;
        for (row, delta_row) in self.values.iter_mut().zip(&delta.values) {
            for (tau, d) in row.iter_mut().zip(delta_row) {
                *tau = (keep * *tau + *d).max(PHEROMONE_FLOOR);
            }
        }
    }
}

/// Per-iteration deposit accumulator Δ.
///
/// The sequential runner owns a single buffer; the parallel runner gives
/// each worker its own and sums them element-wise before the field update,
/// so workers never contend on the shared matrix.
#[derive(Debug, Clone)]
pub struct DeltaBuffer {
    values: Vec<Vec<f64>>,
}

impl DeltaBuffer {
    pub fn new(n: usize) -> Self {
        Self {
            values: vec![vec![0.0; n]; n],
        }
    }

    /// Credits every edge of a successful tour with `q / length`.
    pub fn deposit(&mut self, path: &AntPath, q: f64) {
        if path.vertices.len() < 2 || !path.length.is_finite() {
            return;
        }
        let deposit = q / path.length;
        for pair in path.vertices.windows(2) {
            self.values[pair[0]][pair[1]] += deposit;
        }
    }

    /// Element-wise sum of another buffer into this one.
    pub fn merge(&mut self, other: &DeltaBuffer) {
        for (row, other_row) in self.values.iter_mut().zip(&other.values) {
            for (value, o) in row.iter_mut().zip(other_row) {
                *value += *o;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour(vertices: Vec<usize>, length: f64) -> AntPath {
        AntPath { vertices, length }
    }

    #[test]
    fn test_initial_field_is_uniform() {
        let field = PheromoneField::new(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(field.get(i, j), 1.0);
            }
        }
    }

    #[test]
    fn test_apply_evaporates_then_deposits() {
        let mut field = PheromoneField::new(2);
        let mut delta = DeltaBuffer::new(2);
        delta.deposit(&tour(vec![0, 1, 0], 10.0), 100.0);
        field.apply(&delta, 0.5);
        // 0.5 * 1.0 + 100/10 on both traversed edges.
        assert!((field.get(0, 1) - 10.5).abs() < 1e-12);
        assert!((field.get(1, 0) - 10.5).abs() < 1e-12);
        // Untouched entries only evaporate.
        assert!((field.get(0, 0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_full_evaporation_clamps_to_floor() {
        let mut field = PheromoneField::new(4);
        let empty = DeltaBuffer::new(4);
        for _ in 0..200 {
            field.apply(&empty, 1.0);
        }
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(field.get(i, j), PHEROMONE_FLOOR);
            }
        }
    }

    #[test]
    fn test_entries_stay_finite_and_floored() {
        let mut field = PheromoneField::new(3);
        let mut delta = DeltaBuffer::new(3);
        delta.deposit(&tour(vec![0, 1, 2, 0], 3.0), 100.0);
        for _ in 0..50 {
            field.apply(&delta, 0.9);
        }
        for i in 0..3 {
            for j in 0..3 {
                let tau = field.get(i, j);
                assert!(tau.is_finite());
                assert!(tau >= PHEROMONE_FLOOR);
            }
        }
    }

    #[test]
    fn test_deposit_is_proportional_to_quality() {
        let mut delta = DeltaBuffer::new(3);
        delta.deposit(&tour(vec![0, 1, 2, 0], 50.0), 100.0);
        delta.deposit(&tour(vec![0, 1, 2, 0], 50.0), 100.0);
        assert!((delta.values[0][1] - 4.0).abs() < 1e-12);
        assert!((delta.values[2][0] - 4.0).abs() < 1e-12);
        assert_eq!(delta.values[1][0], 0.0);
    }

    #[test]
    fn test_degenerate_deposits_are_ignored() {
        let mut delta = DeltaBuffer::new(3);
        delta.deposit(&tour(vec![], f64::INFINITY), 100.0);
        delta.deposit(&tour(vec![0], 5.0), 100.0);
        for row in &delta.values {
            assert!(row.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_merge_sums_elementwise() {
        let mut a = DeltaBuffer::new(2);
        let mut b = DeltaBuffer::new(2);
        a.deposit(&tour(vec![0, 1, 0], 10.0), 100.0);
        b.deposit(&tour(vec![0, 1, 0], 20.0), 100.0);
        a.merge(&b);
        assert!((a.values[0][1] - 15.0).abs() < 1e-12);
        assert!((a.values[1][0] - 15.0).abs() < 1e-12);
    }
}
