//! Weighted directed graph with label-indexed vertices.
//!
//! A [`Graph`] is parsed once from a Graphviz-style edge list (see
//! [`Graph::from_dot`]) and is immutable afterwards. Vertex indices are
//! assigned by the lexicographic order of the labels observed during
//! parsing, so the same label set always maps to the same indices.
//!
//! The graph also owns the tour canonicalization used to decide when two
//! Hamiltonian cycles are the same cycle (equal under rotation, and under
//! reversal for de-duplication purposes).

mod dot;
pub mod generate;

use std::collections::HashMap;

/// Immutable weighted directed adjacency matrix with a label↔index map.
///
/// Missing edges are stored as `f64::INFINITY`; self-loops are 0.
#[derive(Debug, Clone)]
pub struct Graph {
    labels: Vec<String>,
    label_index: HashMap<String, usize>,
    weights: Vec<Vec<f64>>,
}

impl Graph {
    pub(crate) fn from_parts(labels: Vec<String>, weights: Vec<Vec<f64>>) -> Self {
        let label_index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Self {
            labels,
            label_index,
            weights,
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Label of vertex `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    /// All labels in index order (lexicographically sorted).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index assigned to `label`, if the label exists.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.label_index.get(label).copied()
    }

    /// Weight of the directed edge `from -> to`; `f64::INFINITY` means the
    /// edge does not exist.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.weights[from][to]
    }

    /// Renders a tour as `"L0->L1->...->L0"`.
    pub fn format_tour(&self, tour: &[usize]) -> String {
        let mut out = String::new();
        for &index in tour {
            if !out.is_empty() {
                out.push_str("->");
            }
            out.push_str(&self.labels[index]);
        }
        out
    }

    /// Canonical form of a Hamiltonian cycle.
    ///
    /// Accepts an open (`[a, b, c]`) or closed (`[a, b, c, a]`) sequence
    /// and returns the closed rotation (or reversed rotation) whose
    /// `>`-joined label string is lexicographically minimal. A cycle is the
    /// same cycle no matter where the ant started, so all rotations — and,
    /// for de-duplication purposes, the reverse traversal — collapse to one
    /// representative.
    pub fn canonicalize_tour(&self, tour: &[usize]) -> Vec<usize> {
        if tour.len() <= 1 {
            return tour.to_vec();
        }
        let mut cycle = tour.to_vec();
        if cycle.first() == cycle.last() {
            cycle.pop();
        }
        if cycle.is_empty() {
            return tour.to_vec();
        }
        let n = cycle.len();

        let key_of = |start: usize, reverse: bool| -> String {
            let mut key = String::with_capacity(n * 4);
            for step in 0..n {
                let position = if reverse {
                    (start + n - step) % n
                } else {
                    (start + step) % n
                };
                if !key.is_empty() {
                    key.push('>');
                }
                key.push_str(&self.labels[cycle[position]]);
            }
            key
        };

        let mut best_start = 0;
        let mut best_reverse = false;
        let mut best_key = key_of(0, false);
        for start in 0..n {
            for reverse in [false, true] {
                let key = key_of(start, reverse);
                if key < best_key {
                    best_key = key;
                    best_start = start;
                    best_reverse = reverse;
                }
            }
        }

        let mut result = Vec::with_capacity(n + 1);
        for step in 0..n {
            let position = if best_reverse {
                (best_start + n - step) % n
            } else {
                (best_start + step) % n
            };
            result.push(cycle[position]);
        }
        result.push(result[0]);
        result
    }
}
