//! Random benchmark graph generation.
//!
//! Emits DOT text rather than a [`Graph`] directly so that benchmark runs
//! exercise the same parsing path as real inputs.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};

use super::Graph;

/// Renders DOT text for a random digraph on `vertices` vertices.
///
/// The output always contains the Hamiltonian ring `v0 -> v1 -> ... -> v0`,
/// so every generated instance admits at least one tour. Each vertex gets
/// additional random out-edges up to `max_out_degree`, with weights uniform
/// in `[1, 100)`. Deterministic for a given seed.
pub fn random_dot(vertices: usize, seed: u64, max_out_degree: usize) -> Result<String> {
    if vertices < 2 {
        return Err(Error::invalid_input(
            "generated graph needs at least two vertices",
        ));
    }
    let max_out_degree = max_out_degree.max(1);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut adjacency: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); vertices];
    for from in 0..vertices {
        let to = (from + 1) % vertices;
        adjacency[from].insert(to, rng.random_range(1.0..100.0));
    }
    for from in 0..vertices {
        let mut desired = 1;
        if max_out_degree > 1 {
            desired += rng.random_range(0..max_out_degree);
        }
        let desired = desired.min(max_out_degree).min(vertices - 1);
        while adjacency[from].len() < desired {
            let candidate = rng.random_range(0..vertices);
            if candidate == from || adjacency[from].contains_key(&candidate) {
                continue;
            }
            let weight = rng.random_range(1.0..100.0);
            adjacency[from].insert(candidate, weight);
        }
    }

    let mut out = String::from("digraph G {\n");
    for (from, edges) in adjacency.iter().enumerate() {
        for (to, weight) in edges {
            let _ = writeln!(out, "  v{from} -> v{to} [weight={weight:.6}];");
        }
    }
    out.push_str("}\n");
    Ok(out)
}

/// Generates and parses a random graph in one step.
pub fn random_graph(vertices: usize, seed: u64, max_out_degree: usize) -> Result<Graph> {
    Graph::from_dot(&random_dot(vertices, seed, max_out_degree)?)
}
