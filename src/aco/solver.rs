//! Sequential and parallel ant colony runners.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::graph::Graph;

use super::config::AcoConfig;
use super::pheromone::{DeltaBuffer, PheromoneField};
use super::types::{AntPath, BestTracker, TourResult};

/// Ant colony solver over a borrowed graph.
///
/// The graph is shared read-only with every worker; a solver is cheap to
/// construct and holds no state between runs.
///
/// # Usage
///
/// ```no_run
/// use aco_tsp::aco::{AcoConfig, AcoSolver};
/// use aco_tsp::graph::Graph;
///
/// let graph = Graph::from_dot_file("routes.dot")?;
/// let solver = AcoSolver::new(&graph);
/// let result = solver.run_sequential(&AcoConfig::default());
/// println!("best tour length: {}", result.best_length);
/// # Ok::<(), aco_tsp::Error>(())
/// ```
pub struct AcoSolver<'g> {
    graph: &'g Graph,
}

impl<'g> AcoSolver<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// Runs the single-threaded reference loop.
    pub fn run_sequential(&self, config: &AcoConfig) -> TourResult {
        let n = self.graph.vertex_count();
        log::debug!(
            "aco.sequential: start n={n} ants={} iterations={}",
            config.ants,
            config.iterations
        );
        let start = Instant::now();
        let mut pheromone = PheromoneField::new(n);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut best = BestTracker::new();
        for _ in 0..config.iterations {
            let mut delta = DeltaBuffer::new(n);
            for _ in 0..config.ants {
                if let Some(path) = self.construct_tour(&mut rng, config, &pheromone) {
                    delta.deposit(&path, config.q);
                    best.offer(self.graph, &path);
                }
            }
            pheromone.apply(&delta, config.evaporation);
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::debug!(
            "aco.sequential: done best={:.3} tours={} elapsed_ms={elapsed_ms:.2}",
            best.best_length(),
            best.tour_count()
        );
        best.into_result(elapsed_ms)
    }

    /// Runs the work-partitioned loop on `thread_count` worker threads.
    ///
    /// `thread_count == 0` returns an empty result without starting any
    /// workers. The ant budget is split evenly, the first `ants mod T`
    /// workers taking one extra; each worker accumulates deposits and a
    /// local best-set on its own, and the coordinator folds worker results
    /// in index order before the single pheromone write of the iteration.
    ///
    /// Results are reproducible for a fixed `(config, thread_count)`;
    /// different thread counts draw different sample streams and agree
    /// with the sequential runner in best length only. If the worker pool
    /// cannot be created, the same worker passes run on the calling
    /// thread instead; the result is unchanged, only wall time differs.
    pub fn run_parallel(&self, config: &AcoConfig, thread_count: usize) -> TourResult {
        if thread_count == 0 {
            return TourResult::default();
        }
        let n = self.graph.vertex_count();
        log::debug!(
            "aco.parallel: start n={n} ants={} iterations={} threads={thread_count}",
            config.ants,
            config.iterations
        );
        let start = Instant::now();
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(err) => {
                log::warn!("aco.parallel: worker pool unavailable ({err}), running workers inline");
                None
            }
        };
        let mut pheromone = PheromoneField::new(n);
        let mut best = BestTracker::new();
        let base = config.ants / thread_count;
        let remainder = config.ants % thread_count;
        for iteration in 0..config.iterations {
            let pass = |worker: usize| {
                let assigned = base + usize::from(worker < remainder);
                self.worker_pass(config, &pheromone, iteration, worker, assigned)
            };
            let locals: Vec<(DeltaBuffer, BestTracker)> = match &pool {
                Some(pool) => {
                    pool.install(|| (0..thread_count).into_par_iter().map(pass).collect())
                }
                None => (0..thread_count).map(pass).collect(),
            };
            // Fold in worker index order: the merged best-set is then
            // deterministic for a fixed thread count.
            let mut merged = DeltaBuffer::new(n);
            for (delta, local_best) in locals {
                merged.merge(&delta);
                best.absorb(local_best);
            }
            pheromone.apply(&merged, config.evaporation);
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::debug!(
            "aco.parallel: done best={:.3} tours={} elapsed_ms={elapsed_ms:.2}",
            best.best_length(),
            best.tour_count()
        );
        best.into_result(elapsed_ms)
    }

    /// One worker's share of an iteration: `assigned` constructions into
    /// a fresh delta buffer and local best-set.
    fn worker_pass(
        &self,
        config: &AcoConfig,
        pheromone: &PheromoneField,
        iteration: usize,
        worker: usize,
        assigned: usize,
    ) -> (DeltaBuffer, BestTracker) {
        let n = self.graph.vertex_count();
        let mut delta = DeltaBuffer::new(n);
        let mut local_best = BestTracker::new();
        if assigned == 0 {
            return (delta, local_best);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(worker_seed(config.seed, worker, iteration));
        for _ in 0..assigned {
            if let Some(path) = self.construct_tour(&mut rng, config, pheromone) {
                delta.deposit(&path, config.q);
                local_best.offer(self.graph, &path);
            }
        }
        (delta, local_best)
    }

    /// Builds one ant's tour by biased random walk, or `None` on a dead
    /// end (no outgoing edge to an unvisited vertex, or a non-finite
    /// closing total).
    fn construct_tour<R: Rng>(
        &self,
        rng: &mut R,
        config: &AcoConfig,
        pheromone: &PheromoneField,
    ) -> Option<AntPath> {
        let n = self.graph.vertex_count();
        if n < 2 {
            return None;
        }
        let start = rng.random_range(0..n);
        let mut visited = vec![false; n];
        visited[start] = true;
        let mut vertices = Vec::with_capacity(n + 1);
        vertices.push(start);
        let mut current = start;
        let mut candidates: Vec<(usize, f64)> = Vec::with_capacity(n);
        for _ in 1..n {
            candidates.clear();
            let mut total = 0.0;
            for next in 0..n {
                if visited[next] {
                    continue;
                }
                let weight = self.graph.weight(current, next);
                if weight <= 0.0 || weight.is_infinite() {
                    continue;
                }
                let value = pheromone.get(current, next).powf(config.alpha)
                    * (1.0 / weight).powf(config.beta);
                if value <= 0.0 || !value.is_finite() {
                    continue;
                }
                candidates.push((next, value));
                total += value;
            }
            if candidates.is_empty() {
                return None;
            }
            // Inverse-CDF draw over the candidates in ascending vertex
            // order; ties go to the earlier candidate.
            let draw = rng.random_range(0.0..total);
            let mut chosen = candidates[candidates.len() - 1].0;
            let mut cumulative = 0.0;
            for &(vertex, value) in &candidates {
                cumulative += value;
                if cumulative >= draw {
                    chosen = vertex;
                    break;
                }
            }
            visited[chosen] = true;
            vertices.push(chosen);
            current = chosen;
        }
        vertices.push(start);
        let length: f64 = vertices
            .windows(2)
            .map(|edge| self.graph.weight(edge[0], edge[1]))
            .sum();
        if !length.is_finite() {
            return None;
        }
        Some(AntPath { vertices, length })
    }
}

/// Deterministic per-worker seed skew: the same `(seed, thread_count)` is
/// reproducible run to run, while different thread counts sample different
/// streams.
fn worker_seed(seed: u64, worker: usize, iteration: usize) -> u64 {
    seed.wrapping_add((worker as u64).wrapping_mul(9973))
        .wrapping_add((iteration as u64).wrapping_mul(7919))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(dot: &str) -> Graph {
        Graph::from_dot(dot).unwrap()
    }

    fn equal_triangle() -> Graph {
        graph(
            "A -> B [weight=1]\n\
             B -> A [weight=1]\n\
             A -> C [weight=5]\n\
             C -> A [weight=5]\n\
             B -> C [weight=2]\n\
             C -> B [weight=2]\n",
        )
    }

    fn tour_length(graph: &Graph, tour: &[usize]) -> f64 {
        tour.windows(2).map(|e| graph.weight(e[0], e[1])).sum()
    }

    #[test]
    fn test_sequential_finds_triangle_optimum() {
        let graph = equal_triangle();
        let solver = AcoSolver::new(&graph);
        let config = AcoConfig::default()
            .with_ants(30)
            .with_iterations(50)
            .with_alpha(1.0)
            .with_beta(5.0)
            .with_evaporation(0.3)
            .with_q(50.0)
            .with_seed(2024);
        let result = solver.run_sequential(&config);
        assert!(result.has_tour());
        assert!((result.best_length - 8.0).abs() < 1e-9);
        assert!(!result.best_paths.is_empty());
    }

    #[test]
    fn test_best_paths_are_valid_tours() {
        let graph = equal_triangle();
        let solver = AcoSolver::new(&graph);
        let config = AcoConfig::default()
            .with_ants(20)
            .with_iterations(30)
            .with_seed(7);
        let result = solver.run_sequential(&config);
        let n = graph.vertex_count();
        assert_eq!(result.best_paths.len(), result.best_paths_labels.len());
        for (tour, label) in result.best_paths.iter().zip(&result.best_paths_labels) {
            assert_eq!(tour.len(), n + 1);
            assert_eq!(tour.first(), tour.last());
            let mut visited: Vec<usize> = tour[..n].to_vec();
            visited.sort_unstable();
            assert_eq!(visited, (0..n).collect::<Vec<_>>());
            assert!((tour_length(&graph, tour) - result.best_length).abs() <= 1e-9);
            assert_eq!(*label, graph.format_tour(tour));
            assert_eq!(*tour, graph.canonicalize_tour(tour));
        }
        // Labels are unique within the set.
        let mut labels = result.best_paths_labels.clone();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), result.best_paths_labels.len());
    }

    #[test]
    fn test_sequential_reproducible() {
        let graph = equal_triangle();
        let solver = AcoSolver::new(&graph);
        let config = AcoConfig::default().with_ants(15).with_iterations(20).with_seed(99);
        let first = solver.run_sequential(&config);
        let second = solver.run_sequential(&config);
        assert_eq!(first.best_length, second.best_length);
        assert_eq!(first.best_paths_labels, second.best_paths_labels);
    }

    #[test]
    fn test_parallel_reproducible_for_fixed_threads() {
        let graph = equal_triangle();
        let solver = AcoSolver::new(&graph);
        let config = AcoConfig::default().with_ants(17).with_iterations(20).with_seed(5);
        let first = solver.run_parallel(&config, 3);
        let second = solver.run_parallel(&config, 3);
        assert_eq!(first.best_length, second.best_length);
        assert_eq!(first.best_paths_labels, second.best_paths_labels);
    }

    #[test]
    fn test_sequential_and_parallel_agree_on_best_length() {
        let graph = graph(
            "A -> B [weight=4]\n\
             B -> A [weight=4]\n\
             A -> C [weight=1]\n\
             C -> A [weight=1]\n\
             B -> C [weight=3]\n\
             C -> B [weight=3]\n",
        );
        let solver = AcoSolver::new(&graph);
        let config = AcoConfig::default()
            .with_ants(40)
            .with_iterations(80)
            .with_alpha(1.2)
            .with_beta(5.0)
            .with_evaporation(0.2)
            .with_q(50.0)
            .with_seed(1337);
        let sequential = solver.run_sequential(&config);
        let parallel = solver.run_parallel(&config, 4);
        assert!(sequential.has_tour());
        assert!(parallel.has_tour());
        assert!((sequential.best_length - parallel.best_length).abs() <= 1e-3);
    }

    #[test]
    fn test_parallel_zero_threads_returns_empty() {
        let graph = equal_triangle();
        let solver = AcoSolver::new(&graph);
        let result = solver.run_parallel(&AcoConfig::default(), 0);
        assert!(!result.has_tour());
        assert!(result.best_paths.is_empty());
        assert!(result.best_paths_labels.is_empty());
        assert_eq!(result.elapsed_ms, 0.0);
    }

    #[test]
    fn test_single_cycle_digraph_has_one_canonical_best() {
        // Only one Hamiltonian cycle exists; its reverse is unreachable.
        let graph = graph(
            "a -> b [weight=1]\n\
             b -> c [weight=2]\n\
             c -> d [weight=3]\n\
             d -> a [weight=4]\n",
        );
        let solver = AcoSolver::new(&graph);
        let config = AcoConfig::default().with_ants(10).with_iterations(10).with_seed(3);
        let sequential = solver.run_sequential(&config);
        assert!((sequential.best_length - 10.0).abs() < 1e-9);
        assert_eq!(sequential.best_paths.len(), 1);
        let parallel = solver.run_parallel(&config, 2);
        assert!((parallel.best_length - 10.0).abs() < 1e-9);
        assert_eq!(parallel.best_paths.len(), 1);
        assert_eq!(sequential.best_paths_labels, parallel.best_paths_labels);
    }

    #[test]
    fn test_no_cycle_graph_completes_degenerate() {
        // B has no outgoing edge back, so every walk dead-ends.
        let graph = graph("A -> B [weight=1]");
        let solver = AcoSolver::new(&graph);
        let config = AcoConfig::default().with_ants(10).with_iterations(5);
        let result = solver.run_sequential(&config);
        assert!(!result.has_tour());
        assert!(result.best_paths.is_empty());
        let result = solver.run_parallel(&config, 2);
        assert!(!result.has_tour());
    }

    #[test]
    fn test_one_vertex_graph_degenerate() {
        let graph = graph("A -> A [weight=1]");
        assert_eq!(graph.vertex_count(), 1);
        let solver = AcoSolver::new(&graph);
        let config = AcoConfig::default().with_ants(5).with_iterations(5);
        assert!(!solver.run_sequential(&config).has_tour());
        assert!(!solver.run_parallel(&config, 2).has_tour());
    }

    #[test]
    fn test_more_threads_than_ants() {
        let graph = equal_triangle();
        let solver = AcoSolver::new(&graph);
        let config = AcoConfig::default().with_ants(3).with_iterations(5).with_seed(11);
        let result = solver.run_parallel(&config, 8);
        assert!(result.has_tour());
        assert!((result.best_length - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_worker_seed_streams_distinct() {
        let base = worker_seed(42, 0, 0);
        assert_eq!(base, 42);
        assert_ne!(worker_seed(42, 1, 0), base);
        assert_ne!(worker_seed(42, 0, 1), base);
        assert_eq!(worker_seed(42, 2, 3), 42 + 2 * 9973 + 3 * 7919);
    }
}
