//! Ant Colony Optimization solver for the Traveling Salesman Problem on
//! directed weighted graphs.
//!
//! The crate provides:
//!
//! - **[`graph`]**: an immutable label-indexed adjacency matrix parsed
//!   from a Graphviz-style edge list, plus the tour canonicalization that
//!   defines when two Hamiltonian cycles are the same cycle.
//! - **[`aco`]**: the solver core — stochastic tour construction,
//!   pheromone deposit and evaporation, best-tour aggregation — with a
//!   sequential reference runner and a multi-threaded runner whose
//!   per-iteration reduction preserves the sequential semantics.
//!
//! # Example
//!
//! ```
//! use aco_tsp::aco::{AcoConfig, AcoSolver};
//! use aco_tsp::graph::Graph;
//!
//! let graph = Graph::from_dot(
//!     "A -- B [weight=1]\n\
//!      B -- C [weight=2]\n\
//!      A -- C [weight=5]\n",
//! )?;
//! let solver = AcoSolver::new(&graph);
//! let result = solver.run_sequential(&AcoConfig::default().with_iterations(50));
//! assert_eq!(result.best_length, 8.0);
//! # Ok::<(), aco_tsp::Error>(())
//! ```

pub mod aco;
mod error;
pub mod graph;

pub use error::{Error, Result};
