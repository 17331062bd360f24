//! Ant Colony Optimization (ACO) for the Traveling Salesman Problem.
//!
//! Ants build tours by biased random walks over the graph: each step is
//! drawn proportionally to `τ[u][v]^α · (1/w)^β`, where τ is the shared
//! pheromone field and w the edge weight. Successful tours deposit
//! `q / length` on every edge they used; once per iteration the whole
//! field evaporates and absorbs the deposits. Good edges accumulate
//! pheromone and attract more ants, concentrating the search around short
//! cycles.
//!
//! Two runners share identical per-iteration semantics: a single-threaded
//! reference loop and a work-partitioned variant that fans the ant budget
//! out over worker threads, reducing per-worker deposit buffers and
//! best-sets at the end of every iteration.
//!
//! # References
//!
//! - Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant System:
//!   Optimization by a Colony of Cooperating Agents", *IEEE Transactions
//!   on Systems, Man, and Cybernetics — Part B* 26(1), 29-41.

mod config;
mod pheromone;
mod solver;
mod types;

pub use config::AcoConfig;
pub use pheromone::{DeltaBuffer, PheromoneField, PHEROMONE_FLOOR};
pub use solver::AcoSolver;
pub use types::{AntPath, BestTracker, TourResult};
