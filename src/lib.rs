//! Heuristic search and optimization toolkit.
//!
//! Generic implementations of four search strategies, each driven by a
//! caller-supplied problem and a resource bound:
//!
//! - **Iterative Deepening DFS** ([`graph`]): shortest path in an unweighted
//!   state graph under a hard depth cap.
//! - **Beam Search** ([`beam`]): high-scoring sequence from staged
//!   candidates, keeping only the best partial sequences at each stage.
//! - **Simulated Annealing (SA)** ([`sa`]): cost minimization with
//!   temperature-controlled acceptance of worse moves, including a
//!   ready-made bounded continuous problem.
//! - **Genetic Algorithm (GA)** ([`ga`]): population-based evolution with
//!   selection, crossover, mutation and repair, plus numeric-target and
//!   constrained multi-field problems.
//!
//! Every runner returns a best-effort result even when no perfect solution
//! exists, takes its randomness from an explicit generator, and reports
//! progress through an [`observer::Observer`].
//!
//! # Example
//!
//! ```
//! use u_heuristic::graph::{Graph, IddfsConfig, IddfsRunner};
//!
//! let graph = Graph::from_adjacency([("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]);
//! let result = IddfsRunner::run(&graph, "A", "C", &IddfsConfig::default()).unwrap();
//! assert_eq!(result.path.unwrap(), ["A", "B", "C"]);
//! assert_eq!(result.depth, 2);
//! ```

pub mod beam;
pub mod error;
pub mod ga;
pub mod graph;
pub mod observer;
pub mod random;
pub mod sa;

pub use error::{Result, SearchError};
