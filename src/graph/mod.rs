//! Bounded graph search.
//!
//! Iterative deepening depth-first search (IDDFS) over an unweighted
//! adjacency list. Each pass runs a depth-limited search with a growing
//! limit; the first pass that reaches the goal yields a shortest path
//! (in edge count) while memory stays proportional to the path length.
//!
//! # Key Types
//!
//! - [`Graph`]: node id → ordered successor list
//! - [`depth_limited_search`]: one bounded pass, explicit stack
//! - [`IddfsRunner`]: the deepening driver, capped by [`IddfsConfig::max_depth`]
//!
//! # References
//!
//! - Korf (1985), "Depth-First Iterative-Deepening: An Optimal Admissible Tree Search"

mod config;
mod runner;
mod types;

pub use config::IddfsConfig;
pub use runner::{depth_limited_search, DepthLimitedOutcome, IddfsResult, IddfsRunner};
pub use types::Graph;
