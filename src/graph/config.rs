//! IDDFS configuration.

use crate::error::{Result, SearchError};

/// Configuration for iterative deepening.
///
/// # Examples
///
/// ```
/// use u_heuristic::graph::IddfsConfig;
///
/// let config = IddfsConfig::default().with_max_depth(12);
/// assert_eq!(config.max_depth, Some(12));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IddfsConfig {
    /// Deepest limit tried before reporting "not found".
    ///
    /// `None` uses the graph's node count, which bounds the length of any
    /// shortest path.
    pub max_depth: Option<usize>,
}

impl IddfsConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Resolves the effective depth cap for a graph of `node_count` nodes.
    pub(crate) fn depth_cap(&self, node_count: usize) -> usize {
        self.max_depth.unwrap_or(node_count)
    }
}

/// Checks that node ids are usable.
pub(crate) fn validate_endpoints(start: &str, goal: &str) -> Result<()> {
    if start.is_empty() {
        return Err(SearchError::InvalidProblem("start node id is empty".into()));
    }
    if goal.is_empty() {
        return Err(SearchError::InvalidProblem("goal node id is empty".into()));
    }
    Ok(())
}
