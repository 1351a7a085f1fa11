//! Depth-limited search and the iterative deepening driver.

use super::config::{validate_endpoints, IddfsConfig};
use super::types::Graph;
use crate::error::Result;
use crate::observer::{NoopObserver, Observer, SearchEvent};

/// Outcome of one depth-limited pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthLimitedOutcome {
    /// Path from start to goal, if the goal was reached within the limit.
    pub path: Option<Vec<String>>,

    /// Whether some branch was truncated by the depth limit.
    ///
    /// When `false` and no path was found, the whole reachable graph was
    /// explored and no deeper limit can succeed.
    pub cut_off: bool,

    /// Number of nodes whose successors were examined.
    pub expansions: usize,
}

impl DepthLimitedOutcome {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Runs one depth-limited depth-first search from `start` to `goal`.
///
/// The path grows one edge at a time and is popped on backtrack. A node is
/// tested against `goal` before the depth limit is checked, so
/// `start == goal` succeeds even with `depth_limit == 0`. Successors are
/// tried in adjacency order; the first path found wins.
///
/// No visited set is kept: cycles are bounded by the limit alone.
pub fn depth_limited_search(
    graph: &Graph,
    start: &str,
    goal: &str,
    depth_limit: usize,
) -> DepthLimitedOutcome {
    let mut outcome = DepthLimitedOutcome {
        path: None,
        cut_off: false,
        expansions: 0,
    };

    if start == goal {
        outcome.path = Some(vec![start.to_string()]);
        return outcome;
    }

    // Each frame is (node, index of the next successor to try).
    let mut stack: Vec<(&str, usize)> = vec![(start, 0)];

    while let Some(&(node, cursor)) = stack.last() {
        let depth = stack.len() - 1;
        let successors = graph.successors(node);

        if depth >= depth_limit {
            if !successors.is_empty() {
                outcome.cut_off = true;
            }
            stack.pop();
            continue;
        }

        if cursor == 0 {
            outcome.expansions += 1;
        }

        match successors.get(cursor) {
            Some(next) => {
                stack[depth].1 += 1;
                if next == goal {
                    let mut path: Vec<String> =
                        stack.iter().map(|&(n, _)| n.to_string()).collect();
                    path.push(next.clone());
                    outcome.path = Some(path);
                    return outcome;
                }
                stack.push((next.as_str(), 0));
            }
            None => {
                stack.pop();
            }
        }
    }

    outcome
}

/// Result of an iterative deepening run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IddfsResult {
    /// Shortest path from start to goal, or `None` if not found.
    pub path: Option<Vec<String>>,

    /// Depth at which the path was found, or the last depth tried.
    pub depth: usize,

    /// Node expansions summed over every pass.
    pub total_expansions: usize,

    /// Whether the search stopped because the reachable graph was fully
    /// explored (rather than by hitting the depth cap).
    pub exhausted: bool,
}

impl IddfsResult {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Iterative deepening driver.
///
/// # Usage
///
/// ```
/// use u_heuristic::graph::{Graph, IddfsConfig, IddfsRunner};
///
/// let graph = Graph::from_adjacency([("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]);
/// let result = IddfsRunner::run(&graph, "A", "C", &IddfsConfig::default()).unwrap();
/// assert_eq!(result.path.unwrap(), ["A", "B", "C"]);
/// assert_eq!(result.depth, 2);
/// ```
pub struct IddfsRunner;

impl IddfsRunner {
    /// Runs iterative deepening without progress reporting.
    pub fn run(graph: &Graph, start: &str, goal: &str, config: &IddfsConfig) -> Result<IddfsResult> {
        Self::run_with(graph, start, goal, config, &mut NoopObserver)
    }

    /// Runs depth-limited passes with limits `0, 1, 2, …` up to the cap.
    ///
    /// Reports a [`SearchEvent::DepthCompleted`] after every pass. Stops
    /// early, reporting "not found", when a pass explores the reachable
    /// graph without being cut off.
    pub fn run_with<O: Observer>(
        graph: &Graph,
        start: &str,
        goal: &str,
        config: &IddfsConfig,
        observer: &mut O,
    ) -> Result<IddfsResult> {
        validate_endpoints(start, goal)?;

        let cap = config.depth_cap(graph.node_count());
        log::debug!("iddfs {start} -> {goal}, depth cap {cap}");

        let mut total_expansions = 0;
        let mut depth = 0;
        let mut exhausted = false;

        loop {
            let pass = depth_limited_search(graph, start, goal, depth);
            total_expansions += pass.expansions;

            observer.observe(&SearchEvent::DepthCompleted {
                depth,
                expansions: pass.expansions,
                found: pass.found(),
            });

            if pass.path.is_some() {
                log::info!("iddfs found {goal} at depth {depth} after {total_expansions} expansions");
                return Ok(IddfsResult {
                    path: pass.path,
                    depth,
                    total_expansions,
                    exhausted: false,
                });
            }

            if !pass.cut_off {
                exhausted = true;
                log::debug!("iddfs exhausted reachable graph at depth {depth}");
                break;
            }

            if depth >= cap {
                log::debug!("iddfs hit depth cap {cap}");
                break;
            }
            depth += 1;
        }

        log::info!("iddfs did not reach {goal} (last depth {depth})");
        Ok(IddfsResult {
            path: None,
            depth,
            total_expansions,
            exhausted,
        })
    }
}
