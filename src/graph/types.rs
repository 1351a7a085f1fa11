//! Adjacency-list graph.

use std::collections::{HashMap, HashSet};

/// A directed graph keyed by string node ids.
///
/// Successor order is preserved and drives search order. Edges carry no
/// attributes. A node that never appears as a key has no successors.
///
/// # Examples
///
/// ```
/// use u_heuristic::graph::Graph;
///
/// let graph = Graph::from_adjacency([("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]);
/// assert_eq!(graph.successors("A"), ["B".to_string()]);
/// assert!(graph.successors("missing").is_empty());
/// assert_eq!(graph.node_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    adjacency: HashMap<String, Vec<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(node, successors)` pairs.
    ///
    /// A repeated node id replaces the earlier successor list.
    pub fn from_adjacency<I, N, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<S>)>,
        N: Into<String>,
        S: Into<String>,
    {
        let adjacency = entries
            .into_iter()
            .map(|(node, succ)| (node.into(), succ.into_iter().map(Into::into).collect()))
            .collect();
        Self { adjacency }
    }

    /// Appends a directed edge `from -> to`.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.adjacency.entry(from.into()).or_default().push(to.into());
    }

    /// Registers a node with no outgoing edges (no-op if present).
    pub fn add_node(&mut self, node: impl Into<String>) {
        self.adjacency.entry(node.into()).or_default();
    }

    /// Ordered successors of `node`; empty for unknown nodes.
    pub fn successors(&self, node: &str) -> &[String] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `node` appears as a key or as a successor.
    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
            || self.adjacency.values().any(|s| s.iter().any(|n| n == node))
    }

    /// Number of distinct node ids, counting successor-only nodes.
    pub fn node_count(&self) -> usize {
        let mut seen: HashSet<&str> = self.adjacency.keys().map(String::as_str).collect();
        for succ in self.adjacency.values() {
            seen.extend(succ.iter().map(String::as_str));
        }
        seen.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}
