// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::NodeId;

/// Error conditions which may occur during [shortest_path](crate::shortest_path) or
/// [shortest_paths_within](crate::shortest_paths_within).
///
/// Both are expected outcomes for specific pairs of nodes, rather than exceptional conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or end node doesn't exist in a graph.
    NodeNotFound(NodeId),

    /// The end node can't be reached from the start node.
    NoPath(NodeId, NodeId),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(node_id) => write!(f, "node not in graph: {}", node_id),
            Self::NoPath(from_id, to_id) => write!(f, "no path from {} to {}", from_id, to_id),
        }
    }
}

impl std::error::Error for SearchError {}
