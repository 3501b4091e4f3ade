// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::NodeId;

mod bounded;
mod error;
mod queue;
mod single;

pub use bounded::shortest_paths_within;
pub use error::SearchError;
pub use single::shortest_path;

/// Result of a shortest path search.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Sum of edge costs along the path.
    pub cost: f64,

    /// Nodes along the path, starting with the source and ending with the target.
    /// Always contains at least one node.
    pub nodes: Vec<NodeId>,
}

impl Path {
    /// Returns the last node of the path.
    pub fn target(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }
}

fn reconstruct_path(came_from: &HashMap<NodeId, NodeId>, mut last: NodeId) -> Vec<NodeId> {
    let mut path = vec![last];

    while let Some(&nd) = came_from.get(&last) {
        path.push(nd);
        last = nd;
    }

    path.reverse();
    return path;
}
