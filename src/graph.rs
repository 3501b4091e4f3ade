// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Edge, Node, NodeId};
use std::collections::btree_map::{BTreeMap, Entry};

/// Represents a road network as a set of [Nodes](Node)
/// and directed [Edges](Edge) between them.
///
/// A [Graph] never contains self-loops, and every [Edge] has a finite, positive cost.
/// Only nodes which are an endpoint of at least one edge are present.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph(BTreeMap<NodeId, (Node, Vec<Edge>)>);

impl Graph {
    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.0.values().map(|(_, edges)| edges.len()).sum()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.0.values().map(|(node, _)| node)
    }

    /// Checks if a [Node] with the provided id exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains_key(&id)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: NodeId) -> Option<Node> {
        self.0.get(&id).map(|&(node, _)| node)
    }

    /// Creates or updates a [Node] with `node.id`.
    ///
    /// All outgoing and incoming edges are preserved.
    pub fn set_node(&mut self, node: Node) {
        match self.0.entry(node.id) {
            Entry::Vacant(e) => {
                e.insert((node, Vec::default()));
            }
            Entry::Occupied(mut e) => {
                debug_assert_eq!(e.get().0.id, node.id);
                e.get_mut().0 = node;
            }
        }
    }

    /// Gets all outgoing [Edges](Edge) from a node with a given id.
    pub fn get_edges(&self, from_id: NodeId) -> &[Edge] {
        self.0
            .get(&from_id)
            .map(|(_, e)| e.as_slice())
            .unwrap_or_default()
    }

    /// Gets the [Edge] from one node to another.
    pub fn get_edge(&self, from_id: NodeId, to_id: NodeId) -> Option<&Edge> {
        self.get_edges(from_id).iter().find(|e| e.to == to_id)
    }

    /// Gets the cost of an [Edge] from one node to another.
    /// If such an edge doesn't exist, returns [f64::INFINITY].
    pub fn get_edge_cost(&self, from_id: NodeId, to_id: NodeId) -> f64 {
        self.get_edge(from_id, to_id)
            .map(|e| e.cost)
            .unwrap_or(f64::INFINITY)
    }

    /// Creates or replaces an [Edge] from a node with a given id.
    ///
    /// Does nothing if the `from_id` node does not exist.
    pub fn set_edge(&mut self, from_id: NodeId, edge: Edge) {
        debug_assert_ne!(from_id, edge.to, "self-loops are not allowed");
        debug_assert!(edge.cost.is_finite() && edge.cost > 0.0);

        if let Some((_, edges)) = self.0.get_mut(&from_id) {
            if let Some(candidate) = edges.iter_mut().find(|e| e.to == edge.to) {
                *candidate = edge;
            } else {
                edges.push(edge);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, line_string};

    fn node(id: NodeId, x: f64, y: f64) -> Node {
        Node {
            id,
            point: coord! { x: x, y: y },
        }
    }

    fn edge(to: NodeId, cost: f64) -> Edge {
        Edge {
            to,
            cost,
            geometry: line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
        }
    }

    #[test]
    fn set_edge_replaces_existing() {
        let mut g = Graph::default();
        g.set_node(node(0, 0.0, 0.0));
        g.set_node(node(1, 1.0, 0.0));

        g.set_edge(0, edge(1, 5.0));
        g.set_edge(0, edge(1, 2.0));

        assert_eq!(g.get_edges(0).len(), 1);
        assert_eq!(g.get_edge_cost(0, 1), 2.0);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn missing_edges() {
        let mut g = Graph::default();
        g.set_node(node(0, 0.0, 0.0));
        g.set_node(node(1, 1.0, 0.0));
        g.set_edge(0, edge(1, 1.0));

        assert!(g.get_edge(1, 0).is_none());
        assert!(g.get_edge_cost(1, 0).is_infinite());
        assert!(g.get_edges(7).is_empty());
    }

    #[test]
    fn set_edge_on_unknown_node_is_ignored() {
        let mut g = Graph::default();
        g.set_node(node(1, 1.0, 0.0));
        g.set_edge(0, edge(1, 1.0));

        assert_eq!(g.edge_count(), 0);
        assert!(!g.contains(0));
        assert!(g.contains(1));
    }
}
