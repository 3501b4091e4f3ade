// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use super::queue::Queue;
use super::{reconstruct_path, Path, SearchError};
use crate::{Edge, Graph, NodeId};

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the cheapest path between two nodes in the provided graph.
///
/// Returns [SearchError::NodeNotFound] if either node is not in the graph, and
/// [SearchError::NoPath] if `to_id` can't be reached from `from_id`. A path from
/// a node to itself has zero cost and consists of that single node.
///
/// Among equally cheap paths, the first one discovered is returned.
pub fn shortest_path(g: &Graph, from_id: NodeId, to_id: NodeId) -> Result<Path, SearchError> {
    if !g.contains(from_id) {
        return Err(SearchError::NodeNotFound(from_id));
    }
    if !g.contains(to_id) {
        return Err(SearchError::NodeNotFound(to_id));
    }

    let mut queue = Queue::default();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::default();
    let mut known_costs: HashMap<NodeId, f64> = HashMap::default();

    queue.push(from_id, 0.0);
    known_costs.insert(from_id, 0.0);

    while let Some(item) = queue.pop() {
        if item.at == to_id {
            return Ok(Path {
                cost: item.cost,
                nodes: reconstruct_path(&came_from, to_id),
            });
        }

        // We might keep multiple items in the queue for the same node - skip outdated ones.
        if item.cost > known_costs.get(&item.at).cloned().unwrap_or(f64::INFINITY) {
            continue;
        }

        for &Edge {
            to: neighbor_id,
            cost: edge_cost,
            ..
        } in g.get_edges(item.at)
        {
            // Only strictly cheaper paths replace already discovered ones
            let neighbor_cost = item.cost + edge_cost;
            if neighbor_cost
                >= known_costs
                    .get(&neighbor_id)
                    .cloned()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            came_from.insert(neighbor_id, item.at);
            known_costs.insert(neighbor_id, neighbor_cost);
            queue.push(neighbor_id, neighbor_cost);
        }
    }

    Err(SearchError::NoPath(from_id, to_id))
}

#[cfg(test)]
mod tests {
    use super::super::test_graphs::{add_edge, add_node, simple};
    use super::*;

    #[test]
    fn simple_path() {
        let g = simple();
        let p = shortest_path(&g, 0, 3).unwrap();
        assert_eq!(p.cost, 3.0);
        assert_eq!(p.nodes, vec![0, 1, 2, 3]);
        assert_eq!(p.target(), 3);
    }

    #[test]
    fn respects_edge_direction() {
        let g = simple();
        assert_eq!(shortest_path(&g, 3, 0), Err(SearchError::NoPath(3, 0)));

        let back = shortest_path(&g, 2, 0).unwrap();
        assert_eq!(back.cost, 2.0);
        assert_eq!(back.nodes, vec![2, 1, 0]);
    }

    #[test]
    fn same_node() {
        let g = simple();
        let p = shortest_path(&g, 2, 2).unwrap();
        assert_eq!(p.cost, 0.0);
        assert_eq!(p.nodes, vec![2]);
    }

    #[test]
    fn unknown_nodes() {
        let g = simple();
        assert_eq!(shortest_path(&g, 42, 0), Err(SearchError::NodeNotFound(42)));
        assert_eq!(shortest_path(&g, 0, 42), Err(SearchError::NodeNotFound(42)));
    }

    #[test]
    fn isolated_node() {
        let g = simple();
        assert_eq!(shortest_path(&g, 0, 4), Err(SearchError::NoPath(0, 4)));
    }

    #[test]
    fn equal_cost_paths_keep_first_discovered() {
        //   1
        //  / \
        // 0   3
        //  \ /
        //   2
        let mut g = crate::Graph::default();
        add_node(&mut g, 0, 0.0, 0.0);
        add_node(&mut g, 1, 1.0, 1.0);
        add_node(&mut g, 2, 1.0, -1.0);
        add_node(&mut g, 3, 2.0, 0.0);
        add_edge(&mut g, 0, 1, 1.0);
        add_edge(&mut g, 0, 2, 1.0);
        add_edge(&mut g, 1, 3, 1.0);
        add_edge(&mut g, 2, 3, 1.0);

        for _ in 0..10 {
            let p = shortest_path(&g, 0, 3).unwrap();
            assert_eq!(p.cost, 2.0);
            assert_eq!(p.nodes, vec![0, 1, 3]);
        }
    }
}
