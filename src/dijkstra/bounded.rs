// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};

use super::queue::Queue;
use super::{reconstruct_path, Path, SearchError};
use crate::{Edge, Graph, NodeId};

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the cheapest paths from a node to every node reachable with a total cost
/// not exceeding `cutoff`.
///
/// The returned map always contains `from_id` itself (with a zero-cost, single-node path).
/// Returns [SearchError::NodeNotFound] if `from_id` is not in the graph.
pub fn shortest_paths_within(
    g: &Graph,
    from_id: NodeId,
    cutoff: f64,
) -> Result<BTreeMap<NodeId, Path>, SearchError> {
    if !g.contains(from_id) {
        return Err(SearchError::NodeNotFound(from_id));
    }

    let mut queue = Queue::default();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::default();
    let mut known_costs: HashMap<NodeId, f64> = HashMap::default();
    let mut settled: Vec<(NodeId, f64)> = Vec::default();

    queue.push(from_id, 0.0);
    known_costs.insert(from_id, 0.0);

    while let Some(item) = queue.pop() {
        if item.cost > known_costs.get(&item.at).cloned().unwrap_or(f64::INFINITY) {
            continue;
        }

        settled.push((item.at, item.cost));

        for &Edge {
            to: neighbor_id,
            cost: edge_cost,
            ..
        } in g.get_edges(item.at)
        {
            // Never expand beyond the cutoff
            let neighbor_cost = item.cost + edge_cost;
            if neighbor_cost > cutoff {
                continue;
            }

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

    Ok(settled
        .into_iter()
        .map(|(node_id, cost)| {
            let path = Path {
                cost,
                nodes: reconstruct_path(&came_from, node_id),
            };
            (node_id, path)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::super::test_graphs::simple;
    use super::*;
    use crate::shortest_path;

    #[test]
    fn cutoff_is_inclusive() {
        let g = simple();

        let within = shortest_paths_within(&g, 0, 2.0).unwrap();
        assert_eq!(within.keys().cloned().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(within[&0].nodes, vec![0]);
        assert_eq!(within[&0].cost, 0.0);
        assert_eq!(within[&2].nodes, vec![0, 1, 2]);
        assert_eq!(within[&2].cost, 2.0);

        let within = shortest_paths_within(&g, 0, 1.999).unwrap();
        assert_eq!(within.keys().cloned().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn unknown_source() {
        let g = simple();
        assert_eq!(
            shortest_paths_within(&g, 42, 10.0),
            Err(SearchError::NodeNotFound(42))
        );
    }

    #[test]
    fn matches_unbounded_search() {
        let g = simple();
        let all_nodes: Vec<NodeId> = g.iter().map(|n| n.id).collect();

        for &from in &all_nodes {
            for cutoff in [0.0, 0.5, 1.0, 2.0, 2.5, 3.0, 100.0] {
                let within = shortest_paths_within(&g, from, cutoff).unwrap();

                for &to in &all_nodes {
                    match shortest_path(&g, from, to) {
                        Ok(p) if p.cost <= cutoff => {
                            let found = within.get(&to).expect("reachable node must be returned");
                            assert_eq!(found.cost, p.cost);
                            assert_eq!(found.nodes, p.nodes);
                        }
                        _ => assert!(!within.contains_key(&to), "{from}->{to} within {cutoff}"),
                    }
                }
            }
        }
    }

    #[test]
    fn larger_cutoff_never_removes_targets() {
        let g = simple();
        let mut previous = shortest_paths_within(&g, 1, 0.0).unwrap();
        for cutoff in [0.5, 1.0, 1.5, 2.0, 5.0, 10.0] {
            let current = shortest_paths_within(&g, 1, cutoff).unwrap();
            assert!(previous.keys().all(|k| current.contains_key(k)));
            previous = current;
        }
    }
}
