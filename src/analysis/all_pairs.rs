// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use super::{resolve_all, AllPairsReport, RouteRecord};
use crate::{assemble, shortest_path, AnalysisError, Network, NodeId, QueryPoint};

/// Finds the cheapest route between every ordered pair of distinct points.
///
/// Points are identified by their ids - if multiple points share an id, the last one
/// determines its position. Points which don't resolve to the network are skipped, and
/// [AnalysisError::InsufficientPoints] is returned if less than 2 distinct ids remain.
///
/// Pairs without a route are skipped, as are pairs resolving to the same node.
pub fn all_pairs_routes(
    n: &Network,
    points: &[QueryPoint],
) -> Result<AllPairsReport, AnalysisError> {
    if points.is_empty() {
        return Err(AnalysisError::EmptyPoints);
    }

    let mut ids: Vec<&str> = Vec::new();
    let mut nodes: HashMap<&str, NodeId> = HashMap::new();
    for r in resolve_all(n, points, "point") {
        if nodes.insert(r.point.id.as_str(), r.node).is_none() {
            ids.push(r.point.id.as_str());
        }
    }

    if ids.len() < 2 {
        return Err(AnalysisError::InsufficientPoints(ids.len()));
    }

    let mut report = AllPairsReport::default();
    for &origin_id in &ids {
        for &destination_id in &ids {
            if origin_id == destination_id {
                continue;
            }

            let (from, to) = (nodes[origin_id], nodes[destination_id]);
            let path = match shortest_path(n.graph(), from, to) {
                Ok(path) => path,
                Err(e) => {
                    log::debug!("{} -> {}: {}", origin_id, destination_id, e);
                    continue;
                }
            };

            match assemble(n.graph(), &path.nodes) {
                Ok(geometry) if geometry.0.len() >= 2 => report.routes.push(RouteRecord {
                    origin_id: origin_id.to_string(),
                    destination_id: destination_id.to_string(),
                    cost: path.cost,
                    geometry,
                }),
                Ok(_) => log::debug!("{} -> {}: same node", origin_id, destination_id),
                Err(e) => log::warn!("{} -> {}: {}", origin_id, destination_id, e),
            }
        }
    }

    if !report.is_success() {
        log::warn!("no routes found between {} points", ids.len());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{network, point};
    use super::*;

    #[test]
    fn three_colinear_points() {
        let n = network();
        let report = all_pairs_routes(
            &n,
            &[point("A", 0.0, 0.0), point("B", 1.0, 0.0), point("C", 2.0, 0.0)],
        )
        .unwrap();

        assert!(report.is_success());
        assert_eq!(report.routes.len(), 6);

        let pairs: Vec<(&str, &str)> = report
            .routes
            .iter()
            .map(|r| (r.origin_id.as_str(), r.destination_id.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A", "B"),
                ("A", "C"),
                ("B", "A"),
                ("B", "C"),
                ("C", "A"),
                ("C", "B"),
            ]
        );

        let a_c = &report.routes[1];
        assert_eq!(a_c.cost, 2.0);
        assert_eq!(a_c.geometry.0.len(), 4);
        assert_eq!(a_c.geometry.0[2], geo::coord! { x: 1.0, y: 0.0 });

        let c_a = &report.routes[4];
        assert_eq!(c_a.cost, 2.0);
        assert_eq!(c_a.geometry.0[0], geo::coord! { x: 2.0, y: 0.0 });
        assert_eq!(c_a.geometry.0[3], geo::coord! { x: 0.0, y: 0.0 });
    }

    #[test]
    fn skips_unreachable_pairs() {
        let n = network();
        let report = all_pairs_routes(
            &n,
            &[point("A", 0.0, 0.0), point("D", 2.0, 1.0), point("E", 10.0, 10.0)],
        )
        .unwrap();

        // Only A -> D exists (the C -> D spur is one-way, E is disconnected)
        assert_eq!(report.routes.len(), 1);
        assert_eq!(report.routes[0].origin_id, "A");
        assert_eq!(report.routes[0].destination_id, "D");
        assert_eq!(report.routes[0].cost, 4.0);
    }

    #[test]
    fn no_routes_is_not_an_error() {
        let n = network();
        let report =
            all_pairs_routes(&n, &[point("A", 0.0, 0.0), point("E", 10.0, 10.0)]).unwrap();
        assert!(!report.is_success());
    }

    #[test]
    fn snaps_points() {
        let n = network();
        let report =
            all_pairs_routes(&n, &[point("A", 0.1, -0.1), point("B", 1.1, 0.1)]).unwrap();
        assert_eq!(report.routes.len(), 2);
        assert_eq!(report.routes[0].cost, 1.0);
    }

    #[test]
    fn insufficient_points() {
        let n = network();
        assert_eq!(
            all_pairs_routes(&n, &[]),
            Err(AnalysisError::EmptyPoints)
        );
        assert_eq!(
            all_pairs_routes(&n, &[point("A", 0.0, 0.0), point("X", 5.0, 5.0)]),
            Err(AnalysisError::InsufficientPoints(1))
        );
        assert_eq!(
            all_pairs_routes(&n, &[point("A", 0.0, 0.0), point("A", 1.0, 0.0)]),
            Err(AnalysisError::InsufficientPoints(1))
        );
    }

    #[test]
    fn duplicate_ids_use_last_position() {
        let n = network();
        let report = all_pairs_routes(
            &n,
            &[point("A", 0.0, 0.0), point("B", 1.0, 0.0), point("A", 2.0, 0.0)],
        )
        .unwrap();

        assert_eq!(report.routes.len(), 2);
        assert_eq!(report.routes[0].origin_id, "A");
        assert_eq!(report.routes[0].geometry.0[0], geo::coord! { x: 2.0, y: 0.0 });
    }

    #[test]
    fn points_on_the_same_node() {
        let n = network();
        let report = all_pairs_routes(
            &n,
            &[point("A", 0.0, 0.0), point("A2", 0.0, 0.1), point("B", 1.0, 0.0)],
        )
        .unwrap();

        // A <-> A2 resolve to the same node and produce no route
        assert_eq!(report.routes.len(), 4);
        assert!(report
            .routes
            .iter()
            .all(|r| r.origin_id == "B" || r.destination_id == "B"));
    }
}
