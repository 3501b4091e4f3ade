// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geo::{Area, ConvexHull, MultiPoint, Point, Polygon};

use super::{resolve_all, AreaRecord, ReachRecord, ServiceAreaReport};
use crate::{assemble, shortest_paths_within, AnalysisError, Network, QueryPoint};

/// Finds everything reachable from every origin with a total cost not exceeding `threshold`.
///
/// For every node reachable from an origin (other than the origin itself) a [ReachRecord] is
/// produced. If at least 3 distinct nodes (including the origin) are reachable, their convex hull
/// is produced as an [AreaRecord]. Origins with fewer reachable nodes, or whose reachable nodes
/// are colinear, get no area.
pub fn service_area(
    n: &Network,
    origins: &[QueryPoint],
    threshold: f64,
) -> Result<ServiceAreaReport, AnalysisError> {
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(AnalysisError::NonPositiveThreshold(threshold));
    }
    if origins.is_empty() {
        return Err(AnalysisError::EmptyPoints);
    }

    let mut report = ServiceAreaReport::default();

    for origin in resolve_all(n, origins, "origin") {
        let origin_id = &origin.point.id;
        let reachable = match shortest_paths_within(n.graph(), origin.node, threshold) {
            Ok(reachable) => reachable,
            Err(e) => {
                log::debug!("{}: {}", origin_id, e);
                continue;
            }
        };

        let mut endpoints: Vec<Point<f64>> = Vec::with_capacity(reachable.len());
        for (target, path) in reachable {
            if target == origin.node {
                endpoints.extend(n.node_point(target).map(Point::from));
                continue;
            }

            match assemble(n.graph(), &path.nodes) {
                Ok(geometry) => {
                    endpoints.extend(n.node_point(target).map(Point::from));
                    report.routes.push(ReachRecord {
                        origin_id: origin_id.clone(),
                        target,
                        cost: path.cost,
                        geometry,
                    });
                }
                Err(e) => log::warn!("{} -> node {}: {}", origin_id, target, e),
            }
        }

        if let Some(polygon) = hull(endpoints) {
            report.areas.push(AreaRecord {
                origin_id: origin_id.clone(),
                threshold,
                polygon,
            });
        } else {
            log::debug!("{}: not enough reachable nodes for a service area", origin_id);
        }
    }

    if !report.is_success() {
        log::warn!("no origin reaches any node within {}", threshold);
    }
    Ok(report)
}

/// Computes the convex hull of distinct points. Returns `None` for fewer than 3 points
/// or if the hull has no area.
fn hull(points: Vec<Point<f64>>) -> Option<Polygon<f64>> {
    if points.len() < 3 {
        return None;
    }

    let polygon = MultiPoint::new(points).convex_hull();
    if polygon.unsigned_area() > 0.0 {
        Some(polygon)
    } else {
        None
    }
}
