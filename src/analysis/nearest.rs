// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{resolve_all, AssignmentRecord, NearestFacilityReport, RouteRecord};
use crate::{assemble, shortest_path, AnalysisError, Graph, Network, Path, QueryPoint};

/// Assigns every origin to the facility with the cheapest route from it.
///
/// When several facilities are equally close, the one appearing first in `facilities` wins.
/// Origins which don't resolve to the network, or which can't reach any facility, are skipped.
pub fn nearest_facilities(
    n: &Network,
    origins: &[QueryPoint],
    facilities: &[QueryPoint],
) -> Result<NearestFacilityReport, AnalysisError> {
    if origins.is_empty() || facilities.is_empty() {
        return Err(AnalysisError::EmptyPoints);
    }

    let facilities = resolve_all(n, facilities, "facility");
    if facilities.is_empty() {
        return Err(AnalysisError::NoFacilities);
    }

    let mut report = NearestFacilityReport::default();

    for origin in resolve_all(n, origins, "origin") {
        let origin_id = &origin.point.id;
        let mut best: Option<(&QueryPoint, Path)> = None;

        for facility in &facilities {
            let path = if facility.node == origin.node {
                Path {
                    cost: 0.0,
                    nodes: vec![origin.node],
                }
            } else {
                match shortest_path(n.graph(), origin.node, facility.node) {
                    Ok(path) => path,
                    Err(e) => {
                        log::debug!("{} -> {}: {}", origin_id, facility.point.id, e);
                        continue;
                    }
                }
            };

            if best.as_ref().map_or(true, |(_, b)| path.cost < b.cost) {
                best = Some((facility.point, path));
            }
        }

        let Some((facility, path)) = best else {
            log::warn!("origin {:?}: no facility is reachable", origin_id);
            continue;
        };

        push_assignment(&mut report, n.graph(), origin_id, facility, path);
    }

    if !report.is_success() {
        log::warn!("no origin could be assigned to a facility");
    }
    Ok(report)
}

/// Records the assignment of an origin to a facility, together with the route to it.
/// The route is omitted if its geometry can't be assembled.
fn push_assignment(
    report: &mut NearestFacilityReport,
    g: &Graph,
    origin_id: &str,
    facility: &QueryPoint,
    path: Path,
) {
    report.assignments.push(AssignmentRecord {
        origin_id: origin_id.to_string(),
        facility_id: facility.id.clone(),
        cost: path.cost,
        facility: facility.point,
    });

    match assemble(g, &path.nodes) {
        Ok(geometry) => report.routes.push(RouteRecord {
            origin_id: origin_id.to_string(),
            destination_id: facility.id.clone(),
            cost: path.cost,
            geometry,
        }),
        Err(e) => log::warn!("{} -> {}: {}", origin_id, facility.id, e),
    }
}
