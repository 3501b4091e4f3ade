// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geo::{Coord, LineString, Polygon};

use crate::{Network, NodeId, QueryPoint};

mod all_pairs;
mod nearest;
mod service_area;

pub use all_pairs::all_pairs_routes;
pub use nearest::nearest_facilities;
pub use service_area::service_area;

/// A route between two identified points.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub origin_id: String,
    pub destination_id: String,
    pub cost: f64,

    /// Route geometry. Contains a single coordinate if the origin and the destination
    /// resolve to the same node.
    pub geometry: LineString<f64>,
}

/// A route from an origin to a node reachable within a service area threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachRecord {
    pub origin_id: String,
    pub target: NodeId,
    pub cost: f64,
    pub geometry: LineString<f64>,
}

/// Convex hull of all nodes reachable from an origin within `threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRecord {
    pub origin_id: String,
    pub threshold: f64,
    pub polygon: Polygon<f64>,
}

/// Assignment of an origin to its cheapest facility.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRecord {
    pub origin_id: String,
    pub facility_id: String,
    pub cost: f64,

    /// Location of the facility, as provided in the input (not snapped).
    pub facility: Coord<f64>,
}

/// Output of [all_pairs_routes].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllPairsReport {
    pub routes: Vec<RouteRecord>,
}

impl AllPairsReport {
    /// Returns true if at least one route was found.
    pub fn is_success(&self) -> bool {
        !self.routes.is_empty()
    }
}

/// Output of [service_area].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceAreaReport {
    pub routes: Vec<ReachRecord>,
    pub areas: Vec<AreaRecord>,
}

impl ServiceAreaReport {
    /// Returns true if at least one origin could reach a node other than itself.
    pub fn is_success(&self) -> bool {
        !self.routes.is_empty()
    }
}

/// Output of [nearest_facilities].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NearestFacilityReport {
    pub assignments: Vec<AssignmentRecord>,
    pub routes: Vec<RouteRecord>,
}

impl NearestFacilityReport {
    /// Returns true if at least one origin was assigned to a facility.
    pub fn is_success(&self) -> bool {
        !self.assignments.is_empty()
    }
}

/// A [QueryPoint] matched against a [Network].
#[derive(Debug, Clone, Copy)]
struct Resolved<'a> {
    point: &'a QueryPoint,
    node: NodeId,
}

/// Resolves every point against the network, logging and dropping
/// the ones which don't correspond to any graph node.
fn resolve_all<'a>(n: &Network, points: &'a [QueryPoint], kind: &str) -> Vec<Resolved<'a>> {
    points
        .iter()
        .filter_map(|point| match n.resolve(point.point) {
            Some(node) => Some(Resolved { point, node }),
            None => {
                log::warn!("{} {:?}: not on the road network, skipping", kind, point.id);
                None
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use geo::{coord, LineString};

    use crate::{CostAttribute, Direction, Network, Options, QueryPoint, RoadSegment};

    pub(crate) fn road(
        id: usize,
        coords: &[(f64, f64)],
        direction: Direction,
        cost: f64,
    ) -> RoadSegment {
        RoadSegment {
            id,
            parts: vec![LineString::from(coords.to_vec())],
            direction,
            cost: CostAttribute::Value(cost),
        }
    }

    pub(crate) fn point(id: &str, x: f64, y: f64) -> QueryPoint {
        QueryPoint::new(id, coord! { x: x, y: y })
    }

    /// A-B-C along the x axis (costs 1 and 1, both ways), with a one-way C→D spur (cost 2)
    /// and a disconnected E-F road (cost 1).
    pub(crate) fn network() -> Network {
        Network::build(
            &[
                road(0, &[(0.0, 0.0), (0.5, 0.2), (1.0, 0.0)], Direction::Both, 1.0),
                road(1, &[(1.0, 0.0), (2.0, 0.0)], Direction::Both, 1.0),
                road(2, &[(2.0, 0.0), (2.0, 1.0)], Direction::Forward, 2.0),
                road(3, &[(10.0, 10.0), (11.0, 10.0)], Direction::Both, 1.0),
            ],
            Options {
                snap_tolerance: 0.25,
                ..Options::default()
            },
        )
        .unwrap()
    }
}
