// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Network analysis over planar road networks.
//!
//! Roads (line features with a direction code and an optional cost) are converted into
//! a weighted directed [Graph] whose nodes are road endpoints deduplicated on a fixed
//! coordinate grid. Query points are snapped onto road endpoints, and Dijkstra's algorithm
//! is used to derive three analysis products:
//!
//! - [all_pairs_routes] - optimal routes between every ordered pair of points,
//! - [service_area] - everything reachable within a cost threshold, plus its convex hull,
//! - [nearest_facilities] - the cheapest facility for every origin.
//!
//! All geometries must be expressed in a single planar coordinate system.
//! Reading and writing layers is handled by the [layer] module.
//!
//! # Example
//!
//! ```no_run
//! let roads = roadnet::layer::read_roads_from_file(
//!     &roadnet::layer::RoadSchema::new(Some("oneway"), Some("minutes")),
//!     "path/to/roads.geojson",
//! ).expect("failed to load roads");
//! let points = roadnet::layer::read_points_from_file(
//!     &roadnet::layer::PointSchema::new("name"),
//!     "path/to/points.geojson",
//! ).expect("failed to load points");
//!
//! let mut session = roadnet::Session::new(roadnet::Options::default());
//! let report = session.all_pairs(&roads, &points).expect("invalid input");
//!
//! for route in &report.routes {
//!     println!("{} -> {}: {}", route.origin_id, route.destination_id, route.cost);
//! }
//! ```

use geo::{Coord, LineString};

mod analysis;
mod assemble;
mod dijkstra;
mod distance;
mod error;
mod graph;
mod kd;
pub mod layer;
mod network;
mod registry;
mod session;
mod snap;

pub use analysis::{
    all_pairs_routes, nearest_facilities, service_area, AllPairsReport, AreaRecord,
    AssignmentRecord, NearestFacilityReport, ReachRecord, RouteRecord, ServiceAreaReport,
};
pub use assemble::{assemble, AssemblyError};
pub use dijkstra::{shortest_path, shortest_paths_within, Path, SearchError};
pub use distance::{line_length, planar_distance};
pub use error::AnalysisError;
pub use graph::Graph;
pub use kd::KDTree;
pub use network::{
    CostAttribute, Direction, InvalidDirection, Network, QueryPoint, RoadLayer, RoadSegment,
};
pub use registry::NodeRegistry;
pub use session::Session;
pub use snap::{snap, SnappingIndex};

/// Identifier of a [Node], assigned sequentially (from zero) by the [NodeRegistry].
pub type NodeId = u32;

/// Default size of the grid used to deduplicate coordinates into nodes (6 decimal places).
pub const DEFAULT_PRECISION: f64 = 1e-6;

/// Default maximum distance between a query point and the road endpoint it snaps to.
pub const DEFAULT_SNAP_TOLERANCE: f64 = 1e-6;

/// Default lowest possible [Edge] cost. Non-positive costs are raised to this value.
pub const DEFAULT_MIN_COST: f64 = 1e-5;

/// Represents a vertex of the [Graph] - a unique (rounded) road endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,

    /// Canonical position of the node - the first coordinate seen for its grid cell.
    pub point: Coord<f64>,
}

/// Represents an outgoing (one-way) connection from a specific [Node].
///
/// `cost` is always finite and positive. `geometry` is the road part this edge was
/// created from, oriented in the direction of travel.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    pub cost: f64,
    pub geometry: LineString<f64>,
}

/// Parameters controlling how roads are converted into a [Graph] and how
/// query points are matched against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Size of the grid cell used for node identity. Two coordinates which round
    /// to the same multiple of `precision` become the same [Node].
    pub precision: f64,

    /// Query points are snapped to the nearest road endpoint closer than this distance.
    pub snap_tolerance: f64,

    /// Edge cost floor, used whenever a cost attribute is zero or negative.
    pub min_cost: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            min_cost: DEFAULT_MIN_COST,
        }
    }
}

impl Options {
    /// Ensures all parameters are finite and positive.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let valid = |x: f64| x.is_finite() && x > 0.0;

        if !valid(self.precision) {
            Err(AnalysisError::InvalidOptions("precision"))
        } else if !valid(self.snap_tolerance) {
            Err(AnalysisError::InvalidOptions("snap_tolerance"))
        } else if !valid(self.min_cost) {
            Err(AnalysisError::InvalidOptions("min_cost"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert_eq!(Options::default().validate(), Ok(()));
    }

    #[test]
    fn options_reject_non_positive_values() {
        let o = Options {
            min_cost: 0.0,
            ..Options::default()
        };
        assert_eq!(o.validate(), Err(AnalysisError::InvalidOptions("min_cost")));

        let o = Options {
            precision: f64::NAN,
            ..Options::default()
        };
        assert_eq!(o.validate(), Err(AnalysisError::InvalidOptions("precision")));
    }
}
