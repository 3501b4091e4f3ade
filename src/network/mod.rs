// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geo::Coord;

use crate::{AnalysisError, Graph, NodeId, NodeRegistry, Options, SnappingIndex};

mod builder;
mod model;

pub use model::{CostAttribute, Direction, InvalidDirection, QueryPoint, RoadLayer, RoadSegment};

/// A road [Graph] together with everything needed to match query points against it.
///
/// A [Network] is immutable once built, and can be freely shared between threads
/// for concurrent read-only queries.
#[derive(Debug, Clone)]
pub struct Network {
    graph: Graph,
    registry: NodeRegistry,
    snapping: SnappingIndex,
    options: Options,
}

impl Network {
    /// Converts road segments into a [Network] as per the provided [Options].
    pub fn build(segments: &[RoadSegment], options: Options) -> Result<Self, AnalysisError> {
        options.validate()?;
        if segments.is_empty() {
            return Err(AnalysisError::EmptyNetwork);
        }

        let (graph, registry) = builder::GraphBuilder::new(&options).build(segments);
        let snapping = SnappingIndex::new(segments.iter().flat_map(|s| s.parts.iter()));

        Ok(Self {
            graph,
            registry,
            snapping,
            options,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the canonical position of a node.
    pub fn node_point(&self, id: NodeId) -> Option<Coord<f64>> {
        self.registry.lookup(id)
    }

    /// Snaps a point to the nearest road endpoint within [Options::snap_tolerance].
    pub fn snap(&self, p: Coord<f64>) -> Coord<f64> {
        self.snapping.snap(p, self.options.snap_tolerance)
    }

    /// Snaps a point onto the network and returns the corresponding graph node.
    ///
    /// Returns `None` if the snapped position doesn't correspond to any node of the [Graph] -
    /// either because no road endpoint is within tolerance, or because the endpoint
    /// only belongs to roads excluded from the network.
    pub fn resolve(&self, p: Coord<f64>) -> Option<NodeId> {
        let snapped = self.snap(p);
        self.registry
            .get(snapped)
            .filter(|&id| self.graph.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use geo::{coord, line_string};

    use super::*;

    fn roads() -> Vec<RoadSegment> {
        vec![
            RoadSegment {
                id: 0,
                parts: vec![line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)]],
                direction: Direction::Both,
                cost: CostAttribute::Missing,
            },
            RoadSegment {
                id: 1,
                parts: vec![line_string![(x: 10.0, y: 0.0), (x: 10.0, y: 10.0)]],
                direction: Direction::Excluded,
                cost: CostAttribute::Missing,
            },
        ]
    }

    #[test]
    fn resolve() {
        let options = Options {
            snap_tolerance: 1.0,
            ..Options::default()
        };
        let n = Network::build(&roads(), options).unwrap();

        let a = n.resolve(coord! { x: 0.3, y: 0.3 }).expect("must snap to (0, 0)");
        assert_eq!(n.node_point(a), Some(coord! { x: 0.0, y: 0.0 }));

        assert!(n.resolve(coord! { x: 10.1, y: 0.0 }).is_some());

        // Only belongs to an excluded road
        assert_eq!(n.resolve(coord! { x: 10.0, y: 9.5 }), None);

        // Too far from any endpoint
        assert_eq!(n.resolve(coord! { x: 5.0, y: 0.0 }), None);
    }

    #[test]
    fn exact_match_with_default_tolerance() {
        let n = Network::build(&roads(), Options::default()).unwrap();
        assert!(n.resolve(coord! { x: 10.0, y: 0.0 }).is_some());
        assert_eq!(n.resolve(coord! { x: 10.001, y: 0.0 }), None);
    }

    #[test]
    fn invalid_input() {
        assert_eq!(
            Network::build(&[], Options::default()).unwrap_err(),
            AnalysisError::EmptyNetwork
        );

        let options = Options {
            snap_tolerance: -1.0,
            ..Options::default()
        };
        assert_eq!(
            Network::build(&roads(), options).unwrap_err(),
            AnalysisError::InvalidOptions("snap_tolerance")
        );
    }
}
