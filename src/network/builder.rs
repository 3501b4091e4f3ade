// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geo::LineString;

use crate::{line_length, Edge, Graph, Node, NodeId, NodeRegistry, Options};

use super::model::{CostAttribute, Direction, RoadSegment};

/// Helper object used for storing state related to converting [RoadSegments](RoadSegment)
/// into a [Graph].
///
/// Every build starts from scratch - the builder never updates an existing graph.
pub(super) struct GraphBuilder<'a> {
    options: &'a Options,
    registry: NodeRegistry,
    g: Graph,
}

impl<'a> GraphBuilder<'a> {
    /// Create a new, empty graph builder.
    pub(super) fn new(options: &'a Options) -> Self {
        Self {
            options,
            registry: NodeRegistry::new(options.precision),
            g: Graph::default(),
        }
    }

    /// Converts all provided segments into a [Graph].
    pub(super) fn build(mut self, segments: &[RoadSegment]) -> (Graph, NodeRegistry) {
        // Every usable part contributes nodes, even if it ends up without any edges.
        segments.iter().for_each(|s| self.register_endpoints(s));
        segments.iter().for_each(|s| self.add_segment(s));

        log::info!(
            "road graph built: {} nodes ({} registered), {} edges",
            self.g.len(),
            self.registry.len(),
            self.g.edge_count(),
        );
        (self.g, self.registry)
    }

    fn register_endpoints(&mut self, s: &RoadSegment) {
        for (idx, part) in s.parts.iter().enumerate() {
            if let Some((first, last)) = endpoints(part) {
                self.registry.get_or_create(first);
                self.registry.get_or_create(last);
            } else {
                log::warn!(
                    "road {} part {}: less than 2 coordinates, skipping",
                    s.id,
                    idx
                );
            }
        }
    }

    fn add_segment(&mut self, s: &RoadSegment) {
        let (forward, backward) = match s.direction {
            Direction::Excluded => {
                log::info!("road {}: excluded from the network (direction 3)", s.id);
                return;
            }
            Direction::Unrecognized(code) => {
                log::warn!("road {}: unrecognized direction {}, skipping", s.id, code);
                return;
            }
            direction => direction.allows(),
        };

        for part in &s.parts {
            if let Some((first, last)) = endpoints(part) {
                let cost = self.resolve_cost(s, part);
                let u = self.registry.get_or_create(first);
                let v = self.registry.get_or_create(last);
                if u == v {
                    log::debug!("road {}: part starts and ends at node {}, skipping", s.id, u);
                    continue;
                }

                self.create_edges(u, v, part, cost, forward, backward);
            }
        }
    }

    /// Resolves the cost of a road part: positive costs are used as-is, zero and negative
    /// costs are raised to [Options::min_cost], and missing or unparseable costs
    /// fall back to the length of the part.
    fn resolve_cost(&self, s: &RoadSegment, part: &LineString<f64>) -> f64 {
        let cost = match &s.cost {
            CostAttribute::Value(cost) => *cost,
            CostAttribute::Missing => {
                let length = line_length(part);
                log::info!("road {}: no cost, using length ({:.2})", s.id, length);
                length
            }
            CostAttribute::Unparseable(raw) => {
                let length = line_length(part);
                log::warn!(
                    "road {}: invalid cost {:?}, using length ({:.2})",
                    s.id,
                    raw,
                    length
                );
                length
            }
        };

        if cost > 0.0 {
            cost
        } else {
            self.options.min_cost
        }
    }

    fn create_edges(
        &mut self,
        u: NodeId,
        v: NodeId,
        part: &LineString<f64>,
        cost: f64,
        forward: bool,
        backward: bool,
    ) {
        debug_assert!(cost.is_finite() && cost > 0.0);
        debug_assert!(forward || backward);

        self.ensure_node(u);
        self.ensure_node(v);

        if forward {
            self.g.set_edge(
                u,
                Edge {
                    to: v,
                    cost,
                    geometry: part.clone(),
                },
            );
        }
        if backward {
            self.g.set_edge(
                v,
                Edge {
                    to: u,
                    cost,
                    geometry: reversed(part),
                },
            );
        }
    }

    fn ensure_node(&mut self, id: NodeId) {
        if !self.g.contains(id) {
            let point = self
                .registry
                .lookup(id)
                .expect("ids are only ever handed out by the registry");
            self.g.set_node(Node { id, point });
        }
    }
}

/// Returns the first and last coordinate of a part with at least 2 coordinates.
fn endpoints(part: &LineString<f64>) -> Option<(geo::Coord<f64>, geo::Coord<f64>)> {
    match part.0.as_slice() {
        [first, .., last] => Some((*first, *last)),
        _ => None,
    }
}

fn reversed(part: &LineString<f64>) -> LineString<f64> {
    LineString::new(part.0.iter().rev().copied().collect())
}
