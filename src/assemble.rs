// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geo::LineString;

use crate::{Graph, NodeId};

/// Error returned by [assemble] when an edge along the path has no usable geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    #[error("missing geometry for the edge from {0} to {1}")]
    IncompletePathGeometry(NodeId, NodeId),
}

/// Stitches the geometries of edges along a path of nodes into a single polyline.
///
/// Consecutive edges share their boundary coordinate, which is only included once.
/// A single-node path produces a one-coordinate polyline at that node, and an empty path
/// produces an empty polyline.
pub fn assemble(g: &Graph, nodes: &[NodeId]) -> Result<LineString<f64>, AssemblyError> {
    match nodes {
        [] => Ok(LineString::new(vec![])),

        &[id] => g
            .get_node(id)
            .map(|n| LineString::new(vec![n.point]))
            .ok_or(AssemblyError::IncompletePathGeometry(id, id)),

        _ => {
            let mut coords = Vec::new();
            for pair in nodes.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                let geometry = g
                    .get_edge(from, to)
                    .map(|e| &e.geometry.0)
                    .filter(|c| c.len() >= 2)
                    .ok_or(AssemblyError::IncompletePathGeometry(from, to))?;

                let skip = if coords.is_empty() { 0 } else { 1 };
                coords.extend_from_slice(&geometry[skip..]);
            }
            Ok(LineString::new(coords))
        }
    }
}
