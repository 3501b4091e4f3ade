// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use geo::Coord;

use crate::NodeId;

/// Largest magnitude of a coordinate (in multiples of the precision) which can be keyed
/// without saturating the integer grid.
const KEY_LIMIT: f64 = i64::MAX as f64;

/// Deduplicates coordinates into stable [NodeIds](NodeId).
///
/// Coordinates are keyed by rounding them to a multiple of `precision`; the first coordinate
/// seen for a key becomes the canonical point of the node. Ids are handed out sequentially,
/// starting from zero, and are never removed.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    precision: f64,
    ids: HashMap<(i64, i64), NodeId>,
    points: Vec<Coord<f64>>,
}

impl NodeRegistry {
    /// Creates an empty registry. `precision` must be finite and positive.
    pub fn new(precision: f64) -> Self {
        debug_assert!(precision.is_finite() && precision > 0.0);
        Self {
            precision,
            ids: HashMap::default(),
            points: Vec::default(),
        }
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rounds a coordinate to the grid. Both `|x| / precision` and `|y| / precision`
    /// must be below [KEY_LIMIT] - beyond that, distinct coordinates would share a key.
    fn key(&self, p: Coord<f64>) -> (i64, i64) {
        let (x, y) = ((p.x / self.precision).round(), (p.y / self.precision).round());
        debug_assert!(
            x.abs() < KEY_LIMIT && y.abs() < KEY_LIMIT,
            "coordinate {:?} is too large for precision {}",
            p,
            self.precision,
        );
        (x as i64, y as i64)
    }

    /// Returns the id of the node at the given position, registering a new node if necessary.
    pub fn get_or_create(&mut self, p: Coord<f64>) -> NodeId {
        let key = self.key(p);
        match self.ids.entry(key) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = self.points.len() as NodeId;
                self.points.push(p);
                *e.insert(id)
            }
        }
    }

    /// Returns the id of the node at the given position, without registering new nodes.
    pub fn get(&self, p: Coord<f64>) -> Option<NodeId> {
        self.ids.get(&self.key(p)).copied()
    }

    /// Returns the canonical point of a node.
    pub fn lookup(&self, id: NodeId) -> Option<Coord<f64>> {
        self.points.get(id as usize).copied()
    }
}
