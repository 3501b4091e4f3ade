// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geo::{Coord, LineString};

use crate::distance::squared_distance;
use crate::KDTree;

/// Returns the first and last coordinate of every road part with at least 2 coordinates,
/// in input order. Interior vertices are never snapping candidates.
fn endpoints<'a, I>(parts: I) -> Vec<Coord<f64>>
where
    I: IntoIterator<Item = &'a LineString<f64>>,
{
    parts
        .into_iter()
        .filter(|part| part.0.len() >= 2)
        .flat_map(|part| [part.0[0], part.0[part.0.len() - 1]])
        .collect()
}

/// Snaps a point to the nearest endpoint of the provided road parts.
///
/// The nearest endpoint is returned if it is closer than `tolerance`; otherwise the point is
/// returned unchanged. Equally distant endpoints are resolved in favor of the one seen first.
///
/// This function scans all candidates; use a [SnappingIndex] when snapping many points
/// against the same roads.
pub fn snap<'a, I>(p: Coord<f64>, parts: I, tolerance: f64) -> Coord<f64>
where
    I: IntoIterator<Item = &'a LineString<f64>>,
{
    let mut best: Option<(Coord<f64>, f64)> = None;
    for candidate in endpoints(parts) {
        let dist = squared_distance(p, candidate);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((candidate, dist));
        }
    }

    match best {
        Some((candidate, dist)) if dist < tolerance * tolerance => candidate,
        _ => p,
    }
}

/// Pre-computed [k-d tree](KDTree) of road part endpoints, giving the same results
/// as [snap] without scanning every candidate.
#[derive(Debug, Clone, Default)]
pub struct SnappingIndex {
    tree: Option<KDTree>,
}

impl SnappingIndex {
    /// Builds an index over the endpoints of the provided road parts.
    pub fn new<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a LineString<f64>>,
    {
        Self {
            tree: KDTree::from_iter(endpoints(parts)),
        }
    }

    /// Finds the nearest endpoint to the given position,
    /// returning it together with the squared distance.
    pub fn nearest(&self, p: Coord<f64>) -> Option<(Coord<f64>, f64)> {
        self.tree.as_ref().map(|tree| tree.find_nearest(p))
    }

    /// Snaps a point to the nearest endpoint closer than `tolerance`,
    /// returning the point unchanged if there is no such endpoint.
    pub fn snap(&self, p: Coord<f64>, tolerance: f64) -> Coord<f64> {
        match self.nearest(p) {
            Some((candidate, dist)) if dist < tolerance * tolerance => candidate,
            _ => p,
        }
    }
}
