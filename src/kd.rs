// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geo::Coord;

use crate::distance::squared_distance;

/// A point stored in a [KDTree], remembering its position in the input sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    point: Coord<f64>,
    order: usize,
}

impl Entry {
    /// Checks whether this entry, at `dist` from the query, beats the current best.
    /// Equally distant entries are resolved in favor of the one seen first.
    #[inline]
    fn beats(&self, dist: f64, best: &Entry, best_dist: f64) -> bool {
        dist < best_dist || (dist == best_dist && self.order < best.order)
    }
}

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree)
/// over planar points, used to speed up nearest-neighbor search for large datasets.
///
/// Nearest-neighbor queries return exactly the same point as a linear scan over the
/// input sequence which keeps the first of equally distant points.
#[derive(Debug, Clone)]
pub struct KDTree {
    pivot: Entry,
    left: Option<Box<KDTree>>,
    right: Option<Box<KDTree>>,
}

impl KDTree {
    /// Finds the closest point to the given position.
    /// Returns the point and the squared distance to it.
    pub fn find_nearest(&self, p: Coord<f64>) -> (Coord<f64>, f64) {
        let (best, best_dist) = self.find_nearest_impl(p, false);
        (best.point, best_dist)
    }

    fn find_nearest_impl(&self, p: Coord<f64>, y_divides: bool) -> (Entry, f64) {
        // Start by assuming that pivot is the closest
        let mut best = self.pivot;
        let mut best_dist = squared_distance(p, best.point);

        // Select which branch to recurse into first
        let first_left = if y_divides {
            p.y < best.point.y
        } else {
            p.x < best.point.x
        };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        // Recurse into the first branch
        if let Some(ref branch) = first {
            let (alt, alt_dist) = branch.find_nearest_impl(p, !y_divides);
            if alt.beats(alt_dist, &best, best_dist) {
                best = alt;
                best_dist = alt_dist;
            }
        }

        // (Optionally) recurse into the second branch
        if let Some(ref branch) = second {
            // A closer (or equally close, but earlier) point is possible in the second branch
            // if and only if the splitting axis is not further than the current best candidate.
            let axis_dist = if y_divides {
                p.y - self.pivot.point.y
            } else {
                p.x - self.pivot.point.x
            };

            if axis_dist * axis_dist <= best_dist {
                let (alt, alt_dist) = branch.find_nearest_impl(p, !y_divides);
                if alt.beats(alt_dist, &best, best_dist) {
                    best = alt;
                    best_dist = alt_dist;
                }
            }
        }

        return (best, best_dist);
    }

    /// Builds a k-d tree from an iterable of points.
    /// Returns `None` if there are no points.
    pub fn from_iter<I: IntoIterator<Item = Coord<f64>>>(points: I) -> Option<Self> {
        let mut entries = points
            .into_iter()
            .enumerate()
            .map(|(order, point)| Entry { point, order })
            .collect::<Vec<_>>();
        Self::build_impl(entries.as_mut_slice(), false)
    }

    fn build_impl(entries: &mut [Entry], y_divides: bool) -> Option<Self> {
        match entries.len() {
            0 => None,
            1 => Some(Self {
                pivot: entries[0],
                left: None,
                right: None,
            }),
            _ => {
                if y_divides {
                    entries.sort_by(|a, b| a.point.y.total_cmp(&b.point.y));
                } else {
                    entries.sort_by(|a, b| a.point.x.total_cmp(&b.point.x));
                }
                let median = entries.len() / 2;
                let pivot = entries[median];
                let (left, right_and_pivot) = entries.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot,
                    left: Self::build_impl(left, !y_divides).map(Box::new),
                    right: Self::build_impl(right, !y_divides).map(Box::new),
                })
            }
        }
    }
}
