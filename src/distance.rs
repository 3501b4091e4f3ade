// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geo::{Coord, LineString};

/// Calculates the straight-line distance between two points in a planar coordinate system.
pub fn planar_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Calculates the squared straight-line distance between two points.
pub(crate) fn squared_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Calculates the length of a polyline in a planar coordinate system.
pub fn line_length(line: &LineString<f64>) -> f64 {
    line.lines().map(|l| l.dx().hypot(l.dy())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, line_string};

    #[test]
    fn distances() {
        let a = coord! { x: 1.0, y: 1.0 };
        let b = coord! { x: 4.0, y: 5.0 };
        assert_eq!(planar_distance(a, b), 5.0);
        assert_eq!(squared_distance(a, b), 25.0);
    }

    #[test]
    fn polyline_length() {
        let l = line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 4.0), (x: 3.0, y: 10.0)];
        assert_eq!(line_length(&l), 11.0);
        assert_eq!(line_length(&line_string![(x: 2.0, y: 2.0)]), 0.0);
    }
}
