// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::str::FromStr;

use geo::{Coord, LineString};

/// Travel direction allowed on a [RoadSegment], relative to the order of its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Code 0 (or no code at all) - the segment can be travelled both ways.
    #[default]
    Both,

    /// Code 1 - the segment can only be travelled from its first to its last coordinate.
    Forward,

    /// Code 2 - the segment can only be travelled from its last to its first coordinate.
    Backward,

    /// Code 3 - the segment is not part of the network.
    Excluded,

    /// Any other code - the segment is not part of the network.
    Unrecognized(i64),
}

/// Returned when a direction attribute is not a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction code: {0:?}")]
pub struct InvalidDirection(pub String);

impl Direction {
    /// Interprets a numeric direction code. Fractional codes are truncated towards zero.
    pub fn from_number(code: f64) -> Result<Self, InvalidDirection> {
        if !code.is_finite() {
            return Err(InvalidDirection(code.to_string()));
        }

        Ok(match code.trunc() as i64 {
            0 => Self::Both,
            1 => Self::Forward,
            2 => Self::Backward,
            3 => Self::Excluded,
            other => Self::Unrecognized(other),
        })
    }

    /// Returns the `(forward, backward)` pair of allowed travel directions.
    pub fn allows(&self) -> (bool, bool) {
        match self {
            Self::Both => (true, true),
            Self::Forward => (true, false),
            Self::Backward => (false, true),
            Self::Excluded | Self::Unrecognized(_) => (false, false),
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<f64>() {
            Ok(code) => Self::from_number(code).map_err(|_| InvalidDirection(s.to_string())),
            Err(_) => Err(InvalidDirection(s.to_string())),
        }
    }
}

/// Value of the cost attribute of a [RoadSegment], as found in the input.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CostAttribute {
    /// No cost attribute - cost is derived from the segment length.
    #[default]
    Missing,

    /// A finite cost. Zero and negative costs are raised to
    /// [Options::min_cost](crate::Options::min_cost).
    Value(f64),

    /// A cost which could not be interpreted as a finite number -
    /// cost is derived from the segment length.
    Unparseable(String),
}

impl CostAttribute {
    pub fn from_number(cost: f64) -> Self {
        if cost.is_finite() {
            Self::Value(cost)
        } else {
            Self::Unparseable(cost.to_string())
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().parse::<f64>() {
            Ok(cost) if cost.is_finite() => Self::Value(cost),
            _ => Self::Unparseable(s.to_string()),
        }
    }
}

/// A single road feature. Every part is an independent polyline;
/// parts are not implicitly connected to each other.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoadSegment {
    /// Identifier of the feature, used for diagnostics only.
    pub id: usize,
    pub parts: Vec<LineString<f64>>,
    pub direction: Direction,
    pub cost: CostAttribute,
}

/// A set of [RoadSegments](RoadSegment) together with a string identifying their source.
///
/// The identity is used to decide whether a cached [Network](crate::Network) can be reused.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoadLayer {
    pub identity: String,
    pub segments: Vec<RoadSegment>,
}

/// A location of interest, identified by a string.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPoint {
    pub id: String,
    pub point: Coord<f64>,
}

impl QueryPoint {
    pub fn new<S: Into<String>>(id: S, point: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_codes() {
        assert_eq!("0".parse(), Ok(Direction::Both));
        assert_eq!("1".parse(), Ok(Direction::Forward));
        assert_eq!(" 2 ".parse(), Ok(Direction::Backward));
        assert_eq!("3.0".parse(), Ok(Direction::Excluded));
        assert_eq!("1.7".parse(), Ok(Direction::Forward));
        assert_eq!("-1".parse(), Ok(Direction::Unrecognized(-1)));
        assert_eq!("7".parse(), Ok(Direction::Unrecognized(7)));
    }

    #[test]
    fn invalid_direction_codes() {
        assert_eq!(
            "oneway".parse::<Direction>(),
            Err(InvalidDirection("oneway".to_string()))
        );
        assert!("".parse::<Direction>().is_err());
        assert!("inf".parse::<Direction>().is_err());
        assert!(Direction::from_number(f64::NAN).is_err());
    }

    #[test]
    fn direction_allows() {
        assert_eq!(Direction::Both.allows(), (true, true));
        assert_eq!(Direction::Forward.allows(), (true, false));
        assert_eq!(Direction::Backward.allows(), (false, true));
        assert_eq!(Direction::Excluded.allows(), (false, false));
        assert_eq!(Direction::Unrecognized(9).allows(), (false, false));
    }

    #[test]
    fn cost_attributes() {
        assert_eq!(CostAttribute::parse("12.5"), CostAttribute::Value(12.5));
        assert_eq!(CostAttribute::parse("-5"), CostAttribute::Value(-5.0));
        assert_eq!(
            CostAttribute::parse("slow"),
            CostAttribute::Unparseable("slow".to_string())
        );
        assert_eq!(
            CostAttribute::parse("NaN"),
            CostAttribute::Unparseable("NaN".to_string())
        );
        assert!(matches!(
            CostAttribute::from_number(f64::INFINITY),
            CostAttribute::Unparseable(_)
        ));
    }
}
