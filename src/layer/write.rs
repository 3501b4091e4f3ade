// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, GeometryValue};
use serde_json::{json, Value as JsonValue};

use super::Error;
use crate::{AreaRecord, AssignmentRecord, ReachRecord, RouteRecord};

impl RouteRecord {
    /// Converts the route into a GeoJSON feature with `origin_id`, `destination_id`
    /// and `cost` properties.
    pub fn to_feature(&self) -> Feature {
        feature(
            route_geometry(&self.geometry),
            json!({
                "origin_id": self.origin_id,
                "destination_id": self.destination_id,
                "cost": self.cost,
            }),
        )
    }
}

impl ReachRecord {
    /// Converts the route into a GeoJSON feature with `origin_id`, `target_node`
    /// and `cost` properties.
    pub fn to_feature(&self) -> Feature {
        feature(
            route_geometry(&self.geometry),
            json!({
                "origin_id": self.origin_id,
                "target_node": self.target,
                "cost": self.cost,
            }),
        )
    }
}

impl AreaRecord {
    /// Converts the service area into a GeoJSON feature
    /// with `origin_id` and `threshold` properties.
    pub fn to_feature(&self) -> Feature {
        feature(
            GeometryValue::from(&self.polygon),
            json!({
                "origin_id": self.origin_id,
                "threshold": self.threshold,
            }),
        )
    }
}

impl AssignmentRecord {
    /// Converts the assignment into a GeoJSON Point feature (at the facility)
    /// with `origin_id`, `facility_id` and `cost` properties.
    pub fn to_feature(&self) -> Feature {
        feature(
            GeometryValue::from(&Point::from(self.facility)),
            json!({
                "origin_id": self.origin_id,
                "facility_id": self.facility_id,
                "cost": self.cost,
            }),
        )
    }
}

/// Routes between points resolving to the same node only have a single coordinate,
/// which can't be represented as a GeoJSON LineString.
fn route_geometry(line: &LineString<f64>) -> GeometryValue {
    match line.0.as_slice() {
        &[only] => GeometryValue::from(&Point::from(only)),
        _ => GeometryValue::from(line),
    }
}

fn feature(geometry: GeometryValue, properties: JsonValue) -> Feature {
    let properties = match properties {
        JsonValue::Object(map) => Some(map),
        _ => None,
    };

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: None,
        properties,
        foreign_members: None,
    }
}

/// Collects features into a [FeatureCollection].
pub fn feature_collection<I: IntoIterator<Item = Feature>>(features: I) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: features.into_iter().collect(),
        foreign_members: None,
    }
}

/// Writes features as a single GeoJSON FeatureCollection.
pub fn write_features<W: io::Write, I: IntoIterator<Item = Feature>>(
    writer: W,
    features: I,
) -> Result<(), Error> {
    let mut w = io::BufWriter::new(writer);
    serde_json::to_writer(&mut w, &feature_collection(features))?;
    io::Write::flush(&mut w)?;
    Ok(())
}
