// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Reading input layers from, and writing analysis results to,
//! [GeoJSON](https://geojson.org/) files.

use std::io;

mod read;
mod write;

pub use read::{
    read_points_from_buffer, read_points_from_file, read_points_from_io, read_roads_from_buffer,
    read_roads_from_file, read_roads_from_io,
};
pub use write::{feature_collection, write_features};

/// Format of the input GeoJSON file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    /// Unknown format - guess the compression based on the content
    #[default]
    Unknown,

    /// Force uncompressed GeoJSON
    GeoJson,

    /// Force GeoJSON with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    GeoJsonGz,

    /// Force GeoJSON with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    GeoJsonBz2,
}

/// Describes which feature properties of a road layer carry the travel direction and cost.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoadSchema {
    /// Property with the [Direction](crate::Direction) code.
    /// If `None`, all roads are bidirectional.
    pub direction_field: Option<String>,

    /// Property with the traversal cost. If `None`, costs are derived from road lengths.
    pub cost_field: Option<String>,

    pub file_format: FileFormat,
}

impl RoadSchema {
    pub fn new(direction_field: Option<&str>, cost_field: Option<&str>) -> Self {
        Self {
            direction_field: direction_field.map(str::to_string),
            cost_field: cost_field.map(str::to_string),
            file_format: FileFormat::Unknown,
        }
    }
}

/// Describes which feature property of a point layer identifies its points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointSchema {
    pub id_field: String,
    pub file_format: FileFormat,
}

impl PointSchema {
    pub fn new(id_field: &str) -> Self {
        Self {
            id_field: id_field.to_string(),
            file_format: FileFormat::Unknown,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("expected a FeatureCollection, got a {0}")]
    NotAFeatureCollection(&'static str),

    #[error("feature {feature}: missing {field:?} property")]
    MissingField { field: String, feature: usize },
}
