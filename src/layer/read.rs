// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use geo::Geometry;
use geojson::{Feature, GeoJson};
use serde_json::Value as JsonValue;

use super::{Error, FileFormat, PointSchema, RoadSchema};
use crate::{CostAttribute, Direction, InvalidDirection, QueryPoint, RoadLayer, RoadSegment};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Parse road features from a reader into a [RoadLayer] as per the provided [RoadSchema].
///
/// Every LineString or MultiLineString feature becomes a single [RoadSegment], identified
/// by its position in the collection. Features without geometry are skipped silently,
/// features with other geometry types are skipped with a warning.
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn read_roads_from_io<R: io::Read>(
    schema: &RoadSchema,
    identity: &str,
    reader: R,
) -> Result<RoadLayer, Error> {
    let features = features_from_io(schema.file_format, reader)?;
    Ok(roads_from_features(schema, identity, features))
}

/// Parse road features from a file at the provided path as per the provided [RoadSchema].
///
/// The canonical path to the file is used as the [RoadLayer::identity].
pub fn read_roads_from_file<P: AsRef<Path>>(
    schema: &RoadSchema,
    path: P,
) -> Result<RoadLayer, Error> {
    let identity = std::fs::canonicalize(&path)?;
    let f = File::open(&identity)?;
    read_roads_from_io(schema, &identity.to_string_lossy(), f)
}

/// Parse road features from a static buffer as per the provided [RoadSchema].
pub fn read_roads_from_buffer(
    schema: &RoadSchema,
    identity: &str,
    data: &[u8],
) -> Result<RoadLayer, Error> {
    let features = features_from_buffer(schema.file_format, data)?;
    Ok(roads_from_features(schema, identity, features))
}

/// Parse point features from a reader as per the provided [PointSchema].
///
/// Every Point feature becomes a [QueryPoint]. Features with other geometry types are
/// skipped with a warning, while Point features without the id property are an error.
pub fn read_points_from_io<R: io::Read>(
    schema: &PointSchema,
    reader: R,
) -> Result<Vec<QueryPoint>, Error> {
    let features = features_from_io(schema.file_format, reader)?;
    points_from_features(schema, features)
}

/// Parse point features from a file at the provided path as per the provided [PointSchema].
pub fn read_points_from_file<P: AsRef<Path>>(
    schema: &PointSchema,
    path: P,
) -> Result<Vec<QueryPoint>, Error> {
    let f = File::open(path)?;
    read_points_from_io(schema, f)
}

/// Parse point features from a static buffer as per the provided [PointSchema].
pub fn read_points_from_buffer(
    schema: &PointSchema,
    data: &[u8],
) -> Result<Vec<QueryPoint>, Error> {
    let features = features_from_buffer(schema.file_format, data)?;
    points_from_features(schema, features)
}

fn features_from_io<R: io::Read>(format: FileFormat, reader: R) -> Result<Vec<Feature>, Error> {
    let mut b = io::BufReader::new(reader);
    let format = match format {
        FileFormat::Unknown => guess_format(b.fill_buf()?),
        known => known,
    };

    let g: GeoJson = match format {
        FileFormat::Unknown | FileFormat::GeoJson => serde_json::from_reader(b)?,

        FileFormat::GeoJsonGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))?
        }

        FileFormat::GeoJsonBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))?
        }
    };

    into_features(g)
}

fn features_from_buffer(format: FileFormat, data: &[u8]) -> Result<Vec<Feature>, Error> {
    let format = match format {
        FileFormat::Unknown => guess_format(data),
        known => known,
    };

    if format == FileFormat::GeoJson {
        // Fast path is available for in-memory uncompressed data
        into_features(serde_json::from_slice(data)?)
    } else {
        features_from_io(format, io::Cursor::new(data))
    }
}

fn guess_format(head: &[u8]) -> FileFormat {
    if head.starts_with(GZIP_MAGIC) {
        FileFormat::GeoJsonGz
    } else if head.starts_with(BZIP2_MAGIC) {
        FileFormat::GeoJsonBz2
    } else {
        FileFormat::GeoJson
    }
}

fn into_features(g: GeoJson) -> Result<Vec<Feature>, Error> {
    match g {
        GeoJson::FeatureCollection(fc) => Ok(fc.features),
        GeoJson::Feature(_) => Err(Error::NotAFeatureCollection("Feature")),
        GeoJson::Geometry(_) => Err(Error::NotAFeatureCollection("Geometry")),
    }
}

/// Converts the geometry of a feature. Returns `None` (after logging a warning)
/// if the geometry is present, but invalid.
fn geometry_of(idx: usize, feature: &mut Feature) -> Option<Geometry<f64>> {
    let geometry = feature.geometry.take()?;
    match Geometry::<f64>::try_from(geometry) {
        Ok(g) => Some(g),
        Err(e) => {
            log::warn!("feature {}: {}, skipping", idx, e);
            None
        }
    }
}

fn geometry_kind(g: &Geometry<f64>) -> &'static str {
    match g {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Returns a non-null property of a feature.
fn property<'a>(feature: &'a Feature, field: &str) -> Option<&'a JsonValue> {
    feature
        .properties
        .as_ref()
        .and_then(|p| p.get(field))
        .filter(|v| !v.is_null())
}

fn roads_from_features(schema: &RoadSchema, identity: &str, features: Vec<Feature>) -> RoadLayer {
    let mut segments = Vec::with_capacity(features.len());

    for (idx, mut feature) in features.into_iter().enumerate() {
        let parts = match geometry_of(idx, &mut feature) {
            Some(Geometry::LineString(line)) => vec![line],
            Some(Geometry::MultiLineString(lines)) => lines.0,
            Some(other) => {
                log::warn!(
                    "feature {}: unsupported road geometry {}, skipping",
                    idx,
                    geometry_kind(&other),
                );
                continue;
            }
            None => continue,
        };

        segments.push(RoadSegment {
            id: idx,
            parts,
            direction: road_direction(schema, idx, &feature),
            cost: road_cost(schema, &feature),
        });
    }

    log::debug!("Read {} road segments from {:?}", segments.len(), identity);
    RoadLayer {
        identity: identity.to_string(),
        segments,
    }
}

fn road_direction(schema: &RoadSchema, idx: usize, feature: &Feature) -> Direction {
    let Some(field) = schema.direction_field.as_deref() else {
        return Direction::Both;
    };

    let parsed = match property(feature, field) {
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .ok_or_else(|| InvalidDirection(n.to_string()))
            .and_then(Direction::from_number),
        Some(JsonValue::String(s)) => s.parse(),
        Some(other) => Err(InvalidDirection(other.to_string())),
        None => {
            log::debug!("feature {}: no direction code, assuming both directions", idx);
            return Direction::Both;
        }
    };

    parsed.unwrap_or_else(|e| {
        log::warn!("feature {}: {}, assuming both directions", idx, e);
        Direction::Both
    })
}

fn road_cost(schema: &RoadSchema, feature: &Feature) -> CostAttribute {
    let Some(field) = schema.cost_field.as_deref() else {
        return CostAttribute::Missing;
    };

    match property(feature, field) {
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map_or_else(|| CostAttribute::Unparseable(n.to_string()), CostAttribute::from_number),
        Some(JsonValue::String(s)) => CostAttribute::parse(s),
        Some(other) => CostAttribute::Unparseable(other.to_string()),
        None => CostAttribute::Missing,
    }
}

fn points_from_features(
    schema: &PointSchema,
    features: Vec<Feature>,
) -> Result<Vec<QueryPoint>, Error> {
    let mut points = Vec::with_capacity(features.len());

    for (idx, mut feature) in features.into_iter().enumerate() {
        let point = match geometry_of(idx, &mut feature) {
            Some(Geometry::Point(p)) => p.0,
            Some(other) => {
                log::warn!(
                    "feature {}: unsupported point geometry {}, skipping",
                    idx,
                    geometry_kind(&other),
                );
                continue;
            }
            None => {
                log::warn!("feature {}: no geometry, skipping", idx);
                continue;
            }
        };

        let id = match property(&feature, &schema.id_field) {
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => {
                return Err(Error::MissingField {
                    field: schema.id_field.clone(),
                    feature: idx,
                })
            }
        };

        points.push(QueryPoint::new(id, point));
    }

    Ok(points)
}
