use serde_json::Value;

use crate::error::{CoordinateFormatError, FeatureError};
use crate::geofile::feature::Geometry;
use crate::xml::tree::Entry;

/// Name of the geometry container of a feature.
pub const SHAPE: &str = "Shape";
const COORDINATES: &str = "coordinates";
const GEOMETRIES: &str = "geometries";

/// Read the text of a `coordinates` element as a JSON array.
///
/// The text is expected to be a flat comma separated number list such as `6.6103,46.9838`
/// and is parsed as if it were surrounded by brackets. Bracketed input parses too, but
/// gains an extra level of nesting: `[1,2],[3,4]` becomes `[[1,2],[3,4]]`.
pub fn parse_coordinates(entry: &Entry) -> Result<Value, CoordinateFormatError> {
    let element = entry.single().ok_or(CoordinateFormatError::Repeated)?;
    let text = element
        .text
        .as_deref()
        .ok_or(CoordinateFormatError::MissingText)?;
    serde_json::from_str(&format!("[{}]", text)).map_err(|source| CoordinateFormatError::Invalid {
        text: text.to_string(),
        source,
    })
}

/// Build the geometry of a feature from its `Shape` entry.
///
/// A missing or empty `Shape` gives a geometry with every member unset. Otherwise the
/// `Shape` must hold exactly one geometry element, whose name becomes the geometry type.
pub fn extract_geometry(shape: Option<&Entry>) -> Result<Geometry, FeatureError> {
    let shape = match shape {
        Some(shape) => shape.single().ok_or_else(|| FeatureError::Repeated {
            name: SHAPE.to_string(),
        })?,
        None => return Ok(Geometry::empty()),
    };
    let (geometry_type, body) = match shape
        .sole_child()
        .map_err(|keys| FeatureError::AmbiguousShape { keys })?
    {
        Some(child) => child,
        None => return Ok(Geometry::empty()),
    };
    let body = body.single().ok_or_else(|| FeatureError::Repeated {
        name: geometry_type.to_string(),
    })?;

    let coordinates = body.get(COORDINATES).map(parse_coordinates).transpose()?;
    let geometries = body.get(GEOMETRIES).map(Entry::to_json);
    Ok(Geometry {
        geometry_type: Some(geometry_type.to_string()),
        coordinates,
        geometries,
    })
}
