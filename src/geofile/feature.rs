use anyhow::anyhow;
use geojson::JsonObject;
use serde::Serialize;
use serde_json::Value;

/// Geometry of a projected feature. All three members are always written, as `null` when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geometry_type: Option<String>,
    pub coordinates: Option<Value>,
    // Sub-geometries are passed through as rendered from the XML tree, not parsed.
    pub geometries: Option<Value>,
}

impl Geometry {
    /// Geometry of a feature without a usable `Shape`.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: JsonObject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Check whether the collection reads back as strict RFC 7946 GeoJSON.
    ///
    /// Coordinates taken from nested bracketed text and passed-through sub-geometries
    /// do not, the collection itself is left untouched either way.
    pub fn validate(&self) -> anyhow::Result<()> {
        match geojson::GeoJson::from_json_value(self.to_json()?)? {
            geojson::GeoJson::FeatureCollection(_) => Ok(()),
            other => Err(anyhow!("Expected a FeatureCollection, read {:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use geojson::JsonObject;
    use serde_json::json;

    use super::{Feature, FeatureCollection, Geometry};

    fn point_feature() -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), json!("Passo del Bernina"));
        Feature {
            geometry: Geometry {
                geometry_type: Some("Point".to_string()),
                coordinates: Some(json!([6.61, 46.98])),
                geometries: None,
            },
            properties,
        }
    }

    #[test]
    fn test_serialized_shape() {
        let collection = FeatureCollection {
            features: vec![point_feature()],
        };
        assert_eq!(
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [6.61, 46.98], "geometries": null},
                    "properties": {"name": "Passo del Bernina"},
                }],
            }),
            collection.to_json().unwrap()
        );
    }

    #[test]
    fn test_empty_geometry_serializes_nulls() {
        assert_eq!(
            json!({"type": null, "coordinates": null, "geometries": null}),
            serde_json::to_value(Geometry::empty()).unwrap()
        );
    }

    #[test]
    fn test_validate() {
        let mut collection = FeatureCollection {
            features: vec![point_feature()],
        };
        assert!(collection.validate().is_ok());

        collection.features.push(Feature {
            geometry: Geometry::empty(),
            properties: JsonObject::new(),
        });
        assert!(collection.validate().is_err());
    }
}
