use geojson::JsonObject;
use serde::Deserialize;
use serde_json::Value;

use super::geometry::{extract_geometry, SHAPE};
use crate::error::{ConversionError, FeatureError, StructureError};
use crate::geofile::feature::{Feature, FeatureCollection};
use crate::xml::tree::{Element, Entry};

const FEATURE_COLLECTION: &str = "FeatureCollection";
const FEATURE_MEMBER: &str = "featureMember";

/// What to do when a single feature member can not be projected.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeatureErrorPolicy {
    /// Fail the whole conversion on the first bad feature member.
    #[default]
    Abort,
    /// Leave bad feature members out and report them next to the result.
    Collect,
}

/// A feature member left out under [`FeatureErrorPolicy::Collect`].
#[derive(Debug)]
pub struct FailedFeature {
    /// Position of the member among all feature members of the document.
    pub index: usize,
    pub error: FeatureError,
}

#[derive(Debug)]
pub struct Conversion {
    pub collection: FeatureCollection,
    pub failed_features: Vec<FailedFeature>,
}

/// Project a normalized WFS response onto a GeoJSON FeatureCollection.
///
/// Features keep the order of their members in the document. Missing `FeatureCollection`
/// or `featureMember` containers always fail the call, feature level failures are handled
/// according to `policy`.
pub fn project(root: &Element, policy: FeatureErrorPolicy) -> Result<Conversion, ConversionError> {
    let feature_collection = root
        .get(FEATURE_COLLECTION)
        .and_then(|entry| entry.elements().first())
        .ok_or(StructureError::MissingFeatureCollection)?;
    let members = feature_collection
        .get(FEATURE_MEMBER)
        .ok_or(StructureError::MissingFeatureMember)?
        .elements();

    let mut features = Vec::with_capacity(members.len());
    let mut failed_features = Vec::new();
    for (index, member) in members.iter().enumerate() {
        match project_feature(member) {
            Ok(feature) => features.push(feature),
            Err(error) => match policy {
                FeatureErrorPolicy::Abort => {
                    return Err(ConversionError::Feature {
                        index,
                        source: error,
                    })
                }
                FeatureErrorPolicy::Collect => {
                    log::debug!("Skipping feature member {}: {}", index, error);
                    failed_features.push(FailedFeature { index, error });
                }
            },
        }
    }
    log::debug!(
        "Projected {} of {} feature members",
        features.len(),
        members.len()
    );

    Ok(Conversion {
        collection: FeatureCollection { features },
        failed_features,
    })
}

fn project_feature(member: &Element) -> Result<Feature, FeatureError> {
    // The member wraps a single element named after the service defined feature type.
    let (feature_type, entry) = member
        .sole_child()
        .map_err(|keys| FeatureError::AmbiguousMember { keys })?
        .ok_or(FeatureError::EmptyMember)?;
    let attributes = entry.single().ok_or_else(|| FeatureError::Repeated {
        name: feature_type.to_string(),
    })?;

    Ok(Feature {
        geometry: extract_geometry(attributes.get(SHAPE))?,
        properties: extract_properties(attributes),
    })
}

fn extract_properties(attributes: &Element) -> JsonObject {
    attributes
        .children()
        .filter(|(name, _)| *name != SHAPE)
        .map(|(name, entry)| (name.to_string(), property_value(entry)))
        .collect()
}

/// Elements carrying text become their text, anything else is kept as rendered.
fn property_value(entry: &Entry) -> Value {
    match entry.single().and_then(|element| element.text.as_ref()) {
        Some(text) => Value::String(text.clone()),
        None => entry.to_json(),
    }
}
