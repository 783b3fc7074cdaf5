use super::projector::{project, Conversion, FeatureErrorPolicy};
use crate::error::ConversionError;
use crate::geofile::feature::FeatureCollection;
use crate::xml::normalize::normalize;

/// Convert a WFS GetFeature response (GML 3.1.1) into a GeoJSON FeatureCollection.
///
/// Any bad feature member fails the whole conversion.
pub fn convert(wfs_xml: &str) -> Result<FeatureCollection, ConversionError> {
    convert_with_policy(wfs_xml, FeatureErrorPolicy::Abort).map(|conversion| conversion.collection)
}

pub fn convert_with_policy(
    wfs_xml: &str,
    policy: FeatureErrorPolicy,
) -> Result<Conversion, ConversionError> {
    let root = normalize(wfs_xml)?;
    project(&root, policy)
}
