use anyhow::Context;
use std::{fs, path::Path};

use super::feature::FeatureCollection;

pub fn feature_collection_to_string(
    collection: &FeatureCollection,
    pretty: bool,
) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(collection)
    } else {
        serde_json::to_string(collection)
    }
}

pub fn write_feature_collection(
    collection: &FeatureCollection,
    output_filepath: &Path,
    pretty: bool,
) -> anyhow::Result<()> {
    let geojson_contents = feature_collection_to_string(collection, pretty)?;
    fs::write(output_filepath, geojson_contents)
        .with_context(|| format!("Writing GeoJSON to {:?}", output_filepath))
}
