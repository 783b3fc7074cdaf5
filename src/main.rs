extern crate log;
use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};
use wfs2geojson::convert_with_policy;
use wfs2geojson::geofile::geojson::write_feature_collection;
use wfs2geojson::wfs::projector::FeatureErrorPolicy;

/// Convert a WFS GetFeature response into a GeoJSON FeatureCollection.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
struct Config {
    input_filepath: PathBuf,
    output_filepath: PathBuf,
    #[serde(default)]
    on_feature_error: FeatureErrorPolicy,
    #[serde(default)]
    pretty: bool,
    #[serde(default)]
    validate: bool,
}

fn read_config(config_filepath: &str) -> anyhow::Result<Config> {
    if !Path::new(config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", config_filepath));
    }
    let config_contents = read_to_string(config_filepath)?;
    Ok(serde_yaml::from_str(&config_contents)?)
}

fn run(config: &Config) -> anyhow::Result<()> {
    log::info!("Reading WFS response from {:?}", &config.input_filepath);
    let wfs_xml = read_to_string(&config.input_filepath)?;

    let conversion = convert_with_policy(&wfs_xml, config.on_feature_error)?;
    for failed in &conversion.failed_features {
        log::warn!("Skipped feature member {}: {}", failed.index, failed.error);
    }
    log::info!(
        "Converted {} features",
        conversion.collection.features.len()
    );

    if config.validate {
        match conversion.collection.validate() {
            Ok(()) => log::info!("Output is valid RFC 7946 GeoJSON"),
            Err(err) => log::warn!("Output is not strict RFC 7946 GeoJSON: {}", err),
        }
    }

    log::info!("Writing GeoJSON to {:?}", &config.output_filepath);
    write_feature_collection(
        &conversion.collection,
        &config.output_filepath,
        config.pretty,
    )
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let config = read_config(&args.config_filepath)?;
    run(&config)
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use testdir::testdir;

    use super::{read_config, run, Config};
    use wfs2geojson::wfs::projector::FeatureErrorPolicy;

    const WFS_RESPONSE: &str = r#"<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs" xmlns:gml="http://www.opengis.net/gml">
  <gml:featureMember><station><Shape><gml:Point><gml:coordinates>10.09,46.37</gml:coordinates></gml:Point></Shape><name>Alp Grüm</name></station></gml:featureMember>
  <gml:featureMember><station><Shape><gml:Point><gml:coordinates>10.09 46.37</gml:coordinates></gml:Point></Shape></station></gml:featureMember>
</wfs:FeatureCollection>"#;

    #[test]
    fn test_read_config() {
        let test_dir = testdir!();
        let config_filepath = test_dir.join("config.yaml");
        std::fs::write(
            &config_filepath,
            "input_filepath: stations.xml\noutput_filepath: stations.json\non_feature_error: collect\n",
        )
        .unwrap();

        let config = read_config(config_filepath.to_str().unwrap()).unwrap();
        assert_eq!(FeatureErrorPolicy::Collect, config.on_feature_error);
        assert!(!config.pretty);
        assert!(!config.validate);
    }

    #[test]
    fn test_read_missing_config() {
        let test_dir = testdir!();
        let config_filepath = test_dir.join("missing.yaml");
        assert!(read_config(config_filepath.to_str().unwrap()).is_err());
    }

    #[rstest]
    #[case(FeatureErrorPolicy::Abort, None)]
    #[case(FeatureErrorPolicy::Collect, Some(1))]
    fn test_run(#[case] on_feature_error: FeatureErrorPolicy, #[case] written: Option<usize>) {
        let test_dir = testdir!();
        let input_filepath = test_dir.join("stations.xml");
        std::fs::write(&input_filepath, WFS_RESPONSE).unwrap();
        let output_filepath = test_dir.join("stations.json");

        let config = Config {
            input_filepath,
            output_filepath: output_filepath.clone(),
            on_feature_error,
            pretty: true,
            validate: true,
        };
        let result = run(&config);

        match written {
            Some(feature_count) => {
                result.unwrap();
                let contents = std::fs::read_to_string(&output_filepath).unwrap();
                let geojson: serde_json::Value = serde_json::from_str(&contents).unwrap();
                assert_eq!(
                    feature_count,
                    geojson["features"].as_array().unwrap().len()
                );
            }
            None => {
                assert!(result.is_err());
                assert!(!output_filepath.exists());
            }
        }
    }
}
