//! Conversion of WFS GetFeature responses (GML 3.1.1) into GeoJSON FeatureCollections.
//!
//! The XML text is first normalized into a tree keyed by local element names
//! ([`xml::normalize`]), which is then projected onto GeoJSON features ([`wfs::projector`]).
//! Reading and writing files is left to the caller.

extern crate log;
pub mod error;
pub mod geofile;
pub mod wfs;
pub mod xml;

pub use wfs::conversion::{convert, convert_with_policy};
