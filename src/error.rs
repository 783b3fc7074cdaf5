//! Error types raised while turning a WFS response into GeoJSON.
//!
//! Every error is fatal to the conversion call it happens in, except feature errors
//! collected under [`crate::wfs::projector::FeatureErrorPolicy::Collect`].

use thiserror::Error;

/// The XML text is not well-formed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("element <{name}> is not closed before the end of the document")]
    UnclosedElement { name: String },

    #[error("element at byte {position} is nested deeper than {max_depth} levels")]
    TooDeep { position: usize, max_depth: usize },

    #[error("document has no root element")]
    NoRootElement,

    #[error("document has more than one root element, found <{name}> at byte {position}")]
    MultipleRootElements { name: String, position: usize },

    #[error("text outside of the root element at byte {position}")]
    TextOutsideRoot { position: usize },
}

/// A required container is missing at the collection level.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error(
        "missing FeatureCollection: the document does not have wfs:FeatureCollection as its \
         outermost element"
    )]
    MissingFeatureCollection,

    #[error("missing featureMember: the FeatureCollection does not contain any featureMember")]
    MissingFeatureMember,
}

/// The text of a `coordinates` element can not be read as a flat number list.
#[derive(Debug, Error)]
pub enum CoordinateFormatError {
    #[error("invalid coordinates {text:?}: {source}")]
    Invalid {
        text: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("coordinates element has no text")]
    MissingText,

    #[error("geometry has more than one coordinates element")]
    Repeated,
}

/// A single feature member could not be projected.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("feature member has no feature type element")]
    EmptyMember,

    #[error("feature member has more than one feature type element: {}", .keys.join(", "))]
    AmbiguousMember { keys: Vec<String> },

    #[error("Shape has more than one geometry element: {}", .keys.join(", "))]
    AmbiguousShape { keys: Vec<String> },

    #[error("element {name} is repeated where exactly one is expected")]
    Repeated { name: String },

    #[error(transparent)]
    CoordinateFormat(#[from] CoordinateFormatError),
}

/// Root error of a conversion call.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("feature member {index}: {source}")]
    Feature {
        index: usize,
        #[source]
        source: FeatureError,
    },
}
