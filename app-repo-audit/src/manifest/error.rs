//! Manifest parsing error types.

use thiserror::Error;

/// Errors that can occur while parsing an app manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The document is not well-formed or has an unexpected shape.
    #[error("Malformed manifest: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// The document has no `<version>` element.
    #[error("Manifest has no version")]
    MissingVersion,
}
