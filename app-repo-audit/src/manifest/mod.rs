//! App manifest (`appinfo/info.xml`) parsing.
//!
//! Only the pieces the audit reports are extracted: the app version and the
//! platform compatibility range declared under
//! `<dependencies><nextcloud min-version=".." max-version=".."/></dependencies>`.

mod error;

pub use error::ManifestError;

use serde::Deserialize;
use std::fmt;

/// Platform versions an app release declares support for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compatibility {
    /// Lowest supported platform version.
    pub min_version: Option<String>,

    /// Highest supported platform version.
    pub max_version: Option<String>,
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.min_version.as_deref().unwrap_or("?"),
            self.max_version.as_deref().unwrap_or("?")
        )
    }
}

/// The parts of an app manifest the audit reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// App version.
    pub version: String,

    /// Supported platform range.
    pub compatibility: Compatibility,
}

#[derive(Debug, Deserialize)]
struct InfoDocument {
    version: Option<String>,
    dependencies: Option<Dependencies>,
}

#[derive(Debug, Deserialize)]
struct Dependencies {
    nextcloud: Option<PlatformRequirement>,
}

#[derive(Debug, Deserialize)]
struct PlatformRequirement {
    #[serde(rename = "@min-version")]
    min_version: Option<String>,
    #[serde(rename = "@max-version")]
    max_version: Option<String>,
}

impl Manifest {
    /// Parses a manifest document.
    ///
    /// Elements other than the version and the platform dependency are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the document is malformed or carries no version.
    pub fn parse(document: &str) -> Result<Self, ManifestError> {
        let info: InfoDocument = quick_xml::de::from_str(document)?;

        let version = info
            .version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ManifestError::MissingVersion)?;

        let compatibility = info
            .dependencies
            .and_then(|deps| deps.nextcloud)
            .map(|platform| Compatibility {
                min_version: platform.min_version,
                max_version: platform.max_version,
            })
            .unwrap_or_default();

        Ok(Self {
            version,
            compatibility,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR_INFO: &str = r#"<?xml version="1.0"?>
<info xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
      xsi:noNamespaceSchemaLocation="https://apps.nextcloud.com/schema/apps/info.xsd">
    <id>calendar</id>
    <name>Calendar</name>
    <name lang="de">Kalender</name>
    <summary>A Calendar app for Nextcloud</summary>
    <version>3.5.0</version>
    <licence>agpl</licence>
    <author>Georg Ehrke</author>
    <author>Thomas Citharel</author>
    <category>office</category>
    <category>organization</category>
    <dependencies>
        <php min-version="7.4" max-version="8.1"/>
        <nextcloud min-version="23" max-version="25"/>
    </dependencies>
</info>
"#;

    #[test]
    fn parses_version_and_compatibility() {
        let manifest = Manifest::parse(CALENDAR_INFO).unwrap();

        assert_eq!(manifest.version, "3.5.0");
        assert_eq!(manifest.compatibility.min_version.as_deref(), Some("23"));
        assert_eq!(manifest.compatibility.max_version.as_deref(), Some("25"));
    }

    #[test]
    fn missing_dependencies_leave_range_unknown() {
        let manifest = Manifest::parse("<info><version>1.0.0</version></info>").unwrap();

        assert_eq!(manifest.compatibility, Compatibility::default());
        assert_eq!(manifest.compatibility.to_string(), "? to ?");
    }

    #[test]
    fn open_ended_range_renders_placeholder() {
        let manifest = Manifest::parse(
            r#"<info><version>2.1.0</version><dependencies><nextcloud min-version="24"/></dependencies></info>"#,
        )
        .unwrap();

        assert_eq!(manifest.compatibility.to_string(), "24 to ?");
    }

    #[test]
    fn rejects_missing_version() {
        let result = Manifest::parse("<info><id>text</id></info>");
        assert!(matches!(result, Err(ManifestError::MissingVersion)));
    }

    #[test]
    fn rejects_malformed_document() {
        let result = Manifest::parse("<info><version>1.0.0</version>");
        assert!(matches!(result, Err(ManifestError::Xml(_))));
    }
}
