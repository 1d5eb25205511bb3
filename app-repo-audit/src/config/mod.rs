//! Audit settings.
//!
//! Settings come from built-in defaults, optionally overlaid by a TOML file
//! and finally by command line overrides.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{AuditSettings, TemplateSource};

use std::path::Path;
use tracing::info;

/// Resolves the settings for a run.
///
/// Reads `path` when given, otherwise starts from [`AuditSettings::default`],
/// then validates the result.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be loaded or the settings are invalid.
pub fn load_settings(path: Option<&Path>) -> Result<AuditSettings, ConfigError> {
    let (settings, origin) = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading settings file");
            (AuditSettings::load(path)?, path.display().to_string())
        }
        None => (AuditSettings::default(), "<defaults>".to_string()),
    };

    settings.validate(&origin)?;
    Ok(settings)
}
