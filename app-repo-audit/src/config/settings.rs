//! Audit settings deserialization and validation.

use crate::config::ConfigError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Where the organization keeps its workflow templates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TemplateSource {
    /// Repository holding the templates (e.g. ".github").
    pub repository: String,

    /// Directory inside the repository.
    pub path: String,

    /// Branch the templates are read from.
    pub branch: String,

    /// File name suffix a template must carry.
    pub suffix: String,
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self {
            repository: ".github".to_string(),
            path: "workflow-templates".to_string(),
            branch: "master".to_string(),
            suffix: ".yml".to_string(),
        }
    }
}

/// Settings driving a single audit run.
///
/// Every field has a default matching the Nextcloud app ecosystem, so an
/// empty settings file (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AuditSettings {
    /// Organization whose repositories are audited.
    pub organization: String,

    /// Long-term-support branch checked in every repository.
    pub lts_branch: String,

    /// Branch names tried, in order, when looking for files on the default branch.
    pub default_branches: Vec<String>,

    /// Path of the app manifest inside a repository.
    pub manifest_path: String,

    /// Directory where a repository keeps its CI workflows.
    pub workflows_dir: String,

    /// Base URL of a GitHub Enterprise API (optional).
    pub api_url: Option<String>,

    /// Workflow template location.
    pub templates: TemplateSource,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            organization: "nextcloud".to_string(),
            lts_branch: "stable24".to_string(),
            default_branches: vec!["master".to_string(), "main".to_string()],
            manifest_path: "appinfo/info.xml".to_string(),
            workflows_dir: ".github/workflows".to_string(),
            api_url: None,
            templates: TemplateSource::default(),
        }
    }
}

impl AuditSettings {
    /// Loads settings from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading audit settings");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Validates the settings.
    ///
    /// `origin` names where the settings came from and is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for the first invalid field.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let required = [
            ("organization", &self.organization),
            ("lts-branch", &self.lts_branch),
            ("manifest-path", &self.manifest_path),
            ("workflows-dir", &self.workflows_dir),
            ("templates.repository", &self.templates.repository),
            ("templates.branch", &self.templates.branch),
            ("templates.suffix", &self.templates.suffix),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(invalid(origin, format!("{key} must not be empty")));
            }
        }

        if self.default_branches.is_empty() {
            return Err(invalid(origin, "default-branches must not be empty".to_string()));
        }
        if self.default_branches.iter().any(|b| b.trim().is_empty()) {
            return Err(invalid(
                origin,
                "default-branches must not contain blank names".to_string(),
            ));
        }

        if let Some(api_url) = &self.api_url {
            if Url::parse(api_url).is_err() {
                return Err(invalid(
                    origin,
                    format!("api-url is not a valid URL: {api_url}"),
                ));
            }
        }

        Ok(())
    }

    /// Path of a workflow file inside an audited repository.
    pub fn workflow_path(&self, template: &str) -> String {
        format!("{}/{}", self.workflows_dir.trim_end_matches('/'), template)
    }
}

fn invalid(origin: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        path: origin.to_string(),
        message,
    }
}
