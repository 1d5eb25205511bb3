//! Runner configuration.

use crate::config::{load_settings, AuditSettings, ConfigError};
use std::path::{Path, PathBuf};

/// Configuration for an audit run, as given on the command line.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// GitHub token used for API calls.
    token: String,
    /// Repositories to audit; empty means discover them.
    repositories: Vec<String>,
    /// Optional settings file.
    settings_path: Option<PathBuf>,
    /// Organization override.
    organization: Option<String>,
    /// LTS branch override.
    lts_branch: Option<String>,
    /// API base URL override.
    api_url: Option<String>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(token: String, repositories: Vec<String>) -> Self {
        Self {
            token,
            repositories,
            settings_path: None,
            organization: None,
            lts_branch: None,
            api_url: None,
        }
    }

    /// Sets the settings file to load.
    pub fn with_settings_path(mut self, settings_path: PathBuf) -> Self {
        self.settings_path = Some(settings_path);
        self
    }

    /// Overrides the organization from the settings.
    pub fn with_organization(mut self, organization: String) -> Self {
        self.organization = Some(organization);
        self
    }

    /// Overrides the LTS branch from the settings.
    pub fn with_lts_branch(mut self, lts_branch: String) -> Self {
        self.lts_branch = Some(lts_branch);
        self
    }

    /// Overrides the API base URL from the settings.
    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = Some(api_url);
        self
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the explicitly requested repositories.
    pub fn repositories(&self) -> &[String] {
        &self.repositories
    }

    /// Returns the settings file path, if any.
    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }

    /// Loads the settings file (or defaults) and applies the overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be loaded or the final
    /// settings are invalid.
    pub fn resolve_settings(&self) -> Result<AuditSettings, ConfigError> {
        let mut settings = load_settings(self.settings_path())?;

        if let Some(organization) = &self.organization {
            settings.organization = organization.clone();
        }
        if let Some(lts_branch) = &self.lts_branch {
            settings.lts_branch = lts_branch.clone();
        }
        if let Some(api_url) = &self.api_url {
            settings.api_url = Some(api_url.clone());
        }

        settings.validate("command line")?;
        Ok(settings)
    }
}
