//! Run summary types.

use crate::report::{LtsStatus, RepositoryFindings};

/// Summary of a complete audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of expected workflow templates.
    pub workflow_templates: usize,

    /// Number of repositories audited.
    pub repositories_audited: usize,

    /// Repositories without the LTS branch.
    pub missing_lts_branches: usize,

    /// Repositories without a stable release.
    pub without_release: usize,

    /// Repositories whose newest release is newer than the latest stable one.
    pub with_newer_release: usize,

    /// Missing workflow files across all repositories.
    pub missing_workflows: usize,

    /// Repositories missing at least one workflow file.
    pub repositories_missing_workflows: usize,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(workflow_templates: usize) -> Self {
        Self {
            workflow_templates,
            ..Default::default()
        }
    }

    /// Updates the summary with the findings of one repository.
    pub fn record(&mut self, findings: &RepositoryFindings) {
        self.repositories_audited += 1;
        if findings.lts == LtsStatus::Missing {
            self.missing_lts_branches += 1;
        }
        if findings.latest_release.is_none() {
            self.without_release += 1;
        }
        if findings.newer_release.is_some() {
            self.with_newer_release += 1;
        }
        if !findings.missing_workflows.is_empty() {
            self.repositories_missing_workflows += 1;
            self.missing_workflows += findings.missing_workflows.len();
        }
    }

    /// Returns true if every audited repository carries every workflow template.
    #[must_use]
    pub fn workflows_complete(&self) -> bool {
        self.missing_workflows == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ReleaseRecord;

    fn findings(lts: LtsStatus, released: bool, missing: &[&str]) -> RepositoryFindings {
        RepositoryFindings {
            repository: "nextcloud/app".to_string(),
            lts,
            latest_release: released.then(|| ReleaseRecord {
                tag_name: "v1.0.0".to_string(),
                name: None,
                prerelease: false,
            }),
            newer_release: None,
            missing_workflows: missing.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn can_record_findings() {
        let mut summary = RunSummary::new(3);

        summary.record(&findings(LtsStatus::Missing, false, &["lint.yml", "psalm.yml"]));
        summary.record(&findings(LtsStatus::Missing, true, &[]));

        assert_eq!(summary.workflow_templates, 3);
        assert_eq!(summary.repositories_audited, 2);
        assert_eq!(summary.missing_lts_branches, 2);
        assert_eq!(summary.without_release, 1);
        assert_eq!(summary.with_newer_release, 0);
        assert_eq!(summary.missing_workflows, 2);
        assert_eq!(summary.repositories_missing_workflows, 1);
        assert!(!summary.workflows_complete());
    }

    #[test]
    fn empty_summary_is_complete() {
        assert!(RunSummary::new(0).workflows_complete());
    }
}
