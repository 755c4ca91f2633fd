use crate::analyze::{IssueBucket, ProjectSummary, ReportData, StatusClassifier};
use crate::model::{IssuesByProject, Project};
use itertools::Itertools;
use tracing::{debug, warn};

pub trait Aggregator {
    fn aggregate(&self) -> ReportData;
}

/// Everything one aggregation pass needs: the projects in tracker order, their
/// issues keyed by project key, and the classification rules.
#[derive(Debug, Clone)]
pub struct IssueAnalysis<'a> {
    pub projects: &'a [Project],
    pub issues: &'a IssuesByProject,
    pub classifier: &'a StatusClassifier,
    pub include_empty_projects: bool,
}

impl<'a> IssueAnalysis<'a> {
    pub fn new(
        projects: &'a [Project],
        issues: &'a IssuesByProject,
        classifier: &'a StatusClassifier,
    ) -> Self {
        Self {
            projects,
            issues,
            classifier,
            include_empty_projects: false,
        }
    }

    pub fn include_empty_projects(mut self, include: bool) -> Self {
        self.include_empty_projects = include;
        self
    }
}

impl Aggregator for IssueAnalysis<'_> {
    fn aggregate(&self) -> ReportData {
        for key in self.projects.iter().map(|p| &p.key).duplicates() {
            warn!(project = %key, "project listed more than once, counting its issues once");
        }
        let projects = self.projects.iter().unique_by(|p| p.key.clone()).collect::<Vec<_>>();
        for name in projects.iter().map(|p| &p.name).duplicates() {
            warn!(project = %name, "several projects share this name, merging them in the report");
        }

        let mut data = ReportData::default();
        for project in projects {
            let issues = self
                .issues
                .get(&project.key)
                .map(Vec::as_slice)
                .unwrap_or_default();
            if issues.is_empty() {
                if self.include_empty_projects {
                    data.summary_by_project
                        .entry(project.name.clone())
                        .or_insert_with(|| ProjectSummary::empty(&project.name));
                }
                continue;
            }

            let summary = data
                .summary_by_project
                .entry(project.name.clone())
                .or_insert_with(|| ProjectSummary::empty(&project.name));
            for issue in issues {
                let bucket = self.classifier.classify(issue.status_name.as_deref());
                summary.record(bucket);
                let bucket_map = match bucket {
                    IssueBucket::Completed => &mut data.completed_by_project,
                    IssueBucket::InProgress => &mut data.in_progress_by_project,
                };
                bucket_map
                    .entry(project.name.clone())
                    .or_default()
                    .push(issue.clone());
            }
            debug!(
                project = %project.key,
                total = summary.total_count,
                completed = summary.completed_count,
                "classified project issues"
            );
        }
        data
    }
}
