mod aggregator;
mod status;

pub use aggregator::{Aggregator, IssueAnalysis};
pub use status::StatusClassifier;

use crate::model::Issue;
use std::collections::BTreeMap;

/// project name -> issues, kept in name order so every consumer iterates
/// projects alphabetically.
pub type IssuesByName = BTreeMap<String, Vec<Issue>>;
pub type SummariesByName = BTreeMap<String, ProjectSummary>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueBucket {
    Completed,
    InProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub project_name: String,
    pub total_count: usize,
    pub completed_count: usize,
    pub completion_percent: f64,
}

impl ProjectSummary {
    pub fn new(project_name: impl ToString, total_count: usize, completed_count: usize) -> Self {
        Self {
            project_name: project_name.to_string(),
            total_count,
            completed_count,
            completion_percent: completion_percent(total_count, completed_count),
        }
    }

    pub fn empty(project_name: impl ToString) -> Self {
        Self::new(project_name, 0, 0)
    }

    pub fn record(&mut self, bucket: IssueBucket) {
        self.total_count += 1;
        if bucket == IssueBucket::Completed {
            self.completed_count += 1;
        }
        self.completion_percent = completion_percent(self.total_count, self.completed_count);
    }
}

/// Percentage rounded half away from zero to one decimal; `0.0` for no issues.
fn completion_percent(total_count: usize, completed_count: usize) -> f64 {
    if total_count == 0 {
        return 0.0;
    }
    (completed_count as f64 * 1000.0 / total_count as f64).round() / 10.0
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportData {
    pub completed_by_project: IssuesByName,
    pub in_progress_by_project: IssuesByName,
    pub summary_by_project: SummariesByName,
}

impl ReportData {
    pub fn bucket(&self, bucket: IssueBucket) -> &IssuesByName {
        match bucket {
            IssueBucket::Completed => &self.completed_by_project,
            IssueBucket::InProgress => &self.in_progress_by_project,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_rounded_to_one_decimal() {
        assert_eq!(ProjectSummary::new("A", 3, 2).completion_percent, 66.7);
        assert_eq!(ProjectSummary::new("A", 3, 1).completion_percent, 33.3);
        assert_eq!(ProjectSummary::new("A", 2, 1).completion_percent, 50.0);
        assert_eq!(ProjectSummary::new("A", 400, 1).completion_percent, 0.3);
        assert_eq!(ProjectSummary::new("A", 4, 4).completion_percent, 100.0);
    }

    #[test]
    fn no_issues_is_zero_percent() {
        assert_eq!(ProjectSummary::empty("A").completion_percent, 0.0);
    }

    #[test]
    fn record_keeps_counts_and_percent_in_step() {
        let mut summary = ProjectSummary::empty("A");
        summary.record(IssueBucket::Completed);
        summary.record(IssueBucket::InProgress);
        summary.record(IssueBucket::InProgress);
        assert_eq!(summary, ProjectSummary::new("A", 3, 1));
    }
}
