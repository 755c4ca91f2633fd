use crate::model::{Issue, Project};
use std::collections::HashMap;

/// project key -> issues of that project
pub type IssuesByProject = HashMap<String, Vec<Issue>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportInput {
    pub projects: Vec<Project>,
    pub issues: IssuesByProject,
}

impl ReportInput {
    pub fn new(projects: Vec<Project>, issues: IssuesByProject) -> Self {
        Self { projects, issues }
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }
}
