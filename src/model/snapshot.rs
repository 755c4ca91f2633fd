//! Offline input: projects and issues read from a JSON file shaped like
//!
//! ```json
//! {
//!   "projects": [{ "key": "ALPHA", "name": "Alpha" }],
//!   "issues": {
//!     "ALPHA": [{ "key": "AL-1", "summary": "Fix bug", "status": "Done", "assignee": null }]
//!   }
//! }
//! ```

use crate::model::{FieldMapping, Issue, IssuesByProject, Project, ReportError, ReportInput, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{from_str, Map, Value};
use std::fs;

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    projects: Option<Vec<Option<RawProject>>>,
    #[serde(default)]
    issues: IndexMap<String, Option<Vec<Option<RawIssue>>>>,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    key: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    key: String,
    summary: Option<String>,
    status: Option<String>,
    assignee: Option<String>,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl ReportInput {
    pub fn from_snapshot(path: &str, mapping: &FieldMapping) -> Result<Self> {
        let json_str = fs::read_to_string(path)?;
        Self::parse_snapshot(&json_str, mapping)
    }

    pub fn parse_snapshot(json_str: &str, mapping: &FieldMapping) -> Result<Self> {
        let snapshot: RawSnapshot = from_str(json_str)?;

        let Some(raw_projects) = snapshot.projects else {
            return Err(ReportError::structure("project list is null"));
        };
        let projects = raw_projects
            .into_iter()
            .enumerate()
            .map(|(index, project)| match project {
                Some(project) => Ok(Project::new(project.key, project.name)),
                None => Err(ReportError::structure(format!("project #{index} is null"))),
            })
            .collect::<Result<Vec<_>>>()?;

        let mut issues = IssuesByProject::new();
        for (project_key, raw_issues) in snapshot.issues {
            let Some(raw_issues) = raw_issues else {
                return Err(ReportError::structure(format!(
                    "issue list of project '{project_key}' is null"
                )));
            };
            let mut project_issues = Vec::with_capacity(raw_issues.len());
            for (index, raw_issue) in raw_issues.into_iter().enumerate() {
                let Some(raw_issue) = raw_issue else {
                    return Err(ReportError::structure(format!(
                        "issue #{index} of project '{project_key}' is null"
                    )));
                };
                let issue = Issue::new(
                    raw_issue.key,
                    raw_issue.summary.as_deref(),
                    raw_issue.status.as_deref(),
                    raw_issue.assignee.as_deref(),
                )
                .with_fields(mapping.resolve(&raw_issue.fields));
                project_issues.push(issue);
            }
            issues.insert(project_key, project_issues);
        }

        Ok(ReportInput::new(projects, issues))
    }
}
