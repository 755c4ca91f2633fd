//! Decoding of Jira REST payloads into the report model.
//!
//! A `null` where a list is expected, or a `null` list entry, is a structural
//! error. An empty list is simply "no data".

use crate::model::{FieldMapping, Issue, Project, ReportError, Result};
use serde::Deserialize;
use serde_json::{from_str, Map, Value};

#[derive(Debug, Deserialize)]
struct RawProjectPage {
    #[serde(default)]
    values: Option<Vec<Option<RawProject>>>,
    #[serde(rename = "isLast", default)]
    is_last: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    key: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawIssuePage {
    #[serde(rename = "startAt", default)]
    start_at: usize,
    #[serde(default)]
    total: Option<usize>,
    #[serde(default)]
    issues: Option<Vec<Option<RawIssue>>>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    key: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    pub is_last: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssuePage {
    pub start_at: usize,
    pub total: Option<usize>,
    pub issues: Vec<Issue>,
}

impl IssuePage {
    pub fn next_start(&self) -> Option<usize> {
        if self.issues.is_empty() {
            return None;
        }
        let next = self.start_at + self.issues.len();
        match self.total {
            Some(total) if next >= total => None,
            _ => Some(next),
        }
    }
}

pub fn decode_project_page(body: &str) -> Result<ProjectPage> {
    let page: RawProjectPage = from_str(body)?;
    let Some(values) = page.values else {
        return Err(ReportError::structure("project search returned a null project list"));
    };
    let projects = values
        .into_iter()
        .enumerate()
        .map(|(index, project)| match project {
            Some(project) => Ok(Project::new(project.key, project.name)),
            None => Err(ReportError::structure(format!("project #{index} is null"))),
        })
        .collect::<Result<Vec<_>>>()?;
    let is_last = page.is_last.unwrap_or(projects.is_empty());
    Ok(ProjectPage { projects, is_last })
}

pub fn decode_issue_page(project_key: &str, body: &str, mapping: &FieldMapping) -> Result<IssuePage> {
    let page: RawIssuePage = from_str(body)?;
    let Some(raw_issues) = page.issues else {
        return Err(ReportError::structure(format!(
            "issue search for project '{project_key}' returned a null issue list"
        )));
    };
    let mut issues = Vec::with_capacity(raw_issues.len());
    for (index, raw_issue) in raw_issues.into_iter().enumerate() {
        let Some(raw_issue) = raw_issue else {
            return Err(ReportError::structure(format!(
                "issue #{} of project '{project_key}' is null",
                page.start_at + index
            )));
        };
        issues.push(decode_issue(raw_issue, mapping));
    }
    Ok(IssuePage {
        start_at: page.start_at,
        total: page.total,
        issues,
    })
}

fn decode_issue(raw: RawIssue, mapping: &FieldMapping) -> Issue {
    let fields = &raw.fields;
    let summary = fields.get("summary").and_then(Value::as_str);
    let status = fields
        .get("status")
        .and_then(|status| status.get("name"))
        .and_then(Value::as_str);
    let assignee = fields
        .get("assignee")
        .and_then(|assignee| assignee.get("displayName"))
        .and_then(Value::as_str);
    Issue::new(&raw.key, summary, status, assignee).with_fields(mapping.resolve(fields))
}
