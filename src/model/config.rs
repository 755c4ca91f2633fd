use crate::model::field_mapping::FieldMapping;
use crate::model::{ReportError, Result};
use serde_json::{from_str, Value};
use std::fs;

pub const DEFAULT_COMPLETED_STATUSES: [&str; 3] = ["Done", "Closed", "Resolved"];
pub const DEFAULT_BULLET_MARKER: &str = "Φ";
pub const DEFAULT_TITLE: &str = "JIRA STATUS REPORT";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub completed_statuses: Vec<String>,
    pub include_empty_projects: bool,
    pub bullet_marker: String,
    pub title: String,
    pub field_mapping: FieldMapping,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            completed_statuses: DEFAULT_COMPLETED_STATUSES.map(String::from).to_vec(),
            include_empty_projects: false,
            bullet_marker: DEFAULT_BULLET_MARKER.to_string(),
            title: DEFAULT_TITLE.to_string(),
            field_mapping: FieldMapping::default(),
        }
    }
}

// Create
impl ReportConfig {
    pub fn from_config(path: &str) -> Result<Self> {
        let json_str = fs::read_to_string(path)?;
        Self::parse(&json_str)
    }
}

// Parser
impl ReportConfig {
    pub fn parse(json_str: &str) -> Result<Self> {
        let details: Value = from_str(json_str)?;
        if !details.is_object() {
            return Err(ReportError::config("report config must be a JSON object"));
        }
        let mut config = Self::default();

        match &details["completedStatuses"] {
            Value::Null => {}
            Value::Array(statuses) => {
                config.completed_statuses = statuses
                    .iter()
                    .map(|status| {
                        status.as_str().map(String::from).ok_or_else(|| {
                            ReportError::config("'completedStatuses' must contain only strings")
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
            }
            _ => return Err(ReportError::config("'completedStatuses' is not an array")),
        }
        match &details["includeEmptyProjects"] {
            Value::Null => {}
            Value::Bool(include) => config.include_empty_projects = *include,
            _ => return Err(ReportError::config("'includeEmptyProjects' is not a boolean")),
        }
        match &details["bulletMarker"] {
            Value::Null => {}
            Value::String(marker) => config.bullet_marker = marker.clone(),
            _ => return Err(ReportError::config("'bulletMarker' is not a string")),
        }
        match &details["title"] {
            Value::Null => {}
            Value::String(title) => config.title = title.clone(),
            _ => return Err(ReportError::config("'title' is not a string")),
        }
        if !details["fieldMapping"].is_null() {
            config.field_mapping = FieldMapping::parse(&details["fieldMapping"])?;
        }
        Ok(config)
    }
}
