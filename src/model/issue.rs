use crate::model::field_mapping::ResolvedField;
use indexmap::IndexMap;

static ABSENT: ResolvedField = ResolvedField::Absent;

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub status_name: Option<String>,
    pub assignee_name: Option<String>,
    /// Custom fields keyed by semantic name, see [`crate::model::FieldMapping`].
    pub fields: IndexMap<String, ResolvedField>,
}

// Create
impl Issue {
    pub fn new(
        key: impl ToString,
        summary: Option<&str>,
        status_name: Option<&str>,
        assignee_name: Option<&str>,
    ) -> Self {
        Self {
            key: key.to_string(),
            summary: summary.unwrap_or_default().to_string(),
            status_name: status_name.map(String::from),
            assignee_name: assignee_name.map(String::from),
            fields: IndexMap::new(),
        }
    }

    pub fn with_fields(mut self, fields: IndexMap<String, ResolvedField>) -> Self {
        self.fields = fields;
        self
    }
}

// Accessors
impl Issue {
    pub fn field(&self, semantic_name: &str) -> &ResolvedField {
        self.fields.get(semantic_name).unwrap_or(&ABSENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_summary_becomes_empty() {
        let issue = Issue::new("AL-1", None, Some("Done"), None);
        assert_eq!(issue.summary, "");
        assert_eq!(issue.status_name.as_deref(), Some("Done"));
        assert_eq!(issue.assignee_name, None);
    }

    #[test]
    fn unknown_field_is_absent() {
        let issue = Issue::new("AL-1", Some("Fix bug"), None, None);
        assert_eq!(issue.field("team"), &ResolvedField::Absent);
    }
}
