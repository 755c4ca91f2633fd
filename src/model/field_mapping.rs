//! Explicit mapping of tracker schema field ids (e.g. `customfield_10006`) to
//! the semantic names the report uses (e.g. `team`).
//!
//! The mapping is resolved once when raw tracker issues are decoded, so the
//! rest of the crate only ever sees a typed [`ResolvedField`].

use crate::model::{ReportError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

pub const FIELD_MAPPING_VERSION: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedField {
    Value(String),
    /// The field is not present on the issue, or is explicitly null.
    Absent,
    /// The field is present but its shape is not one we know how to read.
    Unrecognized,
}

impl ResolvedField {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedField::Value(value) => Some(value),
            ResolvedField::Absent | ResolvedField::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub version: u64,
    /// schema field id -> semantic name
    pub fields: IndexMap<String, String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            version: FIELD_MAPPING_VERSION,
            fields: IndexMap::new(),
        }
    }
}

// Parser
impl FieldMapping {
    pub fn parse(value: &Value) -> Result<Self> {
        let version = match &value["version"] {
            Value::Null => FIELD_MAPPING_VERSION,
            version => version
                .as_u64()
                .ok_or_else(|| ReportError::config("'fieldMapping.version' is not a number"))?,
        };
        if version != FIELD_MAPPING_VERSION {
            return Err(ReportError::config(format!(
                "unsupported field mapping version {version} (expected {FIELD_MAPPING_VERSION})"
            )));
        }

        let mut fields = IndexMap::new();
        match &value["fields"] {
            Value::Null => {}
            Value::Object(entries) => {
                for (field_id, name) in entries {
                    let Some(name) = name.as_str() else {
                        return Err(ReportError::config(format!(
                            "field '{field_id}' must map to a string name"
                        )));
                    };
                    fields.insert(field_id.clone(), name.to_string());
                }
            }
            _ => return Err(ReportError::config("'fieldMapping.fields' is not an object")),
        }
        Ok(Self { version, fields })
    }
}

// Resolve
impl FieldMapping {
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn resolve(&self, raw_fields: &Map<String, Value>) -> IndexMap<String, ResolvedField> {
        self.fields
            .iter()
            .map(|(field_id, name)| (name.clone(), resolve_value(raw_fields.get(field_id))))
            .collect()
    }
}

fn resolve_value(value: Option<&Value>) -> ResolvedField {
    match value {
        None | Some(Value::Null) => ResolvedField::Absent,
        Some(Value::String(s)) => ResolvedField::Value(s.clone()),
        Some(Value::Number(n)) => ResolvedField::Value(n.to_string()),
        Some(Value::Bool(b)) => ResolvedField::Value(b.to_string()),
        Some(Value::Object(object)) => ["value", "displayName", "name"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map(|s| ResolvedField::Value(s.to_string()))
            .unwrap_or(ResolvedField::Unrecognized),
        Some(Value::Array(items)) => {
            if items.is_empty() {
                return ResolvedField::Absent;
            }
            let resolved = items
                .iter()
                .map(|item| resolve_value(Some(item)))
                .collect::<Vec<_>>();
            let values = resolved.iter().filter_map(ResolvedField::as_str).collect::<Vec<_>>();
            if values.len() == resolved.len() {
                ResolvedField::Value(values.join(", "))
            } else {
                ResolvedField::Unrecognized
            }
        }
    }
}
