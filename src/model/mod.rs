mod config;
mod field_mapping;
mod input;
mod issue;
mod project;
mod result;
mod snapshot;

pub use config::{ReportConfig, DEFAULT_BULLET_MARKER, DEFAULT_COMPLETED_STATUSES, DEFAULT_TITLE};
pub use field_mapping::{FieldMapping, ResolvedField, FIELD_MAPPING_VERSION};
pub use input::{IssuesByProject, ReportInput};
pub use issue::Issue;
pub use project::Project;
pub use result::{ReportError, Result};
