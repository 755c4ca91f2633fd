pub mod analyze;
pub mod jira;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use pipeline::{build_document, write_report};
