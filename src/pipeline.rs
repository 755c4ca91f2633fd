//! Input → aggregation → layout → artifact.

use crate::analyze::{Aggregator, IssueAnalysis, StatusClassifier};
use crate::model::{ReportConfig, ReportInput, Result};
use crate::report::{report_path, DocumentWriter, RenderOptions, ReportDocument, ReportInfo, ReportRenderer};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

/// Pure: the same input and config always give an equal document.
pub fn build_document(input: &ReportInput, config: &ReportConfig) -> ReportDocument {
    let classifier = StatusClassifier::new(&config.completed_statuses);
    let data = IssueAnalysis::new(&input.projects, &input.issues, &classifier)
        .include_empty_projects(config.include_empty_projects)
        .aggregate();
    data.render(&RenderOptions::from(config))
}

/// Builds the whole document before touching the file system, so a failed
/// run never leaves a partial report behind.
pub fn write_report(
    input: &ReportInput,
    config: &ReportConfig,
    writer: &dyn DocumentWriter,
    output_dir: &Path,
    generated_at: DateTime<Local>,
) -> Result<PathBuf> {
    let document = build_document(input, config);
    let info = ReportInfo::new(generated_at, input.project_count(), input.issue_count());
    let path = report_path(output_dir, &generated_at, writer.extension())?;
    let path = writer.write(&document, &info, &path)?;
    info!(
        path = %path.display(),
        projects = info.project_count,
        issues = info.issue_count,
        "report written"
    );
    Ok(path)
}
