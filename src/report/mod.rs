pub mod document;
pub mod markdown;
pub mod renderer;
pub mod xlsx;

pub use document::{Cell, CellRole, CellValue, ReportDocument, ReportInfo, Row, Section, SectionKind};
pub use markdown::MarkdownWriter;
pub use renderer::{build_bucket_section, build_summary_section, RenderOptions, ReportRenderer};
pub use xlsx::XlsxWriter;

use crate::model::Result;
use chrono::{DateTime, Local};
use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};

/// Serializes a finished [`ReportDocument`] into a concrete artifact.
pub trait DocumentWriter {
    fn extension(&self) -> &'static str;

    fn write(&self, document: &ReportDocument, info: &ReportInfo, path: &Path) -> Result<PathBuf>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Xlsx,
    Markdown,
}

impl ReportFormat {
    pub fn writer(&self) -> Box<dyn DocumentWriter> {
        match self {
            ReportFormat::Xlsx => Box::new(XlsxWriter::new()),
            ReportFormat::Markdown => Box::new(MarkdownWriter::new()),
        }
    }
}

/// `<dir>/JiraTasks-<date>-<millis>.<ext>`, creating `dir` when missing.
pub fn report_path(dir: &Path, generated_at: &DateTime<Local>, extension: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let file_name = format!(
        "JiraTasks-{}-{}.{extension}",
        generated_at.format("%Y-%m-%d"),
        generated_at.timestamp_millis()
    );
    Ok(dir.join(file_name))
}
