use crate::model::{ReportError, Result};
use crate::report::document::{CellRole, ReportDocument, ReportInfo, Row, Section};
use crate::report::DocumentWriter;
use markdown_builder::Markdown;
use markdown_table::{Heading, MarkdownTable};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const BULLET_HEADINGS: [&str; 4] = ["", "Key", "Summary", "Assignee"];

#[derive(Debug, Clone, Default)]
pub struct MarkdownWriter;

impl MarkdownWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, document: &ReportDocument, info: &ReportInfo) -> Result<String> {
        let mut doc = Markdown::new();

        doc.header1(document.title.clone());
        for section in &document.sections {
            doc.add_section(section)?;
        }
        doc.add_info(info)?;

        Ok(doc.render())
    }
}

impl DocumentWriter for MarkdownWriter {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn write(&self, document: &ReportDocument, info: &ReportInfo, path: &Path) -> Result<PathBuf> {
        fs::write(path, self.render(document, info)?)?;
        Ok(path.to_path_buf())
    }
}

trait MarkdownExt {
    fn add_section(&mut self, section: &Section) -> Result<()>;
    fn add_info(&mut self, info: &ReportInfo) -> Result<()>;
    fn add_table(&mut self, headings: Vec<String>, rows: Vec<Vec<String>>) -> Result<()>;
}

impl MarkdownExt for Markdown {
    fn add_section(&mut self, section: &Section) -> Result<()> {
        let mut headings: Option<Vec<String>> = None;
        let mut rows: Vec<Vec<String>> = vec![];

        for row in &section.rows {
            match (row.role(), row.cells.len()) {
                (None, _) => {
                    flush(self, &mut headings, &mut rows)?;
                }
                (Some(CellRole::Title), _) => {
                    flush(self, &mut headings, &mut rows)?;
                    self.header2(row.texts().join(" "));
                }
                (Some(CellRole::Header), 1) => {
                    flush(self, &mut headings, &mut rows)?;
                    self.paragraph(format!("**{}**", row.texts().join(" ")));
                }
                (Some(CellRole::Header), _) => {
                    flush(self, &mut headings, &mut rows)?;
                    headings = Some(row.texts());
                }
                (Some(CellRole::Bullet), _) => {
                    if headings.is_none() {
                        headings = Some(BULLET_HEADINGS.map(String::from).to_vec());
                    }
                    rows.push(padded(row, BULLET_HEADINGS.len()));
                }
                (Some(CellRole::Data), _) => {
                    let width = headings.as_ref().map_or(row.cells.len(), Vec::len);
                    rows.push(padded(row, width));
                }
            }
        }
        flush(self, &mut headings, &mut rows)
    }

    fn add_info(&mut self, info: &ReportInfo) -> Result<()> {
        let rows = info
            .rows()
            .into_iter()
            .map(|(label, value)| vec![label.to_string(), value])
            .collect::<Vec<_>>();
        self.add_table(vec!["Report Info".to_string(), "".to_string()], rows)
    }

    fn add_table(&mut self, headings: Vec<String>, rows: Vec<Vec<String>>) -> Result<()> {
        let headings = headings
            .iter()
            .map(|s| Heading::new(escape_cell(s), None))
            .collect::<Vec<_>>();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| escape_cell(cell)).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let mut md_table = MarkdownTable::new(rows);
        md_table.with_headings(headings);

        let table = md_table
            .as_markdown()
            .map_err(|_| ReportError::Render("markdown table has inconsistent columns".into()))?;
        self.elements.push(Box::new(Verbatim(table)));
        Ok(())
    }
}

fn flush(doc: &mut Markdown, headings: &mut Option<Vec<String>>, rows: &mut Vec<Vec<String>>) -> Result<()> {
    match headings.take() {
        Some(headings) if rows.is_empty() => {
            doc.elements.push(Box::new(Verbatim(heading_line(&headings))));
            Ok(())
        }
        Some(headings) => doc.add_table(headings, std::mem::take(rows)),
        None if !rows.is_empty() => {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            doc.add_table(vec![String::new(); width], std::mem::take(rows))
        }
        None => Ok(()),
    }
}

/// Pre-rendered block emitted as is. `Paragraph` re-flows long text, which
/// would split table rows.
#[derive(Debug, Clone)]
struct Verbatim(String);

impl fmt::Display for Verbatim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Heading and delimiter lines of a table without rows.
fn heading_line(headings: &[String]) -> String {
    let headings = headings.iter().map(|s| escape_cell(s)).collect::<Vec<_>>();
    format!("| {} |\n|{}|\n", headings.join(" | "), vec!["---"; headings.len()].join("|"))
}

/// Cell text must not close the cell or end the row.
fn escape_cell(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}

fn padded(row: &Row, width: usize) -> Vec<String> {
    let mut texts = row.texts();
    texts.resize(width.max(texts.len()), String::new());
    texts
}
