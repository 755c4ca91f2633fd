//! Format-independent report layout: sections of rows of role-tagged cells.
//!
//! Writers translate this model one-to-one; column positions are the cell
//! indexes within a row.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellRole {
    Title,
    Header,
    Data,
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Integer(u64),
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Integer(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub role: CellRole,
    pub value: CellValue,
}

impl Cell {
    pub fn new(role: CellRole, value: CellValue) -> Self {
        Self { role, value }
    }

    pub fn title(text: impl ToString) -> Self {
        Self::new(CellRole::Title, CellValue::Text(text.to_string()))
    }

    pub fn header(text: impl ToString) -> Self {
        Self::new(CellRole::Header, CellValue::Text(text.to_string()))
    }

    pub fn data(text: impl ToString) -> Self {
        Self::new(CellRole::Data, CellValue::Text(text.to_string()))
    }

    pub fn integer(value: usize) -> Self {
        Self::new(CellRole::Data, CellValue::Integer(value as u64))
    }

    pub fn bullet(text: impl ToString) -> Self {
        Self::new(CellRole::Bullet, CellValue::Text(text.to_string()))
    }

    pub fn text(&self) -> String {
        self.value.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    /// Role of the first cell; a blank row has none.
    pub fn role(&self) -> Option<CellRole> {
        self.cells.first().map(|cell| cell.role)
    }

    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(Cell::text).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Completed,
    InProgress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self { kind, rows: vec![] }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn ends_blank(&self) -> bool {
        self.rows.last().is_some_and(Row::is_blank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Widest row in the document, used by writers to size merged ranges.
    pub fn column_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| &section.rows)
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0)
    }
}

/// Run metadata written next to the report, not part of the document itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInfo {
    pub generated_at: DateTime<Local>,
    pub project_count: usize,
    pub issue_count: usize,
}

impl ReportInfo {
    pub fn new(generated_at: DateTime<Local>, project_count: usize, issue_count: usize) -> Self {
        Self {
            generated_at,
            project_count,
            issue_count,
        }
    }

    pub fn rows(&self) -> [(&'static str, String); 3] {
        [
            ("Report Generated", self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            ("Total Projects", self.project_count.to_string()),
            ("Total Issues", self.issue_count.to_string()),
        ]
    }
}
