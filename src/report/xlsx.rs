//! XLSX output.
//!
//! Sheet `Jira Tasks` holds the document: the report title on the first row,
//! a blank row, then every section in order. Sheet `Report Info` holds the run
//! metadata. Styling never touches cell values.

use crate::model::Result;
use crate::report::document::{Cell, CellRole, CellValue, ReportDocument, ReportInfo, Row};
use crate::report::DocumentWriter;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::{Path, PathBuf};

pub const TASKS_SHEET: &str = "Jira Tasks";
pub const INFO_SHEET: &str = "Report Info";

/// Merged title rows never span fewer columns than this.
const MIN_MERGE_COLUMNS: u16 = 3;

#[derive(Debug, Clone, Default)]
pub struct XlsxWriter;

struct XlsxFormats {
    document_title: Format,
    title: Format,
    header: Format,
    data: Format,
    bullet: Format,
}

impl XlsxFormats {
    fn new() -> Self {
        let document_title = Format::new()
            .set_bold()
            .set_font_size(14)
            .set_align(FormatAlign::Center)
            .set_background_color(0x9DC3E6) // Light blue
            .set_border(FormatBorder::Thin);

        let title = Format::new()
            .set_bold()
            .set_font_size(12)
            .set_background_color(0xC6EFCE) // Light green
            .set_border(FormatBorder::Thin);

        let header = Format::new()
            .set_bold()
            .set_background_color(0xFFF2CC) // Light yellow
            .set_border(FormatBorder::Thin);

        let data = Format::new();

        let bullet = Format::new().set_border(FormatBorder::Thin);

        Self {
            document_title,
            title,
            header,
            data,
            bullet,
        }
    }

    fn for_role(&self, role: CellRole) -> &Format {
        match role {
            CellRole::Title => &self.title,
            CellRole::Header => &self.header,
            CellRole::Data => &self.data,
            CellRole::Bullet => &self.bullet,
        }
    }
}

impl XlsxWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_bytes(&self, document: &ReportDocument, info: &ReportInfo) -> Result<Vec<u8>> {
        let mut workbook = self.build_workbook(document, info)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build_workbook(&self, document: &ReportDocument, info: &ReportInfo) -> Result<Workbook> {
        let formats = XlsxFormats::new();
        let mut workbook = Workbook::new();
        add_tasks_sheet(&mut workbook, document, &formats)?;
        add_info_sheet(&mut workbook, info)?;
        Ok(workbook)
    }
}

impl DocumentWriter for XlsxWriter {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn write(&self, document: &ReportDocument, info: &ReportInfo, path: &Path) -> Result<PathBuf> {
        let mut workbook = self.build_workbook(document, info)?;
        workbook.save(path)?;
        Ok(path.to_path_buf())
    }
}

fn add_tasks_sheet(workbook: &mut Workbook, document: &ReportDocument, formats: &XlsxFormats) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(TASKS_SHEET)?;

    let last_merge_col = (document.column_count() as u16).max(MIN_MERGE_COLUMNS) - 1;
    let mut row_num = 0u32;

    sheet.merge_range(row_num, 0, row_num, last_merge_col, &document.title, &formats.document_title)?;
    row_num += 2;

    let mut previous_ends_blank = true;
    for section in &document.sections {
        if !previous_ends_blank {
            row_num += 1;
        }
        for row in &section.rows {
            write_row(sheet, row_num, row, last_merge_col, formats)?;
            row_num += 1;
        }
        previous_ends_blank = section.ends_blank();
    }

    sheet.autofit();
    Ok(())
}

fn write_row(sheet: &mut Worksheet, row_num: u32, row: &Row, last_merge_col: u16, formats: &XlsxFormats) -> Result<()> {
    if let [cell] = row.cells.as_slice() {
        if matches!(cell.role, CellRole::Title | CellRole::Header) {
            sheet.merge_range(row_num, 0, row_num, last_merge_col, &cell.text(), formats.for_role(cell.role))?;
            return Ok(());
        }
    }
    for (col, cell) in row.cells.iter().enumerate() {
        write_cell(sheet, row_num, col as u16, cell, formats)?;
    }
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row_num: u32, col: u16, cell: &Cell, formats: &XlsxFormats) -> Result<()> {
    let format = formats.for_role(cell.role);
    match &cell.value {
        CellValue::Text(text) => sheet.write_with_format(row_num, col, text.as_str(), format)?,
        CellValue::Integer(value) => sheet.write_with_format(row_num, col, *value as f64, format)?,
    };
    Ok(())
}

fn add_info_sheet(workbook: &mut Workbook, info: &ReportInfo) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(INFO_SHEET)?;

    let generated_at = info.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    sheet.write(0, 0, "Report Generated")?;
    sheet.write(0, 1, generated_at.as_str())?;
    sheet.write(1, 0, "Total Projects")?;
    sheet.write(1, 1, info.project_count as f64)?;
    sheet.write(2, 0, "Total Issues")?;
    sheet.write(2, 1, info.issue_count as f64)?;

    sheet.autofit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::ReportData;
    use crate::report::{RenderOptions, ReportRenderer};
    use chrono::Local;

    #[test]
    fn empty_report_still_produces_a_workbook() {
        let document = ReportData::default().render(&RenderOptions::default());
        let info = ReportInfo::new(Local::now(), 0, 0);

        let bytes = XlsxWriter::new().to_bytes(&document, &info).unwrap();

        // XLSX is a zip container
        assert!(bytes.starts_with(b"PK"));
    }
}
