//! Reading uploaded spreadsheets into rows of cell strings.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Unsupported file type '{0}'. Upload a .csv, .xlsx or .xls file")]
    UnsupportedFormat(String),

    #[error("Could not read CSV file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not read Excel workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("The workbook has no worksheets")]
    NoWorksheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SpreadsheetFormat {
    pub fn from_filename(filename: &str) -> Result<Self, SpreadsheetError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(SpreadsheetFormat::Csv),
            "xlsx" => Ok(SpreadsheetFormat::Xlsx),
            "xls" => Ok(SpreadsheetFormat::Xls),
            _ => Err(SpreadsheetError::UnsupportedFormat(filename.to_string())),
        }
    }
}

/// One data row, numbered as the admin sees it in their spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub number: usize,
    pub cells: Vec<String>,
}

impl SheetRow {
    /// Trimmed cell contents, or `None` when the cell is missing or blank
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells
            .get(index)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }

    pub fn describe(&self) -> String {
        format!("Row {} ({})", self.number, self.cells.join(", "))
    }

    fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn read(filename: &str, bytes: &[u8]) -> Result<Self, SpreadsheetError> {
        match SpreadsheetFormat::from_filename(filename)? {
            SpreadsheetFormat::Csv => Self::read_csv(bytes),
            SpreadsheetFormat::Xlsx | SpreadsheetFormat::Xls => Self::read_workbook(bytes),
        }
    }

    fn read_csv(bytes: &[u8]) -> Result<Self, SpreadsheetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { rows })
    }

    fn read_workbook(bytes: &[u8]) -> Result<Self, SpreadsheetError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SpreadsheetError::NoWorksheet)??;

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        Ok(Self { rows })
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every non-blank row after the header
    pub fn data_rows(&self) -> impl Iterator<Item = SheetRow> + '_ {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, cells)| SheetRow {
                number: index + 1,
                cells: cells.clone(),
            })
            .filter(|row| !row.is_blank())
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("faculty.csv", SpreadsheetFormat::Csv)]
    #[case("Students.XLSX", SpreadsheetFormat::Xlsx)]
    #[case("legacy.report.xls", SpreadsheetFormat::Xls)]
    fn detects_supported_formats(#[case] filename: &str, #[case] expected: SpreadsheetFormat) {
        assert_eq!(SpreadsheetFormat::from_filename(filename).unwrap(), expected);
    }

    #[rstest]
    #[case("notes.txt")]
    #[case("no_extension")]
    #[case("archive.csv.zip")]
    fn rejects_other_extensions(#[case] filename: &str) {
        assert!(matches!(
            SpreadsheetFormat::from_filename(filename),
            Err(SpreadsheetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn csv_rows_skip_header_and_blank_lines() {
        let csv = "Start Time,End Time\n2026-03-14 09:00,2026-03-14 09:30\n,\n2026-03-14 10:00,2026-03-14 10:30\n";
        let sheet = Sheet::read("slots.csv", csv.as_bytes()).unwrap();

        assert_eq!(sheet.header().unwrap(), ["Start Time", "End Time"]);
        let rows: Vec<_> = sheet.data_rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[1].number, 4);
        assert_eq!(rows[1].cell(0), Some("2026-03-14 10:00"));
    }

    #[test]
    fn short_rows_read_as_missing_cells() {
        let row = SheetRow {
            number: 3,
            cells: vec!["ada@example.edu".to_string(), "  ".to_string()],
        };

        assert_eq!(row.cell(0), Some("ada@example.edu"));
        assert_eq!(row.cell(1), None);
        assert_eq!(row.cell(3), None);
        assert_eq!(row.describe(), "Row 3 (ada@example.edu,   )");
    }
}
