//! 学员名单解析
//!
//! 支持 CSV 与 XLSX，表头必须包含 `name`、`email`，`phone` 可选。
//! 表头大小写不敏感，行号从 1 开始并计入表头行。

use calamine::{Reader, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;

use crate::errors::{ParcError, Result};
use crate::utils::validate::{normalize_email, validate_email, validate_phone};

/// 单次导入的最大行数
pub const MAX_ROSTER_ROWS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub row: usize,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl RosterRow {
    /// 行内容校验，返回第一条错误
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.name.is_empty() {
            return Err("Name is required.");
        }
        validate_email(&self.email)?;
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }
}

struct Columns {
    name: usize,
    email: usize,
    phone: Option<usize>,
}

impl Columns {
    fn from_headers(headers: impl Iterator<Item = String>) -> Result<Self> {
        let map: HashMap<String, usize> = headers
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let required = |column: &str| {
            map.get(column)
                .copied()
                .ok_or_else(|| ParcError::import(format!("Missing required column: {column}")))
        };

        Ok(Self {
            name: required("name")?,
            email: required("email")?,
            phone: map.get("phone").copied(),
        })
    }

    fn build_row(&self, row: usize, cell: impl Fn(usize) -> String) -> RosterRow {
        RosterRow {
            row,
            name: cell(self.name).trim().to_string(),
            email: normalize_email(&cell(self.email)),
            phone: self
                .phone
                .map(|i| cell(i).trim().to_string())
                .filter(|p| !p.is_empty()),
        }
    }
}

/// 按文件扩展名选择解析器，空行会被跳过
pub fn parse_roster(data: &[u8], filename: &str) -> Result<Vec<RosterRow>> {
    let rows = if filename.to_ascii_lowercase().ends_with(".xlsx") {
        parse_xlsx(data)?
    } else {
        parse_csv(data)?
    };

    if rows.is_empty() {
        return Err(ParcError::import("The roster file contains no data rows."));
    }
    if rows.len() > MAX_ROSTER_ROWS {
        return Err(ParcError::import(format!(
            "A roster may contain at most {MAX_ROSTER_ROWS} rows."
        )));
    }
    Ok(rows)
}

fn parse_csv(data: &[u8]) -> Result<Vec<RosterRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let headers = reader
        .headers()
        .map_err(|e| ParcError::import(format!("Failed to read header row: {e}")))?;
    let columns = Columns::from_headers(headers.iter().map(str::to_string))?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| ParcError::import(format!("Row {} is malformed: {e}", index + 2)))?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        rows.push(columns.build_row(index + 2, |i| {
            record.get(i).unwrap_or_default().to_string()
        }));
    }
    Ok(rows)
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<RosterRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| ParcError::import(format!("Failed to open XLSX file: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ParcError::import("The workbook has no worksheets."))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ParcError::import(format!("Failed to read worksheet: {e}")))?;

    let mut sheet_rows = range.rows();
    let header = sheet_rows
        .next()
        .ok_or_else(|| ParcError::import("The roster file is empty."))?;
    let columns = Columns::from_headers(header.iter().map(|cell| cell.to_string()))?;

    let mut rows = Vec::new();
    for (index, cells) in sheet_rows.enumerate() {
        if cells.iter().all(|cell| cell.to_string().trim().is_empty()) {
            continue;
        }
        rows.push(columns.build_row(index + 2, |i| {
            cells.get(i).map(|cell| cell.to_string()).unwrap_or_default()
        }));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_with_optional_phone() {
        let data = b"Name,Email,Phone\nAda Lovelace, ADA@Example.com ,+44 20 7946 0958\nAlan Turing,alan@example.com,\n";
        let rows = parse_roster(data, "roster.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 2);
        assert_eq!(rows[0].email, "ada@example.com");
        assert_eq!(rows[0].phone.as_deref(), Some("+44 20 7946 0958"));
        assert_eq!(rows[1].phone, None);
        assert!(rows.iter().all(|r| r.validate().is_ok()));
    }

    #[test]
    fn test_blank_lines_are_skipped_but_row_numbers_kept() {
        let data = b"name,email\nAda,ada@example.com\n,\nAlan,alan@example.com\n";
        let rows = parse_roster(data, "students.CSV").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].row, 4);
    }

    #[test]
    fn test_missing_email_column() {
        let err = parse_roster(b"name,phone\nAda,123456\n", "roster.csv").unwrap_err();
        assert_eq!(err.code(), "P015");
        assert!(err.message().contains("email"));
    }

    #[test]
    fn test_header_only_file_is_rejected() {
        assert!(parse_roster(b"name,email\n", "roster.csv").is_err());
    }

    #[test]
    fn test_row_validation() {
        let row = RosterRow {
            row: 2,
            name: String::new(),
            email: "ada@example.com".to_string(),
            phone: None,
        };
        assert_eq!(row.validate(), Err("Name is required."));

        let row = RosterRow {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            ..row
        };
        assert!(row.validate().is_err());
    }

    #[test]
    fn test_invalid_xlsx_is_an_import_error() {
        let err = parse_roster(b"not a zip", "roster.xlsx").unwrap_err();
        assert_eq!(err.code(), "P015");
    }
}
