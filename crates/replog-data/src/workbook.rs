//! Workbook discovery and raw-table loading.
//!
//! A workbook is a directory tree of CSV sheets, one sheet per month, named
//! by the `"{year}-{MonthFullName}"` convention (e.g. `2024-November.csv`).
//! This module only gets cell text out of the files; typing and validation
//! happen in [`crate::validate`].

use std::path::{Path, PathBuf};

use replog_core::error::{RepLogError, Result};
use tracing::{debug, warn};

// ── RawTable ──────────────────────────────────────────────────────────────────

/// An untyped table straight out of a sheet: named columns and rows of
/// optional string cells. Row order is the input order, which forward-fill
/// correctness depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Build a table from a header and rows, dropping entirely-empty rows
    /// and unnamed entirely-empty columns (spreadsheet exports often carry
    /// both).
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<Option<String>>>) -> Self {
        // Pad ragged rows to the header width.
        for row in &mut rows {
            row.resize(columns.len(), None);
        }

        rows.retain(|row| row.iter().any(|cell| cell.is_some()));

        // Indices of columns to keep: named, or carrying at least one value.
        let keep: Vec<usize> = (0..columns.len())
            .filter(|&i| {
                !columns[i].is_empty() || rows.iter().any(|row| row[i].is_some())
            })
            .collect();

        if keep.len() != columns.len() {
            let columns = keep.iter().map(|&i| columns[i].clone()).collect();
            let rows = rows
                .into_iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect();
            return Self { columns, rows };
        }

        Self { columns, rows }
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Data rows in input order.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }
}

// ── Workbook ──────────────────────────────────────────────────────────────────

/// Handle to a workbook directory of CSV sheets.
#[derive(Debug)]
pub struct Workbook {
    dir: PathBuf,
}

impl Workbook {
    /// Open a workbook rooted at `dir`.
    ///
    /// Fails with [`RepLogError::WorkbookNotFound`] when the directory does
    /// not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(RepLogError::WorkbookNotFound(dir));
        }
        Ok(Self { dir })
    }

    /// Root directory of this workbook.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Find all `.csv` sheet files recursively under the workbook root,
    /// sorted by path.
    pub fn sheet_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.file_type().is_file()
                    && entry
                        .path()
                        .extension()
                        .map(|ext| ext == "csv")
                        .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        files
    }

    /// Load the raw table for `sheet_id`.
    ///
    /// The identifier is matched against file stems. Zero matches fail with
    /// [`RepLogError::SheetNotFound`]; more than one (the same stem in two
    /// subdirectories) fails with [`RepLogError::MultipleTables`] since the
    /// store can no longer say which table is meant.
    pub fn raw_table(&self, sheet_id: &str) -> Result<RawTable> {
        let matches: Vec<PathBuf> = self
            .sheet_files()
            .into_iter()
            .filter(|path| {
                path.file_stem()
                    .map(|stem| stem == sheet_id)
                    .unwrap_or(false)
            })
            .collect();

        let path = match matches.as_slice() {
            [] => return Err(RepLogError::SheetNotFound(sheet_id.to_string())),
            [single] => single,
            _ => {
                warn!(
                    "Sheet \"{}\" matches {} files under {}",
                    sheet_id,
                    matches.len(),
                    self.dir.display()
                );
                return Err(RepLogError::MultipleTables(sheet_id.to_string()));
            }
        };

        debug!("Loading sheet \"{}\" from {}", sheet_id, path.display());
        read_csv_table(path)
    }
}

// ── CSV parsing ───────────────────────────────────────────────────────────────

/// Parse a CSV file into a [`RawTable`]. The first row is the header; empty
/// cells become absent values.
fn read_csv_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| RepLogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        // A sheet with no header row has no columns at all; the validator
        // reports the full missing set.
        None => return Ok(RawTable::new(Vec::new(), Vec::new())),
    };

    let columns: Vec<String> = header.iter().map(|c| c.trim().to_string()).collect();

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for record in records {
        let record = record?;
        let row: Vec<Option<String>> = record
            .iter()
            .map(|cell| {
                let trimmed = cell.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(RawTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_sheet(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).expect("write sheet");
    }

    const SHEET: &str = "\
date,time,location,exercise,count
2024-11-01,2024-11-01 08:00:00,home,pushups,10
2024-11-01,2024-11-01 08:05:00,home,pushups,8
";

    #[test]
    fn test_open_missing_dir_fails() {
        let err = Workbook::open("/no/such/workbook").unwrap_err();
        assert!(matches!(err, RepLogError::WorkbookNotFound(_)));
    }

    #[test]
    fn test_sheet_files_recursive_sorted() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::create_dir(tmp.path().join("2024")).unwrap();
        write_sheet(tmp.path(), "2024-November.csv", SHEET);
        write_sheet(&tmp.path().join("2024"), "2024-October.csv", SHEET);
        write_sheet(tmp.path(), "notes.txt", "not a sheet");

        let workbook = Workbook::open(tmp.path()).unwrap();
        let files = workbook.sheet_files();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("2024/2024-October.csv"));
        assert!(files[1].ends_with("2024-November.csv"));
    }

    #[test]
    fn test_raw_table_loads_cells() {
        let tmp = TempDir::new().expect("tempdir");
        write_sheet(tmp.path(), "2024-November.csv", SHEET);

        let workbook = Workbook::open(tmp.path()).unwrap();
        let table = workbook.raw_table("2024-November").unwrap();
        assert_eq!(
            table.columns(),
            ["date", "time", "location", "exercise", "count"]
        );
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0][4].as_deref(), Some("10"));
    }

    #[test]
    fn test_raw_table_empty_cells_absent() {
        let tmp = TempDir::new().expect("tempdir");
        write_sheet(
            tmp.path(),
            "2024-November.csv",
            "date,time,location,exercise,count\n,2024-11-01 08:05:00,,,8\n",
        );

        let workbook = Workbook::open(tmp.path()).unwrap();
        let table = workbook.raw_table("2024-November").unwrap();
        assert_eq!(table.rows()[0][0], None);
        assert_eq!(table.rows()[0][4].as_deref(), Some("8"));
    }

    #[test]
    fn test_sheet_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        write_sheet(tmp.path(), "2024-November.csv", SHEET);

        let workbook = Workbook::open(tmp.path()).unwrap();
        let err = workbook.raw_table("2024-December").unwrap_err();
        assert!(matches!(err, RepLogError::SheetNotFound(ref s) if s == "2024-December"));
    }

    #[test]
    fn test_duplicate_stems_fail() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::create_dir(tmp.path().join("old")).unwrap();
        write_sheet(tmp.path(), "2024-November.csv", SHEET);
        write_sheet(&tmp.path().join("old"), "2024-November.csv", SHEET);

        let workbook = Workbook::open(tmp.path()).unwrap();
        let err = workbook.raw_table("2024-November").unwrap_err();
        assert!(matches!(err, RepLogError::MultipleTables(_)));
    }

    #[test]
    fn test_empty_rows_dropped() {
        let table = RawTable::new(
            vec!["date".into(), "count".into()],
            vec![
                vec![Some("2024-11-01".into()), Some("10".into())],
                vec![None, None],
                vec![Some("2024-11-02".into()), Some("12".into())],
            ],
        );
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_unnamed_empty_column_dropped() {
        let table = RawTable::new(
            vec!["date".into(), "".into(), "count".into()],
            vec![vec![Some("2024-11-01".into()), None, Some("10".into())]],
        );
        assert_eq!(table.columns(), ["date", "count"]);
        assert_eq!(table.rows()[0].len(), 2);
    }

    #[test]
    fn test_named_empty_column_kept() {
        // A named but empty column survives parsing; the validator decides
        // whether it is extraneous or a fatal gap.
        let table = RawTable::new(
            vec!["date".into(), "notes".into()],
            vec![vec![Some("2024-11-01".into()), None]],
        );
        assert_eq!(table.columns(), ["date", "notes"]);
    }

    #[test]
    fn test_ragged_rows_padded() {
        let table = RawTable::new(
            vec!["date".into(), "count".into()],
            vec![vec![Some("2024-11-01".into())]],
        );
        assert_eq!(table.rows()[0], vec![Some("2024-11-01".to_string()), None]);
    }
}
