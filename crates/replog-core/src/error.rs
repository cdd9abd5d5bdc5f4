use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the replog pipeline.
#[derive(Error, Debug)]
pub enum RepLogError {
    /// The raw table is missing one or more required columns.
    #[error("Required column(s) missing: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A required-nonempty column contains an absent value.
    #[error("Missing values in \"{column}\" column")]
    IncompleteData { column: String },

    /// A cell could not be coerced to the column's type.
    #[error("Cannot parse \"{value}\" in \"{column}\" column (row {row})")]
    Parse {
        column: String,
        row: usize,
        value: String,
    },

    /// The workbook directory does not exist.
    #[error("Workbook directory not found: {0}")]
    WorkbookNotFound(PathBuf),

    /// No sheet file exists for the requested identifier.
    #[error("Sheet \"{0}\" not found in workbook")]
    SheetNotFound(String),

    /// The sheet identifier resolves to more than one table.
    #[error("Sheet \"{0}\" resolves to more than one table")]
    MultipleTables(String),

    /// A record's date or time falls outside the requested year/month.
    #[error("\"{column}\" column contains dates outside {year}-{month:02}")]
    MonthMismatch {
        column: String,
        year: i32,
        month: u32,
    },

    /// The exercise filter matched no records.
    #[error("Exercise \"{0}\" not found in \"exercise\" column")]
    ExerciseNotFound(String),

    /// A month range runs backwards (start after end).
    #[error("Invalid month range: {start_year}-{start_month:02} is after {end_year}-{end_month:02}")]
    InvalidMonthRange {
        start_year: i32,
        start_month: u32,
        end_year: i32,
        end_month: u32,
    },

    /// A sheet file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the replog crates.
pub type Result<T> = std::result::Result<T, RepLogError>;
