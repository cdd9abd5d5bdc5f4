//! Month loading: sheet lookup, validation, and month-integrity checking.

use replog_core::error::Result;
use replog_core::models::MonthRecords;
use replog_core::time_utils;
use tracing::debug;

use crate::validate::validate;
use crate::workbook::Workbook;

/// Load and validate the records for one month.
///
/// Resolves the sheet identifier for `(year, month)` (e.g. `"2024-November"`),
/// fetches the raw table from `workbook`, validates it, then rejects the set
/// if any record's `date` or `time` falls outside the requested month. The
/// month check guards against stale or misfiled sheets silently entering
/// downstream aggregation.
pub fn load_month(workbook: &Workbook, year: i32, month: u32) -> Result<MonthRecords> {
    let sheet_id = time_utils::sheet_name(year, month);
    let table = workbook.raw_table(&sheet_id)?;
    let records = validate(&table)?;
    debug!(
        "Loaded {} records from sheet \"{}\"",
        records.len(),
        sheet_id
    );
    MonthRecords::new(year, month, records)
}
