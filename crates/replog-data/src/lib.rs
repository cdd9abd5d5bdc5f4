//! Data ingestion and derivation layer for replog.
//!
//! Responsible for discovering and reading workbook CSV sheets, validating
//! raw tables into normalized records, loading month-scoped record sets, and
//! deriving summary statistics and stratified per-set series.

pub mod aggregator;
pub mod loader;
pub mod stratify;
pub mod validate;
pub mod workbook;
