//! Terminal presentation layer for replog.
//!
//! Provides themes, chart data shaping (stacked per-set bars, cumulative
//! lines), and the display event loop built on top of [`ratatui`]. The data
//! layer hands figures over; nothing here reaches back into the pipeline.

pub mod app;
pub mod chart;
pub mod themes;
