//! Domain layer for replog.
//!
//! Holds the validated record types, the error taxonomy, calendar helpers,
//! pace/statistics calculations, report formatting, and CLI settings shared
//! by the data and UI crates. Everything here is pure: no I/O beyond the
//! settings persistence helpers, and no wall-clock reads.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{RepLogError, Result};
