//! Reporting utilities: formatted terminal output for reports and heatmaps.

pub mod format;

pub use format::*;
