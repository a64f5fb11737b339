//! Input/output helpers.
//!
//! - tabular sources (`table`)
//! - CSV ingest (`ingest`)
//! - report exports to CSV/JSON (`export`)
//! - heatmap pivot files (`heatmap`)

pub mod export;
pub mod heatmap;
pub mod ingest;
pub mod table;

pub use export::*;
pub use heatmap::*;
pub use ingest::*;
pub use table::*;
