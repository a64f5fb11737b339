//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - series at each stage (`RawSeries`, `CompleteSeries`) and `DecadeBucket`s
//! - estimation outputs (`GrowthRateReport`, `GrowthChart`)
//! - dashboard selections (`AnalysisRequest`) and the crop catalog

pub mod catalog;
pub mod chart;
pub mod types;

pub use catalog::*;
pub use chart::*;
pub use types::*;
