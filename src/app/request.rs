//! Dashboard requests: catalog selection -> data file -> analysis.
//!
//! Shared by `trends view`, `trends catalog`, and the TUI so they resolve files
//! and report missing data the same way.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{AnalysisRequest, AnalysisType, CATALOG, EstimateConfig, HEATMAP_STATES, Heatmap};
use crate::error::AppError;
use crate::growth::{Estimate, estimate};
use crate::io::{CsvSource, load_heatmap};

pub const DATA_NOT_AVAILABLE: &str = "Data not available for that specific category";

/// What a request produced.
#[derive(Debug, Clone)]
pub enum ViewOutcome {
    Growth(Box<Estimate>),
    Heatmap { heatmap: Heatmap, title: String },
}

fn category_dir(data_dir: &Path, sector: &str, sub_sector: &str, category: &str) -> PathBuf {
    data_dir.join(sector).join(sub_sector).join(category)
}

fn heatmap_file_name(state: Option<&str>) -> String {
    match state {
        None => "heatmap.csv".to_string(),
        Some(state) => format!("heatmap_{}.csv", state.replace(' ', "_")),
    }
}

/// File backing `request` under `data_dir`.
pub fn data_path(data_dir: &Path, request: &AnalysisRequest) -> PathBuf {
    let dir = category_dir(data_dir, request.sector, request.sub_sector, request.category);
    match request.analysis {
        AnalysisType::Growth => dir.join("growth.csv"),
        AnalysisType::Heatmap => dir.join(heatmap_file_name(request.state)),
    }
}

pub fn heatmap_title(request: &AnalysisRequest) -> String {
    match request.state {
        Some(state) => format!("{} Heatmap - {state}", request.category),
        None => format!("{} Heatmap", request.category),
    }
}

/// Resolve `request` to its file and run the analysis it names.
pub fn run_request(
    data_dir: &Path,
    request: &AnalysisRequest,
    config: &EstimateConfig,
) -> Result<ViewOutcome, AppError> {
    let path = data_path(data_dir, request);
    debug!(path = %path.display(), ?request, "resolved request");
    if !path.is_file() {
        warn!(path = %path.display(), "no data file for request");
        return Err(AppError::new(2, DATA_NOT_AVAILABLE));
    }

    match request.analysis {
        AnalysisType::Growth => {
            let estimate = estimate(&CsvSource::new(&path), request.category, config)?;
            Ok(ViewOutcome::Growth(Box::new(estimate)))
        }
        AnalysisType::Heatmap => Ok(ViewOutcome::Heatmap {
            heatmap: load_heatmap(&path)?,
            title: heatmap_title(request),
        }),
    }
}

/// Data files present for one catalog category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub sector: &'static str,
    pub sub_sector: &'static str,
    pub category: &'static str,
    pub growth: bool,
    /// `None` is the state-level heatmap; `Some` a district heatmap.
    pub heatmaps: Vec<Option<&'static str>>,
}

/// Walk the whole catalog and check which files exist under `data_dir`.
pub fn scan_catalog(data_dir: &Path) -> Vec<Availability> {
    let mut out = Vec::new();
    for sector in CATALOG {
        for sub in sector.sub_sectors {
            for &category in sub.categories {
                let dir = category_dir(data_dir, sector.name, sub.name, category);
                let heatmaps = std::iter::once(None)
                    .chain(HEATMAP_STATES.iter().copied().map(Some))
                    .filter(|state| dir.join(heatmap_file_name(*state)).is_file())
                    .collect();
                out.push(Availability {
                    sector: sector.name,
                    sub_sector: sub.name,
                    category,
                    growth: dir.join("growth.csv").is_file(),
                    heatmaps,
                });
            }
        }
    }
    out
}
