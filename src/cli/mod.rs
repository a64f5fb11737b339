//! Command-line parsing for the crop growth-rate dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! estimation and rendering. `app` turns parsed arguments into calls.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{AnalysisType, EstimateConfig, GapPolicy, YearWindow};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "trends", version, about = "Decade-wise trend growth rates for crop and allied-sector series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate decade-wise growth rates from a `Year`/`Total` CSV.
    Growth(GrowthArgs),
    /// Print a district x year grid from a `District`/`Year`/`Value` CSV.
    Heatmap(HeatmapArgs),
    /// Run one catalog selection against the data directory.
    View(ViewArgs),
    /// List catalog entries and which data files exist.
    Catalog(DataDirArgs),
    /// Launch the interactive dashboard.
    ///
    /// Uses the same request path as `trends view`, rendered with Ratatui.
    Dashboard(DataDirArgs),
}

/// Options shared by every command that reads the data directory.
#[derive(Debug, Args, Clone, Default)]
pub struct DataDirArgs {
    /// Data directory (default: `$CROP_DATA_DIR`, then `data`).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Estimation knobs shared by `growth` and `view`.
#[derive(Debug, Args, Clone, Default)]
pub struct EstimateArgs {
    /// Ignore years before this one.
    #[arg(long, value_name = "YEAR", value_parser = clap::value_parser!(i32).range(0..=9999))]
    pub from: Option<i32>,

    /// Ignore years after this one.
    #[arg(long, value_name = "YEAR", value_parser = clap::value_parser!(i32).range(0..=9999))]
    pub to: Option<i32>,

    /// How to fill window years beyond the first or last observation.
    #[arg(long, value_enum, default_value_t = GapPolicy::Reject)]
    pub gap_policy: GapPolicy,
}

impl EstimateArgs {
    pub fn config(&self) -> EstimateConfig {
        EstimateConfig {
            window: YearWindow {
                from: self.from,
                to: self.to,
            },
            gap_policy: self.gap_policy,
        }
    }
}

/// Output options for a growth report.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Disable the terminal bar chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Export bucket rates to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the report to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Write the chart as SVG.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct GrowthArgs {
    /// Input CSV with `Year` and `Total` columns.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: PathBuf,

    /// Label used in titles (default: the file stem).
    #[arg(long)]
    pub label: Option<String>,

    #[command(flatten)]
    pub estimate: EstimateArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl GrowthArgs {
    pub fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            self.file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "series".to_string())
        })
    }
}

#[derive(Debug, Args, Clone)]
pub struct HeatmapArgs {
    /// Input CSV with `District`, `Year`, and `Value` columns.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: PathBuf,

    /// Title printed above the grid.
    #[arg(long, default_value = "Heatmap")]
    pub label: String,
}

#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    #[arg(long)]
    pub sector: String,

    #[arg(long)]
    pub sub_sector: String,

    #[arg(long)]
    pub category: String,

    #[arg(long, value_enum, default_value_t = AnalysisType::Growth)]
    pub analysis: AnalysisType,

    /// State for a district heatmap (`None` selects the state-level file).
    #[arg(long)]
    pub state: Option<String>,

    #[command(flatten)]
    pub data: DataDirArgs,

    #[command(flatten)]
    pub estimate: EstimateArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}
