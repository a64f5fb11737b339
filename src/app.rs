//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment settings
//! - sets up logging
//! - runs estimations or heatmap pivots
//! - prints reports/plots
//! - writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use crate::cli::{Command, DataDirArgs, GrowthArgs, HeatmapArgs, OutputArgs, ViewArgs};
use crate::domain::{AnalysisRequest, EstimateConfig};
use crate::error::AppError;
use crate::growth::Estimate;
use crate::io::CsvSource;

pub mod request;
pub mod settings;

use request::ViewOutcome;
use settings::{LogTarget, Settings};

/// SVG size for `--svg` exports.
pub const SVG_SIZE: (u32, u32) = (1000, 600);

/// Entry point for the `trends` binary.
pub fn run() -> Result<(), AppError> {
    // `trends` and `trends --data-dir D` behave like `trends dashboard ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let settings = Settings::from_env();

    let target = match cli.command {
        Command::Dashboard(_) => LogTarget::FileOnly,
        _ => LogTarget::Stderr,
    };
    settings::init_tracing(&settings, target)?;

    match cli.command {
        Command::Growth(args) => handle_growth(args),
        Command::Heatmap(args) => handle_heatmap(args),
        Command::View(args) => handle_view(args, &settings),
        Command::Catalog(args) => handle_catalog(args, &settings),
        Command::Dashboard(args) => crate::tui::run(settings.data_dir_or(args.data_dir)),
    }
}

fn handle_growth(args: GrowthArgs) -> Result<(), AppError> {
    let label = args.label();
    let config = args.estimate.config();
    let estimate = crate::growth::estimate(&CsvSource::new(&args.file), &label, &config)?;
    print_estimate(&estimate, &args.output)
}

fn handle_heatmap(args: HeatmapArgs) -> Result<(), AppError> {
    let heatmap = crate::io::load_heatmap(&args.file)?;
    print!("{}", crate::report::format_heatmap(&heatmap, &args.label));
    Ok(())
}

fn handle_view(args: ViewArgs, settings: &Settings) -> Result<(), AppError> {
    let request = AnalysisRequest::new(
        &args.sector,
        &args.sub_sector,
        &args.category,
        args.analysis,
        args.state.as_deref(),
    )
    .map_err(|e| AppError::new(2, e.to_string()))?;
    let data_dir = settings.data_dir_or(args.data.data_dir);
    let config: EstimateConfig = args.estimate.config();

    match request::run_request(&data_dir, &request, &config)? {
        ViewOutcome::Growth(estimate) => print_estimate(&estimate, &args.output),
        ViewOutcome::Heatmap { heatmap, title } => {
            print!("{}", crate::report::format_heatmap(&heatmap, &title));
            Ok(())
        }
    }
}

fn handle_catalog(args: DataDirArgs, settings: &Settings) -> Result<(), AppError> {
    let data_dir = settings.data_dir_or(args.data_dir);
    println!("Data directory: {}", data_dir.display());
    for entry in request::scan_catalog(&data_dir) {
        let heatmaps: Vec<&str> = entry
            .heatmaps
            .iter()
            .map(|state| state.unwrap_or("state-level"))
            .collect();
        println!(
            "{:<15} {:<10} {:<10} growth: {:<3} heatmaps: {}",
            entry.sector,
            entry.sub_sector,
            entry.category,
            if entry.growth { "yes" } else { "no" },
            if heatmaps.is_empty() { "-".to_string() } else { heatmaps.join(", ") },
        );
    }
    Ok(())
}

fn print_estimate(estimate: &Estimate, output: &OutputArgs) -> Result<(), AppError> {
    println!("{}", crate::report::format_report(&estimate.report));
    println!("{}", crate::report::format_filter_stats(&estimate.filter));

    if !output.no_plot {
        println!();
        print!("{}", crate::plot::render_bar_chart(&estimate.chart, output.width));
    }

    // Optional exports.
    if let Some(path) = &output.export {
        crate::io::write_report_csv(path, &estimate.report)?;
        log_written("csv", path);
    }
    if let Some(path) = &output.export_json {
        crate::io::write_report_json(path, &estimate.report)?;
        log_written("json", path);
    }
    if let Some(path) = &output.svg {
        crate::plot::write_svg(path, &estimate.chart, SVG_SIZE)?;
        log_written("svg", path);
    }

    Ok(())
}

fn log_written(kind: &str, path: &Path) {
    info!(kind, path = %path.display(), "wrote export");
}

/// Default export file name for a label, e.g. `Soyabean` -> `soyabean_growth.json`.
pub fn default_export_name(label: &str, extension: &str) -> PathBuf {
    let stem: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    PathBuf::from(format!("{stem}_growth.{extension}"))
}

/// Rewrite argv so `trends` defaults to `trends dashboard`.
///
/// Rules:
/// - `trends`                     -> `trends dashboard`
/// - `trends --data-dir D ...`    -> `trends dashboard --data-dir D ...`
/// - `trends --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("dashboard".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "growth" | "heatmap" | "view" | "catalog" | "dashboard"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "dashboard flags".
    if arg1.starts_with('-') {
        argv.insert(1, "dashboard".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_dashboard() {
        assert_eq!(rewrite_args(argv(&["trends"])), argv(&["trends", "dashboard"]));
    }

    #[test]
    fn leading_flags_go_to_dashboard() {
        assert_eq!(
            rewrite_args(argv(&["trends", "--data-dir", "x"])),
            argv(&["trends", "dashboard", "--data-dir", "x"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["trends", "growth", "-f", "a.csv"]),
            argv(&["trends", "--help"]),
            argv(&["trends", "catalog"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn export_names_are_slugged() {
        assert_eq!(default_export_name("Soyabean", "json"), PathBuf::from("soyabean_growth.json"));
        assert_eq!(default_export_name("Inland Fish", "svg"), PathBuf::from("inland_fish_growth.svg"));
    }
}
