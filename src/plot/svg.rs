//! Plotters rendering of a [`GrowthChart`].
//!
//! `draw_growth_chart` is generic over the Plotters backend so the same drawing
//! code serves the SVG export and the TUI (via `plotters-ratatui-backend`).
//! The x axis is segmented: one segment per bucket, labelled at its center.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::domain::{BAR_SERIES_LABEL, GrowthChart};
use crate::error::AppError;

/// Colors and layout knobs for one rendering target.
#[derive(Debug, Clone, Copy)]
pub struct ChartPalette {
    pub background: RGBColor,
    pub bar: RGBColor,
    pub reference: RGBColor,
    pub text: RGBColor,
    pub font_size: u32,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub caption: bool,
    pub legend: bool,
}

impl ChartPalette {
    /// White background, suitable for SVG files.
    pub fn light() -> Self {
        Self {
            background: WHITE,
            bar: RGBColor(31, 119, 180),
            reference: RGBColor(214, 39, 40),
            text: BLACK,
            font_size: 14,
            margin: 12,
            x_label_area: 50,
            y_label_area: 60,
            caption: true,
            legend: true,
        }
    }

    /// High-contrast colors and compact label areas for terminal cells.
    pub fn terminal() -> Self {
        Self {
            background: BLACK,
            bar: RGBColor(0, 255, 255),
            reference: RGBColor(255, 0, 0),
            text: WHITE,
            font_size: 10,
            margin: 1,
            x_label_area: 3,
            y_label_area: 7,
            caption: false,
            legend: false,
        }
    }
}

/// Draw bars, value annotations, the overall reference line, and axes onto `root`.
pub fn draw_growth_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &GrowthChart,
    palette: &ChartPalette,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = chart.bars.len().max(1) as i32;
    let (y0, y1) = chart.padded_range(0.1);
    let ticks = chart.x_ticks();
    let text_style = ("sans-serif", palette.font_size).into_font().color(&palette.text);

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(palette.margin)
        .set_label_area_size(LabelAreaPosition::Left, palette.y_label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, palette.x_label_area);
    if palette.caption {
        builder.caption(
            &chart.title,
            ("sans-serif", palette.font_size + 4).into_font().color(&palette.text),
        );
    }
    let mut cc = builder.build_cartesian_2d((0..n).into_segmented(), y0..y1)?;

    cc.configure_mesh()
        .disable_x_mesh()
        .x_labels(ticks.len().max(1))
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
                .ok()
                .and_then(|i| ticks.get(i))
                .map(|s| s.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format!("{v:.1}"))
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .label_style(text_style.clone())
        .axis_style(&palette.text)
        .bold_line_style(&palette.text.mix(0.3))
        .light_line_style(&palette.background)
        .draw()?;

    // 1) Bars, one per bucket.
    let bar_style = palette.bar.filled();
    cc.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        let i = i as i32;
        let mut rect = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.value)],
            bar_style,
        );
        rect.set_margin(0, 0, 4, 4);
        rect
    }))?
    .label(BAR_SERIES_LABEL)
    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], bar_style));

    // 2) Rate annotations above positive bars, below negative ones.
    let above = text_style.pos(Pos::new(HPos::Center, VPos::Bottom));
    let below = text_style.pos(Pos::new(HPos::Center, VPos::Top));
    cc.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        let style = if bar.value >= 0.0 { above.clone() } else { below.clone() };
        Text::new(
            bar.annotation.clone(),
            (SegmentValue::CenterOf(i as i32), bar.value),
            style,
        )
    }))?;

    // 3) Overall growth rate across the full width.
    let line_style = palette.reference.stroke_width(2);
    let overall = chart.reference.value;
    cc.draw_series(LineSeries::new(
        [(SegmentValue::Exact(0), overall), (SegmentValue::Last, overall)],
        line_style,
    ))?
    .label(chart.reference.label.as_str())
    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], line_style));

    if palette.legend {
        cc.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(text_style.clone())
            .background_style(&palette.background.mix(0.8))
            .border_style(&palette.text)
            .draw()?;
    }

    Ok(())
}

/// Render `chart` to an SVG document.
pub fn render_svg(chart: &GrowthChart, size: (u32, u32)) -> Result<String, AppError> {
    let palette = ChartPalette::light();
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&palette.background)
            .map_err(|e| AppError::new(4, format!("Failed to draw chart background: {e}")))?;
        draw_growth_chart(&root, chart, &palette)
            .map_err(|e| AppError::new(4, format!("Failed to draw chart: {e}")))?;
        root.present()
            .map_err(|e| AppError::new(4, format!("Failed to finish chart SVG: {e}")))?;
    }
    Ok(svg)
}

/// Render `chart` and write it to `path`.
pub fn write_svg(path: &Path, chart: &GrowthChart, size: (u32, u32)) -> Result<(), AppError> {
    let svg = render_svg(chart, size)?;
    std::fs::write(path, svg)
        .map_err(|e| AppError::new(2, format!("Failed to write chart SVG '{}': {e}", path.display())))
}
