//! Plotters-powered growth-rate chart widget for Ratatui.
//!
//! Drawing is shared with the SVG export (`plot::draw_growth_chart`); this
//! widget only picks the terminal palette and hands Plotters the Ratatui buffer
//! via `plotters-ratatui-backend`.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::GrowthChart;
use crate::plot::{ChartPalette, draw_growth_chart};

/// Render-only view of a [`GrowthChart`].
pub struct GrowthChartWidget<'a> {
    pub chart: &'a GrowthChart,
}

impl<'a> Widget for GrowthChartWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out axes in tiny areas; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }
        if self.chart.bars.is_empty() {
            buf.set_string(area.x, area.y, "No buckets to chart.", Style::default().fg(Color::Yellow));
            return;
        }

        let chart = self.chart;
        let palette = ChartPalette::terminal();
        let widget = widget_fn(move |root| {
            draw_growth_chart(&root, chart, &palette)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
