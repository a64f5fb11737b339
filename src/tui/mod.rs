//! Ratatui-based dashboard.
//!
//! A selection panel picks sector, sub-sector, category, analysis, and state.
//! Every change rebuilds the `AnalysisRequest` and reruns it; the result is a
//! Plotters bar chart (growth) or a colored district grid (heatmap). Failures
//! land in the status line and the dashboard keeps running.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};
use tracing::warn;

use crate::app::request::{ViewOutcome, run_request};
use crate::app::{SVG_SIZE, default_export_name};
use crate::domain::{AnalysisRequest, AnalysisType, CATALOG, EstimateConfig, HEATMAP_STATES, Heatmap, format_pct};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::GrowthChartWidget;

const FIELD_COUNT: usize = 5;

/// Start the dashboard over `data_dir`.
pub fn run(data_dir: PathBuf) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(data_dir);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Indices into the catalog plus the chosen analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Selection {
    sector: usize,
    sub_sector: usize,
    category: usize,
    analysis: AnalysisType,
    /// 0 is "None"; `n` is `HEATMAP_STATES[n - 1]`.
    state: usize,
}

impl Selection {
    fn request(&self) -> AnalysisRequest {
        let sector = &CATALOG[self.sector];
        let sub = &sector.sub_sectors[self.sub_sector];
        AnalysisRequest {
            sector: sector.name,
            sub_sector: sub.name,
            category: sub.categories[self.category],
            analysis: self.analysis,
            state: self.state.checked_sub(1).map(|i| HEATMAP_STATES[i]),
        }
    }

    /// Move `field` by `delta`, resetting the fields below it in the catalog tree.
    fn adjust(&mut self, field: usize, delta: i32) {
        match field {
            0 => {
                self.sector = step(self.sector, CATALOG.len(), delta);
                self.sub_sector = 0;
                self.category = 0;
            }
            1 => {
                let len = CATALOG[self.sector].sub_sectors.len();
                self.sub_sector = step(self.sub_sector, len, delta);
                self.category = 0;
            }
            2 => {
                let len = CATALOG[self.sector].sub_sectors[self.sub_sector].categories.len();
                self.category = step(self.category, len, delta);
            }
            3 => {
                let i = AnalysisType::ALL.iter().position(|a| *a == self.analysis).unwrap_or(0);
                self.analysis = AnalysisType::ALL[step(i, AnalysisType::ALL.len(), delta)];
            }
            4 => self.state = step(self.state, HEATMAP_STATES.len() + 1, delta),
            _ => {}
        }
    }
}

fn step(idx: usize, len: usize, delta: i32) -> usize {
    if len == 0 {
        return 0;
    }
    (idx as i64 + delta as i64).rem_euclid(len as i64) as usize
}

struct App {
    data_dir: PathBuf,
    selection: Selection,
    selected_field: usize,
    status: String,
    outcome: Option<ViewOutcome>,
}

impl App {
    fn new(data_dir: PathBuf) -> Self {
        let mut app = Self {
            data_dir,
            selection: Selection::default(),
            selected_field: 0,
            status: String::new(),
            outcome: None,
        };
        app.refresh();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the dashboard should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.selected_field = self.selected_field.saturating_sub(1),
            KeyCode::Down => self.selected_field = (self.selected_field + 1).min(FIELD_COUNT - 1),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Char('s') => self.save_svg(),
            KeyCode::Char('e') => self.export_json(),
            _ => {}
        }
        false
    }

    fn adjust(&mut self, delta: i32) {
        self.selection.adjust(self.selected_field, delta);
        self.refresh();
    }

    /// Rerun the current request; failures become the status line.
    fn refresh(&mut self) {
        let request = self.selection.request();
        match run_request(&self.data_dir, &request, &EstimateConfig::default()) {
            Ok(outcome) => {
                self.status = match &outcome {
                    ViewOutcome::Growth(est) => match est.report.skipped.len() {
                        0 => format!("{}: {} buckets", request.category, est.report.buckets.len()),
                        n => format!(
                            "{}: {} buckets, {n} skipped (fewer than 2 points)",
                            request.category,
                            est.report.buckets.len()
                        ),
                    },
                    ViewOutcome::Heatmap { heatmap, .. } => format!(
                        "{}: {} districts x {} years",
                        request.category,
                        heatmap.districts.len(),
                        heatmap.years.len()
                    ),
                };
                self.outcome = Some(outcome);
            }
            Err(err) => {
                warn!(?request, error = %err, "request failed");
                self.status = err.message().to_string();
                self.outcome = None;
            }
        }
    }

    fn save_svg(&mut self) {
        let Some(ViewOutcome::Growth(est)) = &self.outcome else {
            self.status = "Nothing to save: select a growth view with data.".to_string();
            return;
        };
        let path = default_export_name(&est.report.label, "svg");
        self.status = match crate::plot::write_svg(&path, &est.chart, SVG_SIZE) {
            Ok(()) => format!("Wrote {}", path.display()),
            Err(err) => format!("SVG export failed: {err}"),
        };
    }

    fn export_json(&mut self) {
        let Some(ViewOutcome::Growth(est)) = &self.outcome else {
            self.status = "Nothing to export: select a growth view with data.".to_string();
            return;
        };
        let path = default_export_name(&est.report.label, "json");
        self.status = match crate::io::write_report_json(&path, &est.report) {
            Ok(()) => format!("Wrote {}", path.display()),
            Err(err) => format!("JSON export failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("trends", Style::default().fg(Color::Cyan)),
            Span::raw(" | decade-wise trend growth rates"),
        ]));

        let summary = match &self.outcome {
            Some(ViewOutcome::Growth(est)) => format!(
                "years: {}-{} | overall: {} | data: {}",
                est.report.first_year,
                est.report.last_year,
                format_pct(est.report.overall_rate_pct),
                self.data_dir.display()
            ),
            _ => format!("data: {}", self.data_dir.display()),
        };
        lines.push(Line::from(Span::styled(summary, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(area);

        self.draw_settings(frame, chunks[0]);
        self.draw_view(frame, chunks[1]);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let request = self.selection.request();
        let items = vec![
            ListItem::new(format!("Sector: {}", request.sector)),
            ListItem::new(format!("Sub-sector: {}", request.sub_sector)),
            ListItem::new(format!("Category: {}", request.category)),
            ListItem::new(format!("Analysis: {}", request.analysis.display_name())),
            ListItem::new(format!("State: {}", request.state.unwrap_or("None"))),
        ];

        let list = List::new(items)
            .block(Block::default().title("Selection").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_view(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        match &self.outcome {
            Some(ViewOutcome::Growth(est)) => {
                let block = Block::default().title(est.chart.title.as_str()).borders(Borders::ALL);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                frame.render_widget(Clear, inner);
                frame.render_widget(GrowthChartWidget { chart: &est.chart }, inner);
            }
            Some(ViewOutcome::Heatmap { heatmap, title }) => {
                draw_heatmap(frame, area, heatmap, title);
            }
            None => {
                let msg = Paragraph::new(self.status.as_str())
                    .style(Style::default().fg(Color::Yellow))
                    .block(Block::default().title("View").borders(Borders::ALL));
                frame.render_widget(msg, area);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ change  s save svg  e export json  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.status.as_str(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_heatmap(frame: &mut ratatui::Frame<'_>, area: Rect, heatmap: &Heatmap, title: &str) {
    let range = heatmap.value_range();
    let name_w = heatmap
        .districts
        .iter()
        .map(|d| d.chars().count())
        .max()
        .unwrap_or(0)
        .max("District".len()) as u16;

    let header = Row::new(
        std::iter::once(Cell::from("District"))
            .chain(heatmap.years.iter().map(|y| Cell::from(y.to_string()))),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = heatmap.districts.iter().zip(&heatmap.cells).map(|(district, row)| {
        let cells = row.iter().map(move |cell| match cell {
            Some(v) => Cell::from(format!("{v:.1}")).style(Style::default().fg(Color::Black).bg(heat_color(*v, range))),
            None => Cell::from("-"),
        });
        Row::new(std::iter::once(Cell::from(district.clone())).chain(cells))
    });

    let widths = std::iter::once(Constraint::Length(name_w))
        .chain(heatmap.years.iter().map(|_| Constraint::Length(7)))
        .collect::<Vec<_>>();

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Blue (low) to red (high) over the grid's value range.
fn heat_color(value: f64, range: Option<(f64, f64)>) -> Color {
    let t = match range {
        Some((lo, hi)) if hi > lo => ((value - lo) / (hi - lo)).clamp(0.0, 1.0),
        _ => 0.5,
    };
    let r = (80.0 + 175.0 * t).round() as u8;
    let b = (80.0 + 175.0 * (1.0 - t)).round() as u8;
    Color::Rgb(r, 120, b)
}
