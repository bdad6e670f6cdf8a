//! Static Chart Renderer
//! Writes the two-panel division figure to a PNG with plotters.
//!
//! Layout:
//! 1. Super-title centered across the figure
//! 2. One panel per division, side by side
//!    - Grouped bars per reference county, one color per candidate
//!    - Y-axis fixed to 0-100 with a tick every 10
//!    - Legend naming each candidate

use crate::analysis::{DivisionReport, Report};
use crate::charts::layout::{self, Y_MAX, Y_MIN};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Chart drawing failed: {0}")]
    Draw(String),
    #[error("Nothing to draw")]
    NoDivisions,
}

fn draw_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Draw(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Panel width in pixels; figure width scales with the division count.
    pub const PANEL_WIDTH: u32 = 700;
    pub const HEIGHT: u32 = 600;

    /// Render the complete figure to `path` (format from the extension).
    pub fn render_png(report: &Report, colors: &[[u8; 3]], path: &Path) -> Result<(), ReportError> {
        if report.divisions.is_empty() {
            return Err(ReportError::NoDivisions);
        }

        let width = Self::PANEL_WIDTH * report.divisions.len() as u32;
        let root = BitMapBackend::new(path, (width, Self::HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let root = root
            .titled(&report.title, ("sans-serif", 22))
            .map_err(draw_err)?;
        let panels = root.split_evenly((1, report.divisions.len()));

        for (panel, division) in panels.iter().zip(&report.divisions) {
            Self::draw_division(panel, report, division, colors)?;
        }

        root.present().map_err(draw_err)?;
        info!(path = %path.display(), "Wrote chart image");
        Ok(())
    }

    fn draw_division<DB: DrawingBackend>(
        area: &DrawingArea<DB, plotters::coord::Shift>,
        report: &Report,
        division: &DivisionReport,
        colors: &[[u8; 3]],
    ) -> Result<(), ReportError> {
        let table = &division.table;
        let slots = table.rows.len().max(1) as f64;

        let mut chart = ChartBuilder::on(area)
            .caption(&division.title, ("sans-serif", 18))
            .margin(15)
            .x_label_area_size(110)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5f64..slots - 0.5, Y_MIN..Y_MAX)
            .map_err(draw_err)?;

        let label_for = |x: &f64| {
            layout::row_label(table, *x)
                .map(str::to_string)
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(table.rows.len().max(1))
            .x_label_formatter(&label_for)
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_labels(layout::y_ticks().len())
            .y_label_formatter(&|y| format!("{:.0}", y))
            .x_desc(report.x_axis_label.as_str())
            .y_desc(report.y_axis_label.as_str())
            .draw()
            .map_err(draw_err)?;

        let bars = layout::grouped_bars(table);
        for (column, candidate) in report.candidates.iter().enumerate() {
            let [r, g, b] = colors.get(column).copied().unwrap_or([128, 128, 128]);
            let color = RGBColor(r, g, b);

            chart
                .draw_series(
                    bars.iter()
                        .filter(|bar| bar.column == column)
                        .map(|bar| {
                            Rectangle::new(
                                [(bar.left(), 0.0), (bar.right(), bar.height)],
                                color.filled(),
                            )
                        }),
                )
                .map_err(draw_err)?
                .label(candidate.source_name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;

        Ok(())
    }
}
