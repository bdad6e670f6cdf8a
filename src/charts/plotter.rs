//! Chart Plotter Module
//! Interactive grouped bar charts using egui_plot.

use crate::analysis::DivisionReport;
use crate::charts::layout::{self, Y_MAX, Y_MIN, Y_TICK_STEP};
use crate::config::CandidateConfig;
use egui::{Color32, RichText};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Legend, Plot, PlotBounds};

/// Draws one division per plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color32(rgb: [u8; 3]) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Draw a division's grouped bar chart. X-axis: reference counties,
    /// Y-axis: mean vote share, fixed to [0, 100]. Returns the plotted
    /// bounds, or `None` when the division has no rows.
    pub fn draw_division_chart(
        ui: &mut egui::Ui,
        division: &DivisionReport,
        candidates: &[CandidateConfig],
        colors: &[[u8; 3]],
        axis_labels: (&str, &str),
        height: f32,
    ) -> Option<PlotBounds> {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&division.title).size(16.0).strong());
        });

        let table = &division.table;
        if table.rows.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return None;
        }

        let bars = layout::grouped_bars(table);
        let labels: Vec<String> = table
            .rows
            .iter()
            .map(|row| row.reference_county.clone())
            .collect();
        let (x_label, y_label) = axis_labels;

        let response = Plot::new(format!("division_{}", division.label))
            .height(height)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_x(-0.5)
            .include_x(labels.len() as f64 - 0.5)
            .include_y(Y_MIN)
            .include_y(Y_MAX)
            .set_margin_fraction(egui::Vec2::ZERO)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
            .y_grid_spacer(uniform_grid_spacer(|_| {
                [Y_TICK_STEP, Y_TICK_STEP * 5.0, Y_TICK_STEP * 10.0]
            }))
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (column, candidate) in candidates.iter().enumerate() {
                    let color = colors
                        .get(column)
                        .copied()
                        .map(Self::color32)
                        .unwrap_or(Color32::GRAY);

                    let series: Vec<Bar> = bars
                        .iter()
                        .filter(|bar| bar.column == column)
                        .map(|bar| {
                            let county = &table.rows[bar.row].reference_county;
                            Bar::new(bar.center, bar.height)
                                .width(bar.width)
                                .fill(color)
                                .name(format!(
                                    "{county}\n{}: {:.1} (n={})",
                                    candidate.source_name, bar.height, bar.count
                                ))
                        })
                        .collect();

                    plot_ui.bar_chart(
                        BarChart::new(series)
                            .color(color)
                            .name(&candidate.source_name),
                    );
                }
            });

        Some(*response.transform.bounds())
    }
}
