//! All-Star Proximity Main Application
//! Window showing every division chart side by side under a shared title.

use crate::analysis::Report;
use crate::charts::ChartPlotter;
use egui::RichText;

/// Chart height within each column
const CHART_HEIGHT: f32 = 520.0;

/// Main application window.
pub struct AllStarApp {
    report: Report,
    colors: Vec<[u8; 3]>,
}

impl AllStarApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, report: Report, colors: Vec<[u8; 3]>) -> Self {
        Self { report, colors }
    }
}

impl eframe::App for AllStarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(6.0);
                ui.label(RichText::new(&self.report.title).size(20.0).strong());
                ui.add_space(6.0);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let divisions = &self.report.divisions;
            if divisions.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
                return;
            }

            let axis_labels = (
                self.report.x_axis_label.as_str(),
                self.report.y_axis_label.as_str(),
            );
            ui.columns(divisions.len(), |columns| {
                for (column, division) in columns.iter_mut().zip(divisions) {
                    ChartPlotter::draw_division_chart(
                        column,
                        division,
                        &self.report.candidates,
                        &self.colors,
                        axis_labels,
                        CHART_HEIGHT,
                    );
                }
            });
        });
    }
}
