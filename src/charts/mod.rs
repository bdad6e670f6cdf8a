//! Charts module - grouped bar chart rendering

pub mod layout;
mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
