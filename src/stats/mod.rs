//! Stats module - per-reference vote aggregation

mod aggregator;

pub use aggregator::{DivisionTable, GroupStats, PivotRow, StatsCalculator};
