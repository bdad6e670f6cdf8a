//! Grouped bar geometry shared by the interactive and static charts.

use crate::stats::DivisionTable;

/// Fixed value axis: vote share in percent.
pub const Y_MIN: f64 = 0.0;
pub const Y_MAX: f64 = 100.0;
pub const Y_TICK_STEP: f64 = 10.0;

/// Share of each category slot covered by its bar group
pub const GROUP_WIDTH: f64 = 0.5;

/// One bar: category slot `row`, series `column`.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub row: usize,
    pub column: usize,
    pub center: f64,
    pub width: f64,
    pub height: f64,
    pub count: usize,
}

impl BarSpec {
    pub fn left(&self) -> f64 {
        self.center - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center + self.width / 2.0
    }
}

/// Bars for every filled cell, side by side within each row's slot.
/// Empty cells leave a gap.
pub fn grouped_bars(table: &DivisionTable) -> Vec<BarSpec> {
    let series = table.candidates.len().max(1);
    let width = GROUP_WIDTH / series as f64;
    let mid = (series as f64 - 1.0) / 2.0;

    table
        .rows
        .iter()
        .enumerate()
        .flat_map(|(row, pivot)| {
            pivot
                .cells
                .iter()
                .enumerate()
                .filter_map(move |(column, cell)| {
                    cell.map(|stats| BarSpec {
                        row,
                        column,
                        center: row as f64 + (column as f64 - mid) * width,
                        width,
                        height: stats.mean,
                        count: stats.count,
                    })
                })
        })
        .collect()
}

/// Value-axis ticks from `Y_MIN` to `Y_MAX` inclusive.
pub fn y_ticks() -> Vec<f64> {
    let steps = ((Y_MAX - Y_MIN) / Y_TICK_STEP).round() as usize;
    (0..=steps).map(|i| Y_MIN + i as f64 * Y_TICK_STEP).collect()
}

/// Category label for an axis position, if it falls on a row.
pub fn row_label(table: &DivisionTable, position: f64) -> Option<&str> {
    let nearest = position.round();
    if (position - nearest).abs() > 1e-6 || nearest < 0.0 {
        return None;
    }
    table
        .rows
        .get(nearest as usize)
        .map(|row| row.reference_county.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{GroupStats, PivotRow};

    fn table() -> DivisionTable {
        let cell = |mean| Some(GroupStats { count: 3, mean });
        DivisionTable {
            division: "west".into(),
            candidates: vec!["Cozart".into(), "Seager".into()],
            rows: vec![
                PivotRow {
                    reference_county: "Denver, CO".into(),
                    cells: vec![cell(30.0), cell(70.0)],
                },
                PivotRow {
                    reference_county: "Maricopa, AZ".into(),
                    cells: vec![None, cell(55.0)],
                },
            ],
        }
    }

    #[test]
    fn bars_sit_side_by_side_within_each_slot() {
        let bars = grouped_bars(&table());
        assert_eq!(bars.len(), 3);

        assert!((bars[0].center - -0.125).abs() < 1e-12);
        assert!((bars[1].center - 0.125).abs() < 1e-12);
        assert!((bars[0].right() - bars[1].left()).abs() < 1e-12);
        assert_eq!(bars[1].height, 70.0);

        // Missing Cozart cell leaves its slot empty.
        assert_eq!(bars[2].row, 1);
        assert_eq!(bars[2].column, 1);
        assert!((bars[2].center - 1.125).abs() < 1e-12);
    }

    #[test]
    fn ticks_every_ten_up_to_one_hundred() {
        let ticks = y_ticks();
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&100.0));
    }

    #[test]
    fn labels_only_on_whole_positions() {
        let table = table();
        assert_eq!(row_label(&table, 0.0), Some("Denver, CO"));
        assert_eq!(row_label(&table, 1.0), Some("Maricopa, AZ"));
        assert_eq!(row_label(&table, 0.5), None);
        assert_eq!(row_label(&table, 2.0), None);
        assert_eq!(row_label(&table, -1.0), None);
    }
}
