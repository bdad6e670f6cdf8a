//! Vote Aggregator Module
//! Groups proximity rows by (reference county, candidate), averages the vote
//! metric, and pivots candidates into columns.

use crate::data::ProximityRecord;
use statrs::statistics::Statistics;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::info;

/// Mean vote metric for one (reference county, candidate) group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStats {
    pub count: usize,
    pub mean: f64,
}

impl GroupStats {
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            count: values.len(),
            mean: values.iter().mean(),
        }
    }
}

/// One reference county with a cell per candidate column.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub reference_county: String,
    /// Same order as `DivisionTable::candidates`; `None` when the group is empty
    pub cells: Vec<Option<GroupStats>>,
}

impl PivotRow {
    pub fn mean(&self, column: usize) -> Option<f64> {
        self.cells.get(column).copied().flatten().map(|s| s.mean)
    }
}

/// Pivoted means for one division.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionTable {
    pub division: String,
    pub candidates: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl DivisionTable {
    pub fn column_index(&self, candidate: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c == candidate)
    }

    /// Mean for (reference county, candidate), if that group has rows.
    #[cfg(test)]
    pub fn value(&self, reference_county: &str, candidate: &str) -> Option<f64> {
        let column = self.column_index(candidate)?;
        self.rows
            .iter()
            .find(|row| row.reference_county == reference_county)
            .and_then(|row| row.mean(column))
    }

    /// Stable ascending sort on one candidate's column; empty cells go last.
    pub fn sort_by_candidate(&mut self, candidate: &str) {
        let Some(column) = self.column_index(candidate) else {
            return;
        };
        self.rows
            .sort_by(|a, b| match (a.mean(column), b.mean(column)) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
    }

    #[cfg(test)]
    pub fn reference_counties(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.reference_county.as_str()).collect()
    }
}

/// Handles grouping and pivoting of proximity rows.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Mean vote metric keyed by (reference county, candidate), sorted by key.
    pub fn group_means(records: &[ProximityRecord]) -> BTreeMap<(String, String), GroupStats> {
        let mut values: BTreeMap<(String, String), Vec<f64>> = BTreeMap::new();
        for record in records {
            values
                .entry((
                    record.reference_county_key.clone(),
                    record.record.candidate.clone(),
                ))
                .or_default()
                .push(record.record.vote_metric);
        }

        values
            .into_iter()
            .map(|(key, vals)| (key, GroupStats::from_values(&vals)))
            .collect()
    }

    /// One row per reference county, one column per candidate.
    pub fn pivot(
        division: &str,
        means: &BTreeMap<(String, String), GroupStats>,
        candidates: &[String],
    ) -> DivisionTable {
        let mut rows: BTreeMap<&str, Vec<Option<GroupStats>>> = BTreeMap::new();
        for ((reference, candidate), stats) in means {
            let cells = rows
                .entry(reference.as_str())
                .or_insert_with(|| vec![None; candidates.len()]);
            if let Some(column) = candidates.iter().position(|c| c == candidate) {
                cells[column] = Some(*stats);
            }
        }

        DivisionTable {
            division: division.to_string(),
            candidates: candidates.to_vec(),
            rows: rows
                .into_iter()
                .map(|(reference, cells)| PivotRow {
                    reference_county: reference.to_string(),
                    cells,
                })
                .collect(),
        }
    }

    /// Aggregate the rows tagged with `division`, pivot, and sort.
    pub fn division_table(
        division: &str,
        records: &[ProximityRecord],
        candidates: &[String],
        sort_by: &str,
    ) -> DivisionTable {
        let in_division: Vec<ProximityRecord> = records
            .iter()
            .filter(|r| r.division_label == division)
            .cloned()
            .collect();

        let means = Self::group_means(&in_division);
        let mut table = Self::pivot(division, &means, candidates);
        table.sort_by_candidate(sort_by);

        info!(
            division = %table.division,
            rows = table.rows.len(),
            sorted_by = sort_by,
            "Built division table"
        );
        table
    }
}
