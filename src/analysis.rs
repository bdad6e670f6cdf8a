//! Analysis pipeline: load, join, proximity filter, aggregate.

use crate::config::{AnalysisConfig, CandidateConfig};
use crate::data::{DataLoader, GeoRecord, LoaderError, VoteRecord};
use crate::geo::{join_votes, reference_locations, resolve_references, ProximityFilter};
use crate::stats::{DivisionTable, StatsCalculator};
use tracing::info;

/// One subplot's worth of results.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionReport {
    pub label: String,
    pub title: String,
    pub table: DivisionTable,
}

/// Everything the chart needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub candidates: Vec<CandidateConfig>,
    pub divisions: Vec<DivisionReport>,
}

/// Load both inputs from disk and analyze them. Loading errors are fatal.
pub fn run(config: &AnalysisConfig) -> Result<Report, LoaderError> {
    let votes = DataLoader::load_votes(&config.votes_path, &config.candidates)?;
    let geo = DataLoader::load_gazetteer(&config.gazetteer_path)?;
    Ok(analyze(config, &votes, &geo))
}

/// Pure part of the pipeline over already-loaded records.
pub fn analyze(config: &AnalysisConfig, votes: &[VoteRecord], geo: &[GeoRecord]) -> Report {
    let outcome = join_votes(votes, geo);
    info!(
        joined = outcome.joined.len(),
        dropped_counties = outcome.unmatched.len(),
        "Joined votes to gazetteer"
    );

    let references = resolve_references(&reference_locations(config), geo);
    let filter = ProximityFilter::from_config(config);
    let near = filter.filter_all(&references, &outcome.joined);
    info!(
        references = references.len(),
        rows = near.len(),
        threshold_km = config.threshold_km,
        "Proximity filter done"
    );

    let candidates = config.candidate_labels();
    let divisions = config
        .divisions
        .iter()
        .map(|division| DivisionReport {
            label: division.label.clone(),
            title: division.title.clone(),
            table: StatsCalculator::division_table(
                &division.label,
                &near,
                &candidates,
                &division.sort_by,
            ),
        })
        .collect();

    Report {
        title: config.title.clone(),
        x_axis_label: config.x_axis_label.clone(),
        y_axis_label: config.y_axis_label.clone(),
        candidates: config.candidates.clone(),
        divisions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DivisionConfig;
    use std::fs;

    /// Latitude north of the equator at `km` along the meridian.
    fn lat_at_km(km: f64) -> f64 {
        (km / 6367.0).to_degrees()
    }

    fn single_reference_config() -> AnalysisConfig {
        AnalysisConfig {
            divisions: vec![DivisionConfig {
                label: "west".into(),
                title: "NL West".into(),
                sort_by: "Seager".into(),
                counties: vec!["Home, ZZ".into()],
            }],
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn two_county_end_to_end() {
        let config = single_reference_config();
        let geo = vec![
            GeoRecord::new("Home, ZZ", 0.0, 0.0),
            GeoRecord::new("Away, ZZ", lat_at_km(30.0), 0.0),
            GeoRecord::new("Distant, ZZ", lat_at_km(300.0), 0.0),
        ];
        let votes = vec![
            VoteRecord::new("Home, ZZ", "Cozart", 40.0),
            VoteRecord::new("Home, ZZ", "Seager", 60.0),
            VoteRecord::new("Away, ZZ", "Cozart", 20.0),
            VoteRecord::new("Away, ZZ", "Seager", 80.0),
            VoteRecord::new("Distant, ZZ", "Cozart", 99.0),
            VoteRecord::new("Distant, ZZ", "Seager", 1.0),
        ];

        let report = analyze(&config, &votes, &geo);
        assert_eq!(report.divisions.len(), 1);

        let table = &report.divisions[0].table;
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.candidates, vec!["Cozart", "Seager"]);
        assert!((table.value("Home, ZZ", "Cozart").unwrap() - 30.0).abs() < 1e-12);
        assert!((table.value("Home, ZZ", "Seager").unwrap() - 70.0).abs() < 1e-12);
    }

    #[test]
    fn votes_missing_from_gazetteer_do_not_count() {
        let config = single_reference_config();
        let geo = vec![GeoRecord::new("Home, ZZ", 0.0, 0.0)];
        let votes = vec![
            VoteRecord::new("Home, ZZ", "Seager", 50.0),
            VoteRecord::new("Ghost, ZZ", "Seager", 100.0),
        ];

        let report = analyze(&config, &votes, &geo);
        assert_eq!(report.divisions[0].table.value("Home, ZZ", "Seager"), Some(50.0));
    }

    #[test]
    fn unresolved_reference_yields_no_row() {
        let mut config = single_reference_config();
        config.divisions[0].counties.push("Atlantis, ZZ".into());
        let geo = vec![GeoRecord::new("Home, ZZ", 0.0, 0.0)];
        let votes = vec![VoteRecord::new("Home, ZZ", "Seager", 50.0)];

        let report = analyze(&config, &votes, &geo);
        assert_eq!(report.divisions[0].table.reference_counties(), vec!["Home, ZZ"]);
    }

    #[test]
    fn default_divisions_are_reported_in_order() {
        let report = analyze(&AnalysisConfig::default(), &[], &[]);
        let labels: Vec<_> = report.divisions.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["west", "central"]);
        assert!(report.divisions.iter().all(|d| d.table.rows.is_empty()));
    }

    #[test]
    fn run_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let votes_path = dir.path().join("votes.json");
        let gaz_path = dir.path().join("gaz.txt");
        fs::write(
            &votes_path,
            r#"{"per_county_data": {
                "1": {"county_name": "Home, ZZ", "vote_details": {"Zack Cozart": 25, "Corey Seager": 75}}
            }}"#,
        )
        .unwrap();
        fs::write(
            &gaz_path,
            "USPS\tNAME\tINTPTLAT\tINTPTLONG\nZZ\tHome County\t0.0\t0.0\n",
        )
        .unwrap();

        let config = AnalysisConfig {
            votes_path,
            gazetteer_path: gaz_path,
            ..single_reference_config()
        };
        let report = run(&config).unwrap();
        assert_eq!(report.divisions[0].table.value("Home, ZZ", "Seager"), Some(75.0));
    }

    #[test]
    fn run_fails_on_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig {
            votes_path: dir.path().join("missing.json"),
            ..AnalysisConfig::default()
        };
        assert!(matches!(run(&config), Err(LoaderError::MissingFile(_))));
    }
}
