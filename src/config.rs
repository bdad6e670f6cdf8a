//! Analysis Configuration Module
//! Candidate labels, division rosters, distance constants and input paths.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Location of the optional configuration override.
pub const CONFIG_PATH: &str = "allstar/config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    #[error("At least one candidate is required")]
    NoCandidates,
    #[error("Duplicate candidate label: {0}")]
    DuplicateCandidate(String),
    #[error("Duplicate division label: {0}")]
    DuplicateDivision(String),
    #[error("Division {division} sorts by unknown candidate {candidate}")]
    UnknownSortCandidate { division: String, candidate: String },
    #[error("Unknown color: {0}")]
    UnknownColor(String),
}

/// A candidate shown on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateConfig {
    /// Short label used as the pivot column name
    pub label: String,
    /// Name as it appears in the vote file's `vote_details`
    pub source_name: String,
    /// Named color or `#rrggbb`
    pub color: String,
}

/// A group of reference counties rendered as one subplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionConfig {
    pub label: String,
    pub title: String,
    /// Candidate label whose mean orders the rows (ascending)
    pub sort_by: String,
    pub counties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub votes_path: PathBuf,
    pub gazetteer_path: PathBuf,
    pub threshold_km: f64,
    pub earth_radius_km: f64,
    pub candidates: Vec<CandidateConfig>,
    pub divisions: Vec<DivisionConfig>,
    pub title: String,
    pub y_axis_label: String,
    pub x_axis_label: String,
    pub export_png: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            votes_path: PathBuf::from("allstar/NLSS_20170630_.json"),
            gazetteer_path: PathBuf::from("allstar/2016_Gaz_counties_national.txt"),
            threshold_km: 50.0,
            earth_radius_km: 6367.0,
            candidates: vec![
                CandidateConfig {
                    label: "Cozart".into(),
                    source_name: "Zack Cozart".into(),
                    color: "red".into(),
                },
                CandidateConfig {
                    label: "Seager".into(),
                    source_name: "Corey Seager".into(),
                    color: "dodgerblue".into(),
                },
            ],
            divisions: vec![
                DivisionConfig {
                    label: "west".into(),
                    title: "NL West".into(),
                    sort_by: "Seager".into(),
                    counties: [
                        "San Francisco, CA",
                        "Denver, CO",
                        "San Diego, CA",
                        "Maricopa, AZ",
                        "Los Angeles, CA",
                    ]
                    .map(String::from)
                    .to_vec(),
                },
                DivisionConfig {
                    label: "central".into(),
                    title: "NL Central".into(),
                    sort_by: "Cozart".into(),
                    counties: [
                        "Milwaukee, WI",
                        "Cook, IL",
                        "St. Louis, MO",
                        "Allegheny, PA",
                        "Hamilton, OH",
                    ]
                    .map(String::from)
                    .to_vec(),
                },
            ],
            title: "NL West & Central All Star Voting % w/in 50km of Division Rival Counties"
                .into(),
            y_axis_label: "Vote%".into(),
            x_axis_label: "Division Team County".into(),
            export_png: None,
        }
    }
}

impl AnalysisConfig {
    /// Load the config file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold_km > 0.0) {
            return Err(ConfigError::NotPositive("threshold_km"));
        }
        if !(self.earth_radius_km > 0.0) {
            return Err(ConfigError::NotPositive("earth_radius_km"));
        }
        if self.candidates.is_empty() {
            return Err(ConfigError::NoCandidates);
        }

        let mut labels = HashSet::new();
        for candidate in &self.candidates {
            if !labels.insert(candidate.label.as_str()) {
                return Err(ConfigError::DuplicateCandidate(candidate.label.clone()));
            }
            parse_color(&candidate.color)?;
        }

        let mut division_labels = HashSet::new();
        for division in &self.divisions {
            if !division_labels.insert(division.label.as_str()) {
                return Err(ConfigError::DuplicateDivision(division.label.clone()));
            }
            if !labels.contains(division.sort_by.as_str()) {
                return Err(ConfigError::UnknownSortCandidate {
                    division: division.label.clone(),
                    candidate: division.sort_by.clone(),
                });
            }
        }

        Ok(())
    }

    /// Candidate labels in configured order.
    pub fn candidate_labels(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.label.clone()).collect()
    }

    /// RGB colors in candidate order. Only valid after `validate`.
    pub fn candidate_colors(&self) -> Vec<[u8; 3]> {
        self.candidates
            .iter()
            .map(|c| parse_color(&c.color).unwrap_or([0, 0, 0]))
            .collect()
    }
}

/// Parse a named color or `#rrggbb` hex string.
pub fn parse_color(color: &str) -> Result<[u8; 3], ConfigError> {
    let unknown = || ConfigError::UnknownColor(color.to_string());

    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(unknown());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| unknown());
        return Ok([channel(0)?, channel(2)?, channel(4)?]);
    }

    match color.to_ascii_lowercase().as_str() {
        "red" => Ok([255, 0, 0]),
        "dodgerblue" => Ok([30, 144, 255]),
        "blue" => Ok([0, 0, 255]),
        "green" => Ok([0, 128, 0]),
        "orange" => Ok([255, 165, 0]),
        "purple" => Ok([128, 0, 128]),
        "gray" | "grey" => Ok([128, 128, 128]),
        "black" => Ok([0, 0, 0]),
        _ => Err(unknown()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AnalysisConfig::default();
        config.validate().unwrap();
        assert_eq!(config.threshold_km, 50.0);
        assert_eq!(config.earth_radius_km, 6367.0);
        assert_eq!(config.candidate_labels(), vec!["Cozart", "Seager"]);
        assert_eq!(config.divisions.len(), 2);
        assert!(config.divisions.iter().all(|d| d.counties.len() == 5));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json(r#"{"threshold_km": 25.0}"#).unwrap();
        assert_eq!(config.threshold_km, 25.0);
        assert_eq!(config.earth_radius_km, 6367.0);
        assert_eq!(config.divisions[0].label, "west");
    }

    #[test]
    fn rejects_sort_by_unknown_candidate() {
        let mut config = AnalysisConfig::default();
        config.divisions[1].sort_by = "Votto".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownSortCandidate { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let err = AnalysisConfig::from_json(r#"{"threshold_km": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive("threshold_km")));
    }

    #[test]
    fn rejects_duplicate_candidates() {
        let mut config = AnalysisConfig::default();
        config.candidates[1].label = "Cozart".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateCandidate(_))
        ));
    }

    #[test]
    fn rejects_duplicate_divisions() {
        let mut config = AnalysisConfig::default();
        config.divisions[1].label = "west".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateDivision(label)) if label == "west"
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            AnalysisConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn parses_named_and_hex_colors() {
        assert_eq!(parse_color("dodgerblue").unwrap(), [30, 144, 255]);
        assert_eq!(parse_color("#FF8000").unwrap(), [255, 128, 0]);
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("chartreuse-ish").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::load_or_default(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"earth_radius_km": 6371.0}"#).unwrap();
        let config = AnalysisConfig::load_or_default(&path).unwrap();
        assert_eq!(config.earth_radius_km, 6371.0);
    }
}
