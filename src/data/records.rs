//! Record types shared by the loader, the geo join and the aggregator.
//! Every record is built once at load or join time and never mutated.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Raw vote file: `{"per_county_data": {id: {...}}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteFile {
    pub per_county_data: BTreeMap<String, RawCountyVotes>,
}

/// One county entry of the raw vote file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountyVotes {
    pub county_name: String,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub strength: Option<f64>,
    #[serde(default)]
    pub vote_details: HashMap<String, Option<f64>>,
}

/// One (county, candidate) vote tally.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteRecord {
    pub county_key: String,
    pub candidate: String,
    pub vote_metric: f64,
    pub winner: Option<String>,
    pub strength: Option<f64>,
}

impl VoteRecord {
    #[cfg(test)]
    pub fn new(county_key: impl Into<String>, candidate: impl Into<String>, vote_metric: f64) -> Self {
        Self {
            county_key: county_key.into(),
            candidate: candidate.into(),
            vote_metric,
            winner: None,
            strength: None,
        }
    }
}

/// County centroid keyed as `"Name, ST"`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecord {
    pub county_key: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoRecord {
    pub fn new(county_key: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            county_key: county_key.into(),
            latitude,
            longitude,
        }
    }
}

/// A division rival county, named by its join key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLocation {
    pub county_key: String,
    pub division_label: String,
}

/// A vote record that found its centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub county_key: String,
    pub candidate: String,
    pub vote_metric: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// A joined record lying within the threshold of a reference county.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityRecord {
    pub record: JoinedRecord,
    pub reference_county_key: String,
    pub division_label: String,
}
