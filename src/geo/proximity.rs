//! Geo-Join & Proximity Filter
//! Inner-joins votes to centroids and keeps rows near each reference county.

use crate::config::AnalysisConfig;
use crate::data::{GeoRecord, JoinedRecord, ProximityRecord, ReferenceLocation, VoteRecord};
use crate::geo::haversine_km;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// A reference county with its centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReference {
    pub county_key: String,
    pub division_label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of joining votes to the gazetteer.
#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    pub joined: Vec<JoinedRecord>,
    /// Vote county keys with no gazetteer match (sorted, deduplicated)
    pub unmatched: Vec<String>,
}

/// Index the gazetteer by key. A key may map to several centroids
/// (a county and an independent city that share a stem).
fn index_geo(geo: &[GeoRecord]) -> HashMap<&str, Vec<&GeoRecord>> {
    let mut index: HashMap<&str, Vec<&GeoRecord>> = HashMap::with_capacity(geo.len());
    for record in geo {
        index.entry(record.county_key.as_str()).or_default().push(record);
    }
    index
}

/// Inner join on `county_key`. Unmatched vote rows are dropped, never an error.
pub fn join_votes(votes: &[VoteRecord], geo: &[GeoRecord]) -> JoinOutcome {
    let index = index_geo(geo);
    let mut joined = Vec::with_capacity(votes.len());
    let mut unmatched = BTreeSet::new();

    for vote in votes {
        match index.get(vote.county_key.as_str()) {
            Some(matches) => {
                joined.extend(matches.iter().map(|g| JoinedRecord {
                    county_key: vote.county_key.clone(),
                    candidate: vote.candidate.clone(),
                    vote_metric: vote.vote_metric,
                    latitude: g.latitude,
                    longitude: g.longitude,
                }));
            }
            None => {
                unmatched.insert(vote.county_key.clone());
            }
        }
    }

    if !unmatched.is_empty() {
        warn!(
            counties = unmatched.len(),
            "Vote counties without a gazetteer match were dropped"
        );
        debug!(sample = ?unmatched.iter().take(20).collect::<Vec<_>>(), "Unmatched vote counties");
    }

    JoinOutcome {
        joined,
        unmatched: unmatched.into_iter().collect(),
    }
}

/// Build the reference locations for every configured division.
pub fn reference_locations(config: &AnalysisConfig) -> Vec<ReferenceLocation> {
    config
        .divisions
        .iter()
        .flat_map(|division| {
            division.counties.iter().map(|county| ReferenceLocation {
                county_key: county.clone(),
                division_label: division.label.clone(),
            })
        })
        .collect()
}

/// Inner join of reference counties onto the gazetteer.
pub fn resolve_references(
    references: &[ReferenceLocation],
    geo: &[GeoRecord],
) -> Vec<ResolvedReference> {
    let index = index_geo(geo);
    let mut resolved = Vec::with_capacity(references.len());

    for reference in references {
        let Some(matches) = index.get(reference.county_key.as_str()) else {
            warn!(
                county = %reference.county_key,
                division = %reference.division_label,
                "Reference county not in gazetteer, skipping"
            );
            continue;
        };
        resolved.extend(matches.iter().map(|g| ResolvedReference {
            county_key: reference.county_key.clone(),
            division_label: reference.division_label.clone(),
            latitude: g.latitude,
            longitude: g.longitude,
        }));
    }

    resolved
}

/// Keeps joined rows strictly closer than `threshold_km` to a reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityFilter {
    pub threshold_km: f64,
    pub earth_radius_km: f64,
}

impl ProximityFilter {
    pub fn new(threshold_km: f64, earth_radius_km: f64) -> Self {
        Self {
            threshold_km,
            earth_radius_km,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.threshold_km, config.earth_radius_km)
    }

    pub fn distance_km(&self, reference: &ResolvedReference, record: &JoinedRecord) -> f64 {
        haversine_km(
            reference.latitude,
            reference.longitude,
            record.latitude,
            record.longitude,
            self.earth_radius_km,
        )
    }

    /// Strict less-than: a row exactly at the threshold is excluded.
    pub fn is_near(&self, reference: &ResolvedReference, record: &JoinedRecord) -> bool {
        self.distance_km(reference, record) < self.threshold_km
    }

    /// Rows near a single reference, tagged with that reference.
    pub fn filter(
        &self,
        reference: &ResolvedReference,
        joined: &[JoinedRecord],
    ) -> Vec<ProximityRecord> {
        let near: Vec<ProximityRecord> = joined
            .iter()
            .filter(|record| self.is_near(reference, record))
            .map(|record| ProximityRecord {
                record: record.clone(),
                reference_county_key: reference.county_key.clone(),
                division_label: reference.division_label.clone(),
            })
            .collect();

        let counties: BTreeSet<&str> = near
            .iter()
            .map(|p| p.record.county_key.as_str())
            .collect();
        debug!(
            reference = %reference.county_key,
            rows = near.len(),
            counties = counties.len(),
            "Rows within threshold"
        );
        near
    }

    /// Scan every reference. A joined row may appear under several references.
    pub fn filter_all(
        &self,
        references: &[ResolvedReference],
        joined: &[JoinedRecord],
    ) -> Vec<ProximityRecord> {
        references
            .iter()
            .flat_map(|reference| self.filter(reference, joined))
            .collect()
    }
}
