//! Data Processor Module
//! Normalizes raw inputs into flat record lists (vote flattening, gazetteer keys).

use crate::config::CandidateConfig;
use crate::data::records::{GeoRecord, VoteFile, VoteRecord};
use polars::prelude::*;
use thiserror::Error;

/// Gazetteer columns the join needs.
pub const NAME_COL: &str = "NAME";
pub const STATE_COL: &str = "USPS";
pub const LAT_COL: &str = "INTPTLAT";
pub const LON_COL: &str = "INTPTLONG";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Gazetteer is missing column {0}")]
    MissingColumn(&'static str),
    #[error("Gazetteer row {row} has no value in {column}")]
    NullField { column: &'static str, row: usize },
    #[error("Gazetteer row {row} has unparseable {column}: {value:?}")]
    BadNumber {
        column: &'static str,
        row: usize,
        value: String,
    },
}

/// Handles normalization of the two input datasets.
pub struct DataProcessor;

impl DataProcessor {
    /// Flatten the nested per-county vote map into one record per
    /// (county, candidate). Candidates absent from `vote_details` get 0.
    pub fn flatten_votes(file: &VoteFile, candidates: &[CandidateConfig]) -> Vec<VoteRecord> {
        let mut records = Vec::with_capacity(file.per_county_data.len() * candidates.len());

        for county in file.per_county_data.values() {
            let strength = county.strength;

            for candidate in candidates {
                let vote_metric = county
                    .vote_details
                    .get(&candidate.source_name)
                    .copied()
                    .flatten()
                    .unwrap_or(0.0);

                records.push(VoteRecord {
                    county_key: county.county_name.clone(),
                    candidate: candidate.label.clone(),
                    vote_metric,
                    winner: county.winner.clone(),
                    strength,
                });
            }
        }

        records
    }

    /// Build the `"Name, ST"` join key from a gazetteer name such as
    /// `"San Francisco County"`: the trailing word is dropped.
    pub fn county_key(name: &str, state: &str) -> String {
        let name = name.trim();
        let stem = name
            .rsplit_once(char::is_whitespace)
            .map(|(head, _)| head.trim_end())
            .unwrap_or(name);
        format!("{}, {}", stem, state.trim())
    }

    /// Strip padding from header names (the gazetteer pads its last column).
    pub fn trim_column_names(df: &mut DataFrame) -> Result<(), ProcessorError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        df.set_column_names(names)?;
        Ok(())
    }

    /// Convert a gazetteer frame into centroid records.
    pub fn geo_records_from_frame(df: &DataFrame) -> Result<Vec<GeoRecord>, ProcessorError> {
        let names = Self::string_column(df, NAME_COL)?;
        let states = Self::string_column(df, STATE_COL)?;
        let lats = Self::string_column(df, LAT_COL)?;
        let lons = Self::string_column(df, LON_COL)?;

        let names = names.str()?;
        let states = states.str()?;
        let lats = lats.str()?;
        let lons = lons.str()?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let name = names.get(row).ok_or(ProcessorError::NullField {
                column: NAME_COL,
                row,
            })?;
            let state = states.get(row).ok_or(ProcessorError::NullField {
                column: STATE_COL,
                row,
            })?;
            let latitude = Self::parse_coordinate(lats.get(row), LAT_COL, row)?;
            let longitude = Self::parse_coordinate(lons.get(row), LON_COL, row)?;

            records.push(GeoRecord::new(
                Self::county_key(name, state),
                latitude,
                longitude,
            ));
        }

        Ok(records)
    }

    fn string_column(df: &DataFrame, name: &'static str) -> Result<Column, ProcessorError> {
        let column = df
            .column(name)
            .map_err(|_| ProcessorError::MissingColumn(name))?;
        Ok(column.cast(&DataType::String)?)
    }

    fn parse_coordinate(
        value: Option<&str>,
        column: &'static str,
        row: usize,
    ) -> Result<f64, ProcessorError> {
        let value = value.ok_or(ProcessorError::NullField { column, row })?;
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| ProcessorError::BadNumber {
                column,
                row,
                value: value.to_string(),
            })
    }
}
