//! Input Data Loader Module
//! Reads the per-county vote JSON and the Census county gazetteer.

use crate::config::CandidateConfig;
use crate::data::processor::{DataProcessor, ProcessorError};
use crate::data::records::{GeoRecord, VoteFile, VoteRecord};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse vote data: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to load gazetteer: {0}")]
    CsvError(#[from] PolarsError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Loads both input datasets into flat record lists.
pub struct DataLoader;

impl DataLoader {
    /// Load the vote file and flatten it to one record per (county, candidate).
    pub fn load_votes(
        path: &Path,
        candidates: &[CandidateConfig],
    ) -> Result<Vec<VoteRecord>, LoaderError> {
        let file = Self::open(path)?;
        let records = Self::votes_from_reader(BufReader::new(file), candidates)?;
        let decided = records.iter().filter(|r| r.winner.is_some()).count();
        let rated = records.iter().filter(|r| r.strength.is_some()).count();
        info!(
            path = %path.display(),
            records = records.len(),
            with_winner = decided,
            with_strength = rated,
            "Loaded vote records"
        );
        Ok(records)
    }

    pub fn votes_from_reader<R: Read>(
        reader: R,
        candidates: &[CandidateConfig],
    ) -> Result<Vec<VoteRecord>, LoaderError> {
        let file: VoteFile = serde_json::from_reader(reader)?;
        Ok(DataProcessor::flatten_votes(&file, candidates))
    }

    /// Load the tab-separated gazetteer (ISO-8859-1) using Polars.
    pub fn load_gazetteer(path: &Path) -> Result<Vec<GeoRecord>, LoaderError> {
        let mut raw = Vec::new();
        Self::open(path)?
            .read_to_end(&mut raw)
            .map_err(|source| LoaderError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .map_parse_options(|opts| opts.with_separator(b'\t'))
            .into_reader_with_file_handle(Cursor::new(Self::latin1_to_utf8(&raw)))
            .finish()?;

        DataProcessor::trim_column_names(&mut df)?;
        let records = DataProcessor::geo_records_from_frame(&df)?;
        info!(path = %path.display(), records = records.len(), "Loaded gazetteer");
        Ok(records)
    }

    /// Every ISO-8859-1 byte maps to the code point of the same value.
    fn latin1_to_utf8(raw: &[u8]) -> Vec<u8> {
        raw.iter().map(|&b| b as char).collect::<String>().into_bytes()
    }

    fn open(path: &Path) -> Result<File, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::MissingFile(path.to_path_buf()));
        }
        File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
