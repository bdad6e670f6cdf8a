//! Data module - input loading and normalization

mod loader;
mod processor;
mod records;

pub use loader::{DataLoader, LoaderError};
pub use records::{GeoRecord, JoinedRecord, ProximityRecord, ReferenceLocation, VoteRecord};
