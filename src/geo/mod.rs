//! Geo module - great-circle distance and proximity filtering

mod distance;
mod proximity;

pub use distance::haversine_km;
pub use proximity::{join_votes, reference_locations, resolve_references, ProximityFilter};
