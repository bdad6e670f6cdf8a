//! GUI module - chart window

mod app;

pub use app::AllStarApp;
