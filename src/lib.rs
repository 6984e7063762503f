pub mod config;
pub mod core;
pub mod dataset;
pub mod export;
pub mod filter;
pub mod reconcile;
pub mod schema;
pub mod sheets;
pub mod source;
pub mod store;

#[cfg(test)]
mod pipeline_tests;

pub use config::{ ScoutConfig, SheetsConfig };
pub use crate::core::{ GeoPoint, Observation, RawRow, RawTable, ScoutError };
pub use dataset::SurveyDataset;
pub use filter::SurveyFilter;
pub use reconcile::reconcile;
