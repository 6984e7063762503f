pub mod errors;
pub mod http;
pub mod models;

pub use errors::ScoutError;
pub use models::{ GeoPoint, Observation, RawRow, RawTable };
