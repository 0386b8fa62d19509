mod engine;
mod error;
mod report;
mod types;

pub use engine::*;
pub use error::CoordinateError;
pub use report::SatellitePointing;
pub use types::{GeoPoint, LookAngle, PolarPoint, Satellite};
