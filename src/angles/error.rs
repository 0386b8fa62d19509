use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude out of range [-90, 90]: {0}")]
    InvalidLatitude(f64),
    #[error("longitude out of range [-180, 180]: {0}")]
    InvalidLongitude(f64),
    #[error("satellite name must not be empty")]
    EmptyName,
    #[error("malformed coordinates: {0}")]
    Malformed(String),
}
