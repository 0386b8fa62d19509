use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::angles::error::CoordinateError;

/// Observer position in geographic degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::InvalidLatitude(latitude));
        }
        validate_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse `"lat, lon"`.
    pub fn from_coordinates(coordinates: &str) -> Result<Self, CoordinateError> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(CoordinateError::Malformed(coordinates.to_string()));
        }
        let lat = parts[0]
            .parse()
            .map_err(|_| CoordinateError::Malformed(parts[0].to_string()))?;
        let lon = parts[1]
            .parse()
            .map_err(|_| CoordinateError::Malformed(parts[1].to_string()))?;
        Self::new(lat, lon)
    }
}

/// Geostationary orbital slot. Latitude is implicitly 0 and altitude fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Satellite {
    pub name: String,
    pub longitude: f64,
}

impl Satellite {
    pub fn new(name: impl Into<String>, longitude: f64) -> Result<Self, CoordinateError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CoordinateError::EmptyName);
        }
        validate_longitude(longitude)?;
        Ok(Self { name, longitude })
    }
}

/// Antenna pointing direction for an observer/satellite pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LookAngle {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

/// A satellite placed on the polar sky plot.
///
/// `polar_radius` is 0 at zenith and 1 on the horizon. Below-horizon satellites
/// sit on the rim. `polar_y` grows downward to match screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PolarPoint {
    #[serde(flatten)]
    pub satellite: Satellite,
    pub elevation: f64,
    pub azimuth: f64,
    pub is_visible: bool,
    pub polar_x: f64,
    pub polar_y: f64,
    pub polar_radius: f64,
}

fn validate_longitude(longitude: f64) -> Result<(), CoordinateError> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoordinateError::InvalidLongitude(longitude));
    }
    Ok(())
}
