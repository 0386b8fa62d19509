use serde::Serialize;
use utoipa::ToSchema;

use crate::angles::engine::AngleEngine;
use crate::angles::types::{GeoPoint, PolarPoint, Satellite};

/// Everything a front end needs to draw one satellite.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SatellitePointing {
    #[serde(flatten)]
    pub point: PolarPoint,
    pub slant_range_km: f64,
    /// Illustrative circle size, not a beam footprint.
    pub coverage_radius_km: f64,
}

impl AngleEngine {
    /// Polar placement plus range and coverage radius, in input order.
    pub fn pointing_report(
        &self,
        observer: &GeoPoint,
        satellites: &[Satellite],
    ) -> Vec<SatellitePointing> {
        self.calculate_polar_coordinates(observer.latitude, observer.longitude, satellites)
            .into_iter()
            .map(|point| {
                let slant_range_km = self.calculate_slant_range(
                    observer.latitude,
                    observer.longitude,
                    point.satellite.longitude,
                );
                let coverage_radius_km = self.calculate_coverage_radius(point.elevation);
                SatellitePointing {
                    point,
                    slant_range_km,
                    coverage_radius_km,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_keeps_order_and_zeroes_hidden_coverage() {
        let observer = GeoPoint::new(51.5, 0.0).unwrap();
        let satellites = vec![
            Satellite::new("ASTRA 1KR", 19.2).unwrap(),
            Satellite::new("GALAXY 19", -100.0).unwrap(),
        ];
        let report = AngleEngine::default().pointing_report(&observer, &satellites);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].point.satellite.name, "ASTRA 1KR");
        assert!(report[0].point.is_visible);
        assert_eq!(
            report[0].coverage_radius_km,
            (report[0].point.elevation * 20.0).clamp(200.0, 1000.0)
        );
        assert!(!report[1].point.is_visible);
        assert_eq!(report[1].coverage_radius_km, 0.0);
        assert!(report[1].slant_range_km > report[0].slant_range_km);
    }
}
