use serde::Deserialize;

use crate::angles::types::{GeoPoint, LookAngle, PolarPoint, Satellite};

// Spherical Earth, equatorial radius
pub const EARTH_RADIUS_KM: f64 = 6378.137;
pub const GEOSTATIONARY_ALTITUDE_KM: f64 = 35786.0;
pub const HORIZON_ELEVATION_DEG: f64 = 0.0;

/// Display and degeneracy constants. These are empirical choices, kept
/// configurable so deployments can match an existing front end exactly.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConstants {
    /// Above this absolute latitude the azimuth is fixed (north pole: 180, south pole: 0).
    pub pole_latitude_threshold_deg: f64,
    pub coverage_km_per_degree: f64,
    pub coverage_min_km: f64,
    pub coverage_max_km: f64,
}

impl Default for EngineConstants {
    fn default() -> Self {
        Self {
            pole_latitude_threshold_deg: 89.99,
            coverage_km_per_degree: 20.0,
            coverage_min_km: 200.0,
            coverage_max_km: 1000.0,
        }
    }
}

impl EngineConstants {
    /// Reject values that would make the coverage clamp panic or the pole
    /// branch meaningless.
    pub fn validate(&self) -> Result<(), String> {
        let threshold = self.pole_latitude_threshold_deg;
        if !threshold.is_finite() || !(0.0..=90.0).contains(&threshold) {
            return Err(format!(
                "pole_latitude_threshold_deg must be within [0, 90], got {}",
                threshold
            ));
        }
        for (name, value) in [
            ("coverage_km_per_degree", self.coverage_km_per_degree),
            ("coverage_min_km", self.coverage_min_km),
            ("coverage_max_km", self.coverage_max_km),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be finite and non-negative, got {}", name, value));
            }
        }
        if self.coverage_min_km > self.coverage_max_km {
            return Err(format!(
                "coverage_min_km ({}) exceeds coverage_max_km ({})",
                self.coverage_min_km, self.coverage_max_km
            ));
        }
        Ok(())
    }
}

/// Look-angle calculator for geostationary satellites.
///
/// Stateless apart from its constants; `Copy` so it can be handed to any
/// thread or request handler freely.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AngleEngine {
    pub constants: EngineConstants,
}

impl AngleEngine {
    pub fn new(constants: EngineConstants) -> Self {
        Self { constants }
    }

    /// Elevation in degrees. Negative means the satellite is below the horizon.
    pub fn calculate_elevation(&self, lat: f64, lon: f64, sat_lon: f64) -> f64 {
        let gamma = geocentric_angle(lat, lon, sat_lon);
        let orbit_radius = EARTH_RADIUS_KM + GEOSTATIONARY_ALTITUDE_KM;
        let distance = slant_range_km(gamma);
        let sin_el = (orbit_radius * gamma.cos() - EARTH_RADIUS_KM) / distance;
        sin_el.clamp(-1.0, 1.0).asin().to_degrees()
    }

    /// Compass bearing in `[0, 360)`: 0 = North, 90 = East.
    pub fn calculate_azimuth(&self, lat: f64, lon: f64, sat_lon: f64) -> f64 {
        if lat.abs() > self.constants.pole_latitude_threshold_deg {
            // Every direction is south from the north pole and north from the south pole
            return if lat > 0.0 { 180.0 } else { 0.0 };
        }

        let lon_diff = normalize_longitude_difference(sat_lon - lon).to_radians();
        let lat_rad = lat.to_radians();
        let azimuth = lon_diff
            .sin()
            .atan2(-lat_rad.sin() * lon_diff.cos())
            .to_degrees();
        normalize_azimuth(azimuth)
    }

    pub fn calculate_slant_range(&self, lat: f64, lon: f64, sat_lon: f64) -> f64 {
        slant_range_km(geocentric_angle(lat, lon, sat_lon))
    }

    /// Horizon inclusive: exactly 0 degrees is visible.
    pub fn is_satellite_visible(&self, elevation_deg: f64) -> bool {
        elevation_deg >= HORIZON_ELEVATION_DEG
    }

    /// Radius in km of the illustrative coverage circle drawn on the map.
    ///
    /// This is a display heuristic only. It is not a beam footprint and must
    /// not be used for link budgets or antenna sizing.
    pub fn calculate_coverage_radius(&self, elevation_deg: f64) -> f64 {
        if elevation_deg < HORIZON_ELEVATION_DEG {
            return 0.0;
        }
        let c = &self.constants;
        (elevation_deg * c.coverage_km_per_degree).clamp(c.coverage_min_km, c.coverage_max_km)
    }

    pub fn look_angle(&self, observer: &GeoPoint, satellite: &Satellite) -> LookAngle {
        LookAngle {
            elevation_deg: self.calculate_elevation(
                observer.latitude,
                observer.longitude,
                satellite.longitude,
            ),
            azimuth_deg: self.calculate_azimuth(
                observer.latitude,
                observer.longitude,
                satellite.longitude,
            ),
        }
    }

    /// Place every satellite on the polar plot, preserving input order.
    pub fn calculate_polar_coordinates(
        &self,
        lat: f64,
        lon: f64,
        satellites: &[Satellite],
    ) -> Vec<PolarPoint> {
        satellites
            .iter()
            .map(|sat| {
                let elevation = self.calculate_elevation(lat, lon, sat.longitude);
                let azimuth = self.calculate_azimuth(lat, lon, sat.longitude);
                // NaN stays NaN rather than landing on the rim
                let plotted = if elevation < 0.0 { 0.0 } else { elevation };
                let radius = (90.0 - plotted) / 90.0;
                let az_rad = azimuth.to_radians();

                PolarPoint {
                    satellite: sat.clone(),
                    elevation,
                    azimuth,
                    is_visible: self.is_satellite_visible(elevation),
                    polar_x: radius * az_rad.sin(),
                    polar_y: -radius * az_rad.cos(),
                    polar_radius: radius,
                }
            })
            .collect()
    }
}

/// Reduce a longitude difference into `(-180, 180]`.
pub fn normalize_longitude_difference(diff_deg: f64) -> f64 {
    let wrapped = diff_deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

fn normalize_azimuth(azimuth_deg: f64) -> f64 {
    let wrapped = if azimuth_deg < 0.0 {
        azimuth_deg + 360.0
    } else {
        azimuth_deg
    };
    // -1e-15 + 360 rounds to 360
    if wrapped >= 360.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Angle at Earth's centre between the observer and the sub-satellite point, radians.
fn geocentric_angle(lat: f64, lon: f64, sat_lon: f64) -> f64 {
    let lon_diff = normalize_longitude_difference(sat_lon - lon).to_radians();
    (lat.to_radians().cos() * lon_diff.cos())
        .clamp(-1.0, 1.0)
        .acos()
}

fn slant_range_km(gamma: f64) -> f64 {
    let orbit_radius = EARTH_RADIUS_KM + GEOSTATIONARY_ALTITUDE_KM;
    (EARTH_RADIUS_KM * EARTH_RADIUS_KM + orbit_radius * orbit_radius
        - 2.0 * EARTH_RADIUS_KM * orbit_radius * gamma.cos())
    .sqrt()
}

pub fn calculate_elevation(lat: f64, lon: f64, sat_lon: f64) -> f64 {
    AngleEngine::default().calculate_elevation(lat, lon, sat_lon)
}

pub fn calculate_azimuth(lat: f64, lon: f64, sat_lon: f64) -> f64 {
    AngleEngine::default().calculate_azimuth(lat, lon, sat_lon)
}

pub fn calculate_slant_range(lat: f64, lon: f64, sat_lon: f64) -> f64 {
    AngleEngine::default().calculate_slant_range(lat, lon, sat_lon)
}

pub fn is_satellite_visible(elevation_deg: f64) -> bool {
    AngleEngine::default().is_satellite_visible(elevation_deg)
}

pub fn calculate_coverage_radius(elevation_deg: f64) -> f64 {
    AngleEngine::default().calculate_coverage_radius(elevation_deg)
}

pub fn calculate_polar_coordinates(lat: f64, lon: f64, satellites: &[Satellite]) -> Vec<PolarPoint> {
    AngleEngine::default().calculate_polar_coordinates(lat, lon, satellites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const BUSAN: (f64, f64) = (35.1796, 129.0756);

    #[test]
    fn zenith_when_directly_below() {
        for lon in [-170.0, -45.0, 0.0, 10.0, 179.5] {
            assert_abs_diff_eq!(calculate_elevation(0.0, lon, lon), 90.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn busan_to_intelsat_39() {
        let el = calculate_elevation(BUSAN.0, BUSAN.1, 105.0);
        let az = calculate_azimuth(BUSAN.0, BUSAN.1, 105.0);
        assert_abs_diff_eq!(el, 41.790487261744595, epsilon = 1e-6);
        assert_abs_diff_eq!(az, 217.79438730078425, epsilon = 1e-6);
        assert!((30.0..50.0).contains(&el));
        assert!((180.0..270.0).contains(&az));
    }

    #[test]
    fn southern_hemisphere_looks_north() {
        let el = calculate_elevation(-33.87, 151.21, 156.0);
        let az = calculate_azimuth(-33.87, 151.21, 156.0);
        assert_abs_diff_eq!(el, 50.28653186653653, epsilon = 1e-6);
        assert_abs_diff_eq!(az, 8.550875563204384, epsilon = 1e-6);
    }

    #[test]
    fn below_horizon_is_negative_not_clamped() {
        let el = calculate_elevation(51.5, 0.0, -100.0);
        assert_abs_diff_eq!(el, -14.622323129524883, epsilon = 1e-6);
        assert!(!is_satellite_visible(el));
    }

    #[test]
    fn antimeridian_is_continuous() {
        let east = calculate_elevation(0.0, 179.0, -179.0);
        let west = calculate_elevation(0.0, -179.0, 179.0);
        assert_abs_diff_eq!(east, west, epsilon = 1e-12);
        // 2 degree true separation, not 358
        assert_abs_diff_eq!(east, 87.64365576876594, epsilon = 1e-6);
        assert_abs_diff_eq!(calculate_azimuth(0.0, 179.0, -179.0), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(calculate_azimuth(0.0, -179.0, 179.0), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn elevation_depends_only_on_longitude_difference() {
        let base = calculate_elevation(40.0, 10.0, 30.0);
        for shift in [-200.0, -90.0, 45.0, 170.0, 720.0] {
            let shifted = calculate_elevation(40.0, 10.0 + shift, 30.0 + shift);
            assert_abs_diff_eq!(base, shifted, epsilon = 1e-9);
        }
    }

    #[test]
    fn azimuth_stays_in_range() {
        let mut lat = -89.0;
        while lat <= 89.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                for sat_lon in [-180.0, -120.0, -1.0, 0.0, 1.0, 75.5, 180.0] {
                    let az = calculate_azimuth(lat, lon, sat_lon);
                    assert!((0.0..360.0).contains(&az), "az {az} at {lat},{lon},{sat_lon}");
                }
                lon += 7.5;
            }
            lat += 4.5;
        }
    }

    #[test]
    fn poles_have_fixed_azimuth() {
        assert_eq!(calculate_azimuth(90.0, 0.0, 45.0), 180.0);
        assert_eq!(calculate_azimuth(-90.0, 0.0, 45.0), 0.0);
        assert_eq!(calculate_azimuth(89.995, 12.0, -100.0), 180.0);
    }

    #[test]
    fn pole_threshold_is_configurable() {
        let engine = AngleEngine::new(EngineConstants {
            pole_latitude_threshold_deg: 80.0,
            ..Default::default()
        });
        assert_eq!(engine.calculate_azimuth(85.0, 0.0, 45.0), 180.0);
        assert_ne!(calculate_azimuth(85.0, 0.0, 45.0), 180.0);
    }

    #[test]
    fn constants_validation() {
        assert!(EngineConstants::default().validate().is_ok());

        let inverted = EngineConstants {
            coverage_max_km: 150.0,
            ..Default::default()
        };
        assert!(inverted.validate().unwrap_err().contains("coverage_min_km"));

        let bad_values = [
            EngineConstants {
                coverage_min_km: f64::NAN,
                ..Default::default()
            },
            EngineConstants {
                coverage_km_per_degree: -1.0,
                ..Default::default()
            },
            EngineConstants {
                coverage_max_km: f64::INFINITY,
                ..Default::default()
            },
            EngineConstants {
                pole_latitude_threshold_deg: 95.0,
                ..Default::default()
            },
            EngineConstants {
                pole_latitude_threshold_deg: -1.0,
                ..Default::default()
            },
        ];
        for constants in bad_values {
            assert!(constants.validate().is_err(), "{constants:?}");
        }

        let equal_bounds = EngineConstants {
            coverage_min_km: 500.0,
            coverage_max_km: 500.0,
            ..Default::default()
        };
        assert!(equal_bounds.validate().is_ok());
        assert_eq!(AngleEngine::new(equal_bounds).calculate_coverage_radius(30.0), 500.0);
    }

    #[test]
    fn visibility_is_horizon_inclusive() {
        assert!(is_satellite_visible(0.0));
        assert!(is_satellite_visible(12.5));
        assert!(!is_satellite_visible(-0.0001));
    }

    #[test]
    fn coverage_radius_saturates() {
        assert_eq!(calculate_coverage_radius(-5.0), 0.0);
        assert_eq!(calculate_coverage_radius(0.0), 200.0);
        assert_eq!(calculate_coverage_radius(1.0), 200.0);
        assert_eq!(calculate_coverage_radius(25.0), 500.0);
        assert_eq!(calculate_coverage_radius(60.0), 1000.0);
        assert_eq!(calculate_coverage_radius(90.0), 1000.0);
    }

    #[test]
    fn coverage_radius_is_monotonic_over_visible_range() {
        let mut previous = calculate_coverage_radius(0.0);
        for step in 1..=900 {
            let radius = calculate_coverage_radius(step as f64 * 0.1);
            assert!(radius >= previous);
            previous = radius;
        }
    }

    #[test]
    fn slant_range_bounds() {
        assert_abs_diff_eq!(calculate_slant_range(0.0, 20.0, 20.0), 35786.0, epsilon = 1e-6);
        let far = calculate_slant_range(BUSAN.0, BUSAN.1, 105.0);
        assert!(far > 35786.0 && far < 41_700.0);
    }

    #[test]
    fn longitude_difference_normalization() {
        assert_eq!(normalize_longitude_difference(180.0), 180.0);
        assert_eq!(normalize_longitude_difference(-180.0), 180.0);
        assert_eq!(normalize_longitude_difference(358.0), -2.0);
        assert_eq!(normalize_longitude_difference(-358.0), 2.0);
        assert_eq!(normalize_longitude_difference(725.0), 5.0);
        assert!(normalize_longitude_difference(f64::NAN).is_nan());
    }

    #[test]
    fn nan_inputs_propagate() {
        assert!(calculate_elevation(f64::NAN, 0.0, 0.0).is_nan());
        assert!(calculate_azimuth(0.0, f64::NAN, 0.0).is_nan());
        let points = calculate_polar_coordinates(0.0, 0.0, &[Satellite {
            name: "BAD".into(),
            longitude: f64::NAN,
        }]);
        assert!(points[0].polar_radius.is_nan());
        assert!(!points[0].is_visible);
    }

    #[test]
    fn polar_coordinates_preserve_order_and_visibility() {
        let satellites = vec![
            Satellite::new("WEST", -100.0).unwrap(),
            Satellite::new("INTELSAT-39", 105.0).unwrap(),
            Satellite::new("OVERHEAD", 128.5).unwrap(),
        ];
        let points = calculate_polar_coordinates(BUSAN.0, BUSAN.1, &satellites);

        assert_eq!(points.len(), satellites.len());
        for (point, sat) in points.iter().zip(&satellites) {
            assert_eq!(point.satellite, *sat);
            assert_eq!(point.is_visible, point.elevation >= 0.0);
        }

        // Below horizon renders on the rim
        assert!(!points[0].is_visible);
        assert_eq!(points[0].polar_radius, 1.0);

        let intelsat = &points[1];
        assert_abs_diff_eq!(intelsat.polar_radius, 0.5356612526472823, epsilon = 1e-9);
        assert_abs_diff_eq!(intelsat.polar_x, -0.32826909640521956, epsilon = 1e-9);
        assert_abs_diff_eq!(intelsat.polar_y, 0.4232875830129632, epsilon = 1e-9);
    }

    #[test]
    fn look_angle_matches_free_functions() {
        let observer = GeoPoint::new(37.5665, 126.978).unwrap();
        let sat = Satellite::new("KOREASAT 6", 116.0).unwrap();
        let look = AngleEngine::default().look_angle(&observer, &sat);
        assert_abs_diff_eq!(look.elevation_deg, 44.944410142507934, epsilon = 1e-6);
        assert_abs_diff_eq!(look.azimuth_deg, 197.64945762177572, epsilon = 1e-6);
    }
}
