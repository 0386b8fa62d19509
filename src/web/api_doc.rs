use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use super::api::error::ErrorResponse;
use super::api::look_angles::LookAnglesResponse;
use super::api::satellites::{NewSatellite, SatelliteEntry, SatelliteListResponse};
use crate::angles::{GeoPoint, LookAngle, PolarPoint, Satellite, SatellitePointing};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::look_angles::look_angles,
        super::api::satellites::list_satellites,
        super::api::satellites::add_satellite,
        super::api::satellites::delete_satellite,
        super::api::location::get_location,
        super::api::location::set_location,
    ),
    components(
        schemas(
            GeoPoint,
            Satellite,
            LookAngle,
            PolarPoint,
            SatellitePointing,
            LookAnglesResponse,
            NewSatellite,
            SatelliteEntry,
            SatelliteListResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Geosat Look API",
        description = "Antenna look angles toward geostationary satellites",
        version = "0.1.0"
    ),
    tags(
        (name = "angles", description = "Elevation, azimuth and polar plot placement"),
        (name = "satellites", description = "Satellite working set"),
        (name = "location", description = "Observer position")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
