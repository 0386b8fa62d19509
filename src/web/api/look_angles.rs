use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::angles::{GeoPoint, SatellitePointing};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::auth::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookAnglesQuery {
    /// Observer latitude in degrees; defaults to the current location
    pub lat: Option<f64>,
    /// Observer longitude in degrees; defaults to the current location
    pub lon: Option<f64>,
    #[serde(default)]
    pub visible_only: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LookAnglesResponse {
    pub observer: GeoPoint,
    pub satellites: Vec<SatellitePointing>,
    pub visible_count: usize,
}

#[utoipa::path(
    get,
    path = "/api/look-angles",
    tag = "angles",
    params(LookAnglesQuery),
    responses(
        (status = 200, description = "Look angles for every satellite", body = LookAnglesResponse),
        (status = 400, description = "Invalid observer coordinates", body = ErrorResponse)
    )
)]
pub async fn look_angles(
    State(state): State<AppState>,
    Query(query): Query<LookAnglesQuery>,
) -> ApiResult<Json<LookAnglesResponse>> {
    let session = state.session.read().await;
    let observer = resolve_observer(&query, session.observer)?;
    let satellites = session.catalog.all();
    drop(session);

    let mut report = state.engine.pointing_report(&observer, &satellites);
    let visible_count = report.iter().filter(|p| p.point.is_visible).count();
    if query.visible_only {
        report.retain(|p| p.point.is_visible);
    }

    Ok(Json(LookAnglesResponse {
        observer,
        satellites: report,
        visible_count,
    }))
}

fn resolve_observer(query: &LookAnglesQuery, current: GeoPoint) -> ApiResult<GeoPoint> {
    match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Ok(GeoPoint::new(lat, lon)?),
        (None, None) => Ok(current),
        _ => Err(ApiError::Validation(
            "lat and lon must be given together".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_defaults_to_current() {
        let current = GeoPoint::new(1.0, 2.0).unwrap();
        let got = resolve_observer(&LookAnglesQuery::default(), current).unwrap();
        assert_eq!(got, current);
    }

    #[test]
    fn observer_from_query_is_validated() {
        let current = GeoPoint::default();
        let query = LookAnglesQuery {
            lat: Some(35.0),
            lon: Some(129.0),
            visible_only: false,
        };
        assert_eq!(
            resolve_observer(&query, current).unwrap(),
            GeoPoint::new(35.0, 129.0).unwrap()
        );

        let bad = LookAnglesQuery {
            lat: Some(135.0),
            lon: Some(129.0),
            visible_only: false,
        };
        assert!(matches!(
            resolve_observer(&bad, current),
            Err(ApiError::Validation(_))
        ));

        let half = LookAnglesQuery {
            lat: Some(35.0),
            lon: None,
            visible_only: false,
        };
        assert!(resolve_observer(&half, current).is_err());
    }
}
