use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::angles::Satellite;
use crate::catalog::Catalog;
use crate::events::AppEvent;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::auth::{require_permission, AppState, AuthenticatedUser};
use crate::web::config::Permission;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewSatellite {
    pub name: String,
    /// Orbital slot longitude in degrees, [-180, 180]
    pub longitude: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SatelliteEntry {
    pub name: String,
    pub longitude: f64,
    pub custom: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SatelliteListResponse {
    pub satellites: Vec<SatelliteEntry>,
}

impl SatelliteListResponse {
    fn from_catalog(catalog: &Catalog) -> Self {
        let custom = catalog.custom();
        let satellites = catalog
            .all()
            .into_iter()
            .map(|sat| SatelliteEntry {
                custom: custom.iter().any(|c| c.name == sat.name),
                name: sat.name,
                longitude: sat.longitude,
            })
            .collect();
        SatelliteListResponse { satellites }
    }
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "satellites",
    responses(
        (status = 200, description = "Current satellite working set", body = SatelliteListResponse)
    )
)]
pub async fn list_satellites(State(state): State<AppState>) -> Json<SatelliteListResponse> {
    let session = state.session.read().await;
    Json(SatelliteListResponse::from_catalog(&session.catalog))
}

#[utoipa::path(
    post,
    path = "/api/satellites",
    tag = "satellites",
    request_body = NewSatellite,
    responses(
        (status = 201, description = "Satellite added", body = Satellite),
        (status = 400, description = "Invalid name or longitude", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 403, description = "Insufficient permissions"),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn add_satellite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<NewSatellite>,
) -> ApiResult<impl IntoResponse> {
    require_permission(&user, Permission::EditSatellites)?;

    let satellite = Satellite::new(request.name, request.longitude)?;

    let mut session = state.session.write().await;
    let next = session.with_satellite(satellite.clone())?;
    state.store.save(&next.to_state())?;
    *session = next;
    drop(session);

    log::info!("{} added satellite {}", user.name, satellite.name);
    state.events.publish(AppEvent::satellite_added(satellite.clone()));

    Ok((StatusCode::CREATED, Json(satellite)))
}

#[utoipa::path(
    delete,
    path = "/api/satellites/{name}",
    tag = "satellites",
    params(("name" = String, Path, description = "Satellite name")),
    responses(
        (status = 200, description = "Satellite removed", body = Satellite),
        (status = 401, description = "Missing or invalid API key"),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "Satellite not found", body = ErrorResponse),
        (status = 409, description = "Built-in satellites cannot be removed", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn delete_satellite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(name): Path<String>,
) -> ApiResult<Json<Satellite>> {
    require_permission(&user, Permission::EditSatellites)?;

    let mut session = state.session.write().await;
    let (next, removed) = session.without_satellite(&name)?;
    state.store.save(&next.to_state())?;
    *session = next;
    drop(session);

    log::info!("{} removed satellite {}", user.name, removed.name);
    state
        .events
        .publish(AppEvent::satellite_removed(removed.name.clone()));

    Ok(Json(removed))
}
