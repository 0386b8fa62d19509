use axum::{extract::State, Json};

use crate::angles::GeoPoint;
use crate::events::AppEvent;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::auth::{require_permission, AppState, AuthenticatedUser};
use crate::web::config::Permission;

#[utoipa::path(
    get,
    path = "/api/location",
    tag = "location",
    responses(
        (status = 200, description = "Current observer", body = GeoPoint)
    )
)]
pub async fn get_location(State(state): State<AppState>) -> Json<GeoPoint> {
    Json(state.session.read().await.observer)
}

#[utoipa::path(
    put,
    path = "/api/location",
    tag = "location",
    request_body = GeoPoint,
    responses(
        (status = 200, description = "Observer updated", body = GeoPoint),
        (status = 400, description = "Coordinates out of range", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 403, description = "Insufficient permissions")
    ),
    security(("api_key" = []))
)]
pub async fn set_location(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<GeoPoint>,
) -> ApiResult<Json<GeoPoint>> {
    require_permission(&user, Permission::EditLocation)?;

    let observer = GeoPoint::new(request.latitude, request.longitude)?;

    let mut session = state.session.write().await;
    let mut next = session.clone();
    next.observer = observer;
    state.store.save(&next.to_state())?;
    *session = next;
    drop(session);

    state.events.publish(AppEvent::location_changed(observer));
    Ok(Json(observer))
}
