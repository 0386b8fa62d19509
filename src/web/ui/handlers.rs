use axum::{extract::State, response::IntoResponse};

use crate::web::auth::AppState;

use super::templates::{DashboardTemplate, PlotMarker};

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    let observer = session.observer;
    let satellites = session.catalog.all();
    drop(session);

    let markers: Vec<PlotMarker> = state
        .engine
        .pointing_report(&observer, &satellites)
        .iter()
        .map(PlotMarker::from_pointing)
        .collect();

    DashboardTemplate {
        station_name: state
            .config
            .station
            .name
            .clone()
            .unwrap_or_else(|| "Observer".to_string()),
        latitude: format!("{:.4}", observer.latitude),
        longitude: format!("{:.4}", observer.longitude),
        visible_count: markers.iter().filter(|m| m.visible).count(),
        markers,
    }
}
