use askama::Template;
use askama_web::WebTemplate;

use crate::angles::SatellitePointing;

pub const PLOT_RADIUS_PX: f64 = 200.0;
pub const PLOT_CENTER_PX: f64 = 220.0;

/// One satellite on the SVG polar plot, pre-formatted for the template.
pub struct PlotMarker {
    pub name: String,
    pub cx: String,
    pub cy: String,
    pub elevation: String,
    pub azimuth: String,
    pub coverage: String,
    pub visible: bool,
}

impl PlotMarker {
    pub fn from_pointing(pointing: &SatellitePointing) -> Self {
        let p = &pointing.point;
        PlotMarker {
            name: p.satellite.name.clone(),
            cx: format!("{:.1}", PLOT_CENTER_PX + p.polar_x * PLOT_RADIUS_PX),
            cy: format!("{:.1}", PLOT_CENTER_PX + p.polar_y * PLOT_RADIUS_PX),
            elevation: format!("{:.2}", p.elevation),
            azimuth: format!("{:.2}", p.azimuth),
            coverage: format!("{:.0}", pointing.coverage_radius_km),
            visible: p.is_visible,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub station_name: String,
    pub latitude: String,
    pub longitude: String,
    pub markers: Vec<PlotMarker>,
    pub visible_count: usize,
}
