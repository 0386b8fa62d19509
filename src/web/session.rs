use crate::angles::{GeoPoint, Satellite};
use crate::catalog::{Catalog, CatalogError, CatalogLoader};
use crate::storage::SessionState;

use super::config::{Config, ConfigError};

/// In-memory observer and satellite working set served by the API.
#[derive(Debug, Clone)]
pub struct Session {
    pub observer: GeoPoint,
    pub catalog: Catalog,
}

impl Session {
    /// Build the working set from configuration, then layer the stored state on top.
    pub fn restore(config: &Config, stored: SessionState) -> Result<Self, ConfigError> {
        let mut catalog = if config.catalog.include_builtin {
            Catalog::with_builtin()
        } else {
            Catalog::empty()
        };

        if !config.catalog.files.is_empty() {
            let mut loader = CatalogLoader::new(config.catalog.files.clone());
            let count = loader.load_all();
            log::info!("Loaded {} satellites from catalog files", count);
            catalog.extend_builtin(loader.into_satellites());
        }

        // Stored entries are untrusted input
        for raw in stored.custom_satellites {
            let sat = match Satellite::new(raw.name.clone(), raw.longitude) {
                Ok(sat) => sat,
                Err(e) => {
                    log::warn!("Dropping stored satellite {:?}: {}", raw.name, e);
                    continue;
                }
            };
            if let Err(e) = catalog.add_custom(sat) {
                log::warn!("Dropping stored satellite: {}", e);
            }
        }

        let restored = stored.observer.and_then(|raw| {
            GeoPoint::new(raw.latitude, raw.longitude)
                .map_err(|e| log::warn!("Ignoring stored observer: {}", e))
                .ok()
        });
        let observer = match restored {
            Some(observer) => observer,
            None => config.station.observer()?,
        };

        Ok(Session { observer, catalog })
    }

    pub fn to_state(&self) -> SessionState {
        SessionState {
            observer: Some(self.observer),
            custom_satellites: self.catalog.custom().to_vec(),
            saved_at: None,
        }
    }

    /// Copy of this session with one more custom satellite.
    pub fn with_satellite(&self, satellite: Satellite) -> Result<Session, CatalogError> {
        let mut next = self.clone();
        next.catalog.add_custom(satellite)?;
        Ok(next)
    }

    pub fn without_satellite(&self, name: &str) -> Result<(Session, Satellite), CatalogError> {
        let mut next = self.clone();
        let removed = next.catalog.remove_custom(name)?;
        Ok((next, removed))
    }
}
