use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::angles::{GeoPoint, Satellite};

const CHANNEL_CAPACITY: usize = 64;

/// Change notifications for whoever renders the working set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AppEvent {
    LocationChanged {
        observer: GeoPoint,
        at: DateTime<Utc>,
    },
    SatelliteAdded {
        satellite: Satellite,
        at: DateTime<Utc>,
    },
    SatelliteRemoved {
        name: String,
        at: DateTime<Utc>,
    },
}

impl AppEvent {
    pub fn location_changed(observer: GeoPoint) -> Self {
        AppEvent::LocationChanged {
            observer,
            at: Utc::now(),
        }
    }

    pub fn satellite_added(satellite: Satellite) -> Self {
        AppEvent::SatelliteAdded {
            satellite,
            at: Utc::now(),
        }
    }

    pub fn satellite_removed(name: impl Into<String>) -> Self {
        AppEvent::SatelliteRemoved {
            name: name.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Returns how many subscribers received the event. Zero is not an error.
    pub fn publish(&self, event: AppEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }
}

pub fn spawn_event_logger(bus: &EventBus) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(AppEvent::LocationChanged { observer, .. }) => log::info!(
                    "Observer moved to {:.4}, {:.4}",
                    observer.latitude,
                    observer.longitude
                ),
                Ok(AppEvent::SatelliteAdded { satellite, .. }) => log::info!(
                    "Satellite {} added at {:.2}",
                    satellite.name,
                    satellite.longitude
                ),
                Ok(AppEvent::SatelliteRemoved { name, .. }) => {
                    log::info!("Satellite {} removed", name)
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Event logger lagged, {} events skipped", skipped)
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
