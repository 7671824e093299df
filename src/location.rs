use std::env;

use async_trait::async_trait;
use log::warn;

use crate::types::Coordinate;

/// Best-effort source of the device's current position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn last_known(&self) -> Option<Coordinate>;
}

/// Fixed position read from `LATITUDE`/`LONGITUDE`, standing in for a GPS
/// receiver when running headless. Reports no fix when either is unset or
/// unparseable.
pub struct FixedLocation {
    coordinate: Option<Coordinate>,
}

impl FixedLocation {
    pub fn from_env() -> Self {
        let coordinate = match (read_degrees("LATITUDE"), read_degrees("LONGITUDE")) {
            (Some(latitude), Some(longitude)) => Some(Coordinate {
                latitude,
                longitude,
            }),
            _ => {
                warn!("LATITUDE/LONGITUDE not configured; spotted VINs will be dropped");
                None
            }
        };
        FixedLocation { coordinate }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn last_known(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

fn read_degrees(name: &str) -> Option<f64> {
    let value = env::var(name).ok()?;
    match value.parse() {
        Ok(degrees) => Some(degrees),
        Err(_) => {
            warn!("Ignoring unparseable {} value {:?}", name, value);
            None
        }
    }
}
