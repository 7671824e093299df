use std::sync::Arc;

use log::{debug, error, info};
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinSet;

use crate::dedup::RecentVins;
use crate::inventory::{InventoryClient, ReportError};
use crate::location::LocationProvider;
use crate::normalize;
use crate::types::Vin;

/// Pipeline consumer: normalizes each frame's text, validates and dedups the
/// candidate, then spawns an independent submission so the next frame is
/// never held up by the location read or the network call. When the frame
/// channel closes, in-flight submissions are drained before returning.
pub async fn run(
    mut rx: Receiver<String>,
    client: InventoryClient,
    location: Arc<dyn LocationProvider>,
    mut recent: RecentVins,
) {
    let mut in_flight = JoinSet::new();
    while let Some(raw) = rx.recv().await {
        // Reap whatever finished, without waiting on the rest.
        while in_flight.try_join_next().is_some() {}

        let vin = match normalize::extract_vin(&raw) {
            Ok(vin) => vin,
            Err(e) => {
                debug!("Skipping frame text {:?}: {}", raw, e);
                continue;
            }
        };
        if !recent.mark(vin.as_str()) {
            debug!("Recently submitted {}; suppressing", vin);
            continue;
        }
        info!("Spotted VIN {}", vin);

        let client = client.clone();
        let location = Arc::clone(&location);
        in_flight.spawn(async move {
            match submit_spotting(&client, location.as_ref(), &vin).await {
                Ok(message) => info!("Updated inventory for {}: {}", vin, message),
                Err(ReportError::LocationUnavailable) => {
                    error!("No location fix; dropping spotted VIN {}", vin)
                }
                Err(e) => error!("Failed to update inventory for {}: {}", vin, e),
            }
        });
    }
    while in_flight.join_next().await.is_some() {}
}

/// Reads the freshest fix and performs the update. Without a fix the
/// attempt is reported as a distinct failure and no request is issued.
async fn submit_spotting(
    client: &InventoryClient,
    location: &dyn LocationProvider,
    vin: &Vin,
) -> Result<String, ReportError> {
    let Some(fix) = location.last_known().await else {
        return Err(ReportError::LocationUnavailable);
    };
    client.submit_with_retry(vin, fix).await
}
