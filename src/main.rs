mod dedup;
mod frames;
mod inventory;
mod location;
mod normalize;
mod scan;
mod types;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use env_logger::Env;
use log::{error, info, warn};
use tokio::sync::mpsc::channel;

use crate::dedup::RecentVins;
use crate::inventory::InventoryClient;
use crate::location::FixedLocation;

const DEFAULT_INVENTORY_URL: &str = "https://optimumdrag.com/test2024/";
const DEFAULT_COOLDOWN_SECS: u64 = 60;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting vin-handler");

    let base_url =
        env::var("INVENTORY_URL").unwrap_or_else(|_| DEFAULT_INVENTORY_URL.to_string());
    let client = match InventoryClient::new(&base_url) {
        Ok(client) => client,
        Err(e) => {
            error!("Invalid inventory base URL {:?}: {}", base_url, e);
            return;
        }
    };
    let location = Arc::new(FixedLocation::from_env());
    let recent = RecentVins::new(Duration::from_secs(cooldown_secs()));

    let (tx, rx) = channel(8);
    let frames_task = tokio::spawn(frames::run(tx));
    let scan_task = tokio::spawn(scan::run(rx, client, location, recent));
    if let Err(e) = frames_task.await {
        error!("Frame reader task failed: {}", e);
    }
    // The frame channel is closed now; the pipeline drains and exits.
    if let Err(e) = scan_task.await {
        error!("Scan task failed: {}", e);
    }
    info!("Exiting main");
}

fn cooldown_secs() -> u64 {
    match env::var("VIN_COOLDOWN_SECS") {
        Ok(value) => match value.parse() {
            Ok(secs) => secs,
            Err(_) => {
                warn!(
                    "Ignoring unparseable VIN_COOLDOWN_SECS value {:?}; using {}",
                    value, DEFAULT_COOLDOWN_SECS
                );
                DEFAULT_COOLDOWN_SECS
            }
        },
        Err(_) => DEFAULT_COOLDOWN_SECS,
    }
}
