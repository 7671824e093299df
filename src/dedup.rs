use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Remembers which VINs were submitted recently. The camera analyzer reads
/// the same physical VIN on many consecutive frames; without this window each
/// read would turn into another inventory update.
pub struct RecentVins {
    cooldown: Duration,
    seen: HashMap<String, Instant>,
}

impl RecentVins {
    pub fn new(cooldown: Duration) -> Self {
        RecentVins {
            cooldown,
            seen: HashMap::new(),
        }
    }

    /// Records a sighting. Returns false when the VIN was already submitted
    /// within the cooldown window; entries older than the window are pruned.
    pub fn mark(&mut self, vin: &str) -> bool {
        let now = Instant::now();
        self.seen
            .retain(|_, submitted| now.duration_since(*submitted) < self.cooldown);
        if self.seen.contains_key(vin) {
            return false;
        }
        self.seen.insert(vin.to_string(), now);
        true
    }
}
