use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;

/// Feeds recognized frame text into the pipeline, one stdin line per
/// analyzed frame. The OCR engine lives outside this process; whatever it
/// recognized for a frame arrives here as a single raw line.
pub async fn run(tx: Sender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).await.is_err() {
                    error!("Frame pipeline closed; stopping frame reader");
                    break;
                }
            }
            Ok(None) => {
                info!("Frame input ended");
                break;
            }
            Err(e) => {
                error!("Error reading frame text: {}", e);
                break;
            }
        }
    }
}
