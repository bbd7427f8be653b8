//! One synchronization pass: list A records, detect the IP, update.

use crate::cloudflare::{CloudflareClient, UpdateOutcome, DEFAULT_PER_PAGE};
use crate::detector::IpDetector;
use crate::error::Result;

/// Record type kept in sync.
pub const RECORD_TYPE: &str = "A";

/// Result of a completed pass.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// IP the records were pointed at.
    pub ip: String,
    /// One entry per listed record, in listing order.
    pub outcomes: Vec<UpdateOutcome>,
}

impl SyncReport {
    pub fn updated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.updated()
    }
}

/// Drives the client and detector through a single pass.
pub struct Updater {
    client: CloudflareClient,
    detector: IpDetector,
}

impl Updater {
    pub fn new(client: CloudflareClient, detector: IpDetector) -> Self {
        Self { client, detector }
    }

    /// Listing and detection failures abort the pass. Update failures are
    /// reported in the returned outcomes.
    pub async fn run(&self) -> Result<SyncReport> {
        let zone = self.client.credentials().zone_id();

        let records = self
            .client
            .list_records(Some(RECORD_TYPE), DEFAULT_PER_PAGE)
            .await?;
        tracing::info!("Found {} {} record(s) in zone {}", records.len(), RECORD_TYPE, zone);

        let ip = self.detector.detect().await?;
        tracing::info!("Current public IP: {}", ip);

        let outcomes = self.client.update_records(&records, &ip).await;
        let report = SyncReport { ip, outcomes };

        tracing::info!(
            "Update pass finished: {} updated, {} failed",
            report.updated(),
            report.failed()
        );
        Ok(report)
    }
}
