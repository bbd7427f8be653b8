//! # cf-ddns
//!
//! Keeps the A records of a Cloudflare zone pointed at the caller's current
//! public IP address. Meant to be run periodically (cron, systemd timer).
//!
//! ## Usage
//!
//! ```bash
//! # Credentials from a KEY=value file (API_KEY, ZONE)
//! cf-ddns --config ~/.config/cf-ddns.env
//!
//! # Override the zone for one run
//! cf-ddns -c cf.env -z 023e105f4ecef8ad9ca31a8372d0c353
//! ```

pub mod cloudflare;
pub mod config;
pub mod detector;
pub mod error;
pub mod sync;

pub use cloudflare::CloudflareClient;
pub use config::Credentials;
pub use detector::IpDetector;
pub use error::{DdnsError, Result};
pub use sync::{SyncReport, Updater};
