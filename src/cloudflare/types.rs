//! Cloudflare v4 wire types.

use serde::{Deserialize, Serialize};

/// TTL sent with every update; Cloudflare reads 1 as "automatic".
pub const AUTOMATIC_TTL: &str = "1";

/// A DNS record as listed by Cloudflare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub proxied: bool,
    #[serde(default)]
    pub ttl: Option<Ttl>,
}

/// Record TTL: seconds, or Cloudflare's automatic sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Ttl {
    Seconds(u32),
    Text(String),
}

/// One page of `GET /zones/{zone}/dns_records`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    pub result: Vec<DnsRecord>,
    pub result_info: ResultInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultInfo {
    pub count: u32,
}

/// Body of `PUT /zones/{zone}/dns_records/{id}`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateRequest<'a> {
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: &'static str,
    pub proxied: bool,
}

impl<'a> UpdateRequest<'a> {
    pub fn for_record(record: &'a DnsRecord, content: &'a str) -> Self {
        Self {
            record_type: &record.record_type,
            name: &record.name,
            content,
            ttl: AUTOMATIC_TTL,
            proxied: record.proxied,
        }
    }
}

/// What happened to one record during the update pass.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub record_id: String,
    pub name: String,
    /// HTTP status, if a response arrived.
    pub status: Option<u16>,
    /// Response body as returned by Cloudflare.
    pub body: Option<String>,
    /// Transport failure, if the request never completed.
    pub error: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.status.is_some_and(|s| (200..300).contains(&s))
    }
}
