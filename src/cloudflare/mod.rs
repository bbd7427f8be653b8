//! Cloudflare v4 DNS records client.

mod types;


pub use types::{DnsRecord, Ttl, UpdateOutcome, AUTOMATIC_TTL};

use crate::config::Credentials;
use crate::error::{DdnsError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use types::{ListResponse, UpdateRequest};

const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com";

/// Records fetched per listing request.
pub const DEFAULT_PER_PAGE: u32 = 3;

/// Client for one zone's DNS records.
pub struct CloudflareClient {
    client: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl CloudflareClient {
    /// Create a client against the public Cloudflare API.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL.to_string())
    }

    /// Create with custom base URL (for testing).
    pub fn with_base_url(credentials: Credentials, base_url: String) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", credentials.api_key()))
            .map_err(|_| DdnsError::Config("API key contains invalid characters".to_string()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn records_url(&self) -> String {
        format!(
            "{}/client/v4/zones/{}/dns_records",
            self.base_url,
            self.credentials.zone_id()
        )
    }

    /// List the zone's records, optionally filtered by type.
    ///
    /// Only records of `filter_type` are returned, whatever the server sends.
    /// Pages are requested until one reports `result_info.count` below
    /// `per_page`. A provider that pads its last page to exactly `per_page`
    /// costs one extra (empty) request.
    pub async fn list_records(
        &self,
        filter_type: Option<&str>,
        per_page: u32,
    ) -> Result<Vec<DnsRecord>> {
        if per_page == 0 {
            return Err(DdnsError::Config("page size must be at least 1".to_string()));
        }

        let url = self.records_url();
        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut query = vec![("page", page.to_string()), ("per_page", per_page.to_string())];
            if let Some(record_type) = filter_type {
                query.push(("type", record_type.to_string()));
            }

            tracing::debug!("GET {} page={} per_page={}", url, page, per_page);
            let response = self.client.get(&url).query(&query).send().await?;
            let status = response.status();
            let text = response.text().await?;

            if !status.is_success() {
                return Err(DdnsError::Provider(format!(
                    "listing page {} failed with HTTP {}: {}",
                    page, status, text
                )));
            }

            let body: ListResponse = serde_json::from_str(&text).map_err(|e| {
                DdnsError::Provider(format!("unexpected listing body on page {}: {}", page, e))
            })?;

            let count = body.result_info.count;
            for record in body.result {
                match filter_type {
                    Some(wanted) if record.record_type != wanted => {
                        tracing::warn!(
                            "Dropping {} record {} ({}) from {} listing",
                            record.record_type,
                            record.name,
                            record.id,
                            wanted
                        );
                    }
                    _ => records.push(record),
                }
            }

            if count < per_page {
                break;
            }
            page += 1;
        }

        tracing::debug!("Listed {} records over {} page(s)", records.len(), page);
        Ok(records)
    }

    /// Point every record at `content`, one request at a time.
    ///
    /// A failed request is recorded in its outcome and the loop moves on.
    pub async fn update_records(
        &self,
        records: &[DnsRecord],
        content: &str,
    ) -> Vec<UpdateOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            outcomes.push(self.update_record(record, content).await);
        }
        outcomes
    }

    async fn update_record(&self, record: &DnsRecord, content: &str) -> UpdateOutcome {
        let url = format!("{}/{}", self.records_url(), record.id);
        let request = UpdateRequest::for_record(record, content);

        tracing::debug!("PUT {} ({} -> {})", url, record.name, content);

        let mut outcome = UpdateOutcome {
            record_id: record.id.clone(),
            name: record.name.clone(),
            status: None,
            body: None,
            error: None,
            timestamp: chrono::Utc::now(),
        };

        match self.client.put(&url).json(&request).send().await {
            Ok(response) => {
                let status = response.status();
                outcome.status = Some(status.as_u16());
                match response.text().await {
                    Ok(text) => outcome.body = Some(text),
                    Err(e) => outcome.error = Some(e.to_string()),
                }
                if !status.is_success() {
                    tracing::warn!("Update of {} returned HTTP {}", record.name, status);
                }
            }
            Err(e) => {
                tracing::warn!("Update of {} failed: {}", record.name, e);
                outcome.error = Some(e.to_string());
            }
        }

        outcome
    }
}
