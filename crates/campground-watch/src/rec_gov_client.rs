use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::executor::AvailabilitySource;
use crate::watch_types::WatchError;

/// Client for the Recreation.gov internal availability API.
pub struct RecGovClient {
    client: Client,
    base_url: String,
}

/// Response structure from the recreation.gov monthly availability API.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthAvailabilityResponse {
    /// Campsites in the campground, keyed by campsite id.
    pub campsites: HashMap<String, CampsiteMonth>,
}

/// One campsite's slice of a monthly availability payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CampsiteMonth {
    /// Recreation.gov campsite id.
    pub campsite_id: String,

    /// Map from date string (e.g. `2025-08-09T00:00:00Z`) to availability status.
    pub availabilities: HashMap<String, String>,
}

impl RecGovClient {
    /// Create a new recreation.gov API client.
    pub fn new() -> Result<Self, WatchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WatchError::ApiError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: "https://www.recreation.gov/api".to_string(),
        })
    }

    /// Fetch the monthly availability payload for one campground.
    ///
    /// Issues a single GET with the month start as an ISO-8601 timestamp,
    /// matching what the recreation.gov web client sends.
    pub async fn fetch_month(
        &self,
        campground_id: u32,
        year: i32,
        month: u32,
    ) -> Result<MonthAvailabilityResponse, WatchError> {
        let url = format!(
            "{}/camps/availability/campground/{}/month",
            self.base_url, campground_id
        );

        let month_start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| WatchError::DataFormat(format!("Invalid month: {}-{:02}", year, month)))?;
        let start_date = format!("{}T00:00:00.000Z", month_start.format("%Y-%m-%d"));

        debug!("Making request to: {}?start_date={}", url, start_date);

        let response = self
            .client
            .get(&url)
            .query(&[("start_date", start_date.as_str())])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| WatchError::Network(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("API request failed with status {}", status);
            return Err(WatchError::ApiError(format!("HTTP {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| WatchError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl AvailabilitySource for RecGovClient {
    async fn fetch_month(
        &self,
        campground_id: u32,
        year: i32,
        month: u32,
    ) -> Result<MonthAvailabilityResponse, WatchError> {
        RecGovClient::fetch_month(self, campground_id, year, month).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_invalid_month_before_sending() {
        let client = RecGovClient::new().unwrap();

        let result = client.fetch_month(232447, 2025, 13).await;

        assert!(matches!(result, Err(WatchError::DataFormat(_))));
    }

    #[test]
    fn decodes_monthly_payload() {
        let body = r#"{
            "campsites": {
                "101": {
                    "campsite_id": "101",
                    "campsite_type": "STANDARD NONELECTRIC",
                    "availabilities": {
                        "2025-08-09T00:00:00Z": "Available",
                        "2025-08-10T00:00:00Z": "Reserved"
                    }
                }
            }
        }"#;

        let payload: MonthAvailabilityResponse = serde_json::from_str(body).unwrap();
        let site = &payload.campsites["101"];
        assert_eq!(site.campsite_id, "101");
        assert_eq!(site.availabilities["2025-08-09T00:00:00Z"], "Available");
    }
}
