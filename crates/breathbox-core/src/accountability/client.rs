//! HTTP client for the accountability API.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

use super::{DayPeriod, Ledger, Person};

#[derive(Serialize)]
struct CompleteRequest {
    #[serde(rename = "timePeriod")]
    time_period: DayPeriod,
    #[serde(rename = "localHour")]
    local_hour: u32,
}

/// Server acknowledgement of a recorded completion.
#[derive(Debug, Deserialize)]
pub struct CompleteResponse {
    pub success: bool,
    #[serde(rename = "timePeriod")]
    pub time_period: DayPeriod,
    #[serde(rename = "localHour")]
    pub local_hour: u32,
    /// The updated completion table.
    pub data: Ledger,
}

/// Client for a running breathbox server.
#[derive(Debug, Clone)]
pub struct AccountabilityClient {
    base_url: String,
    http: reqwest::Client,
}

impl AccountabilityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Record a completion, bucketing by the caller's local hour.
    pub async fn record_completion(&self, person: Person, local_hour: u32) -> Result<CompleteResponse> {
        let time_period = DayPeriod::from_hour(local_hour);
        let url = format!("{}/api/complete/{person}", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&CompleteRequest {
                time_period,
                local_hour,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Fetch the current completion table.
    pub async fn stats(&self) -> Result<Ledger> {
        let url = format!("{}/api/stats", self.base_url);
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Clear both records for a new day.
    pub async fn reset_daily(&self) -> Result<()> {
        let url = format!("{}/api/reset-daily", self.base_url);
        self.http.post(url).send().await?.error_for_status()?;
        Ok(())
    }

    /// Fire-and-forget completion notification, as issued after a session
    /// finishes. Failures are logged and dropped; nothing in the session
    /// flow waits on this.
    pub fn notify_completion(&self, person: Person, local_hour: u32) {
        let client = self.clone();
        tokio::spawn(async move {
            match client.record_completion(person, local_hour).await {
                Ok(ack) => info!("completion recorded for {person} during {}", ack.time_period),
                Err(e) => warn!("failed to record completion for {person}: {e}"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = AccountabilityClient::new("http://localhost:3000///");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn request_body_uses_wire_field_names() {
        let body = serde_json::to_value(CompleteRequest {
            time_period: DayPeriod::Midday,
            local_hour: 12,
        })
        .unwrap();
        assert_eq!(body["timePeriod"], "midday");
        assert_eq!(body["localHour"], 12);
    }
}
