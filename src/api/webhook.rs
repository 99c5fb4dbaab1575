use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Serialize;

use crate::{core::Breach, prelude::*, quantity::rate::KilowattHourRate};

/// Optional alert delivery channel: a no-op without a URL.
pub struct Client {
    url: Option<Url>,
}

/// JSON body POSTed when the price crosses a limit.
#[derive(Serialize)]
pub struct Alert {
    pub breach: Breach,
    pub price: KilowattHourRate,
    pub limit: KilowattHourRate,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Client {
    pub const fn new(url: Option<Url>) -> Self {
        Self { url }
    }

    /// Delivery failures are logged and swallowed: alerting must not fail the
    /// refresh that raised it.
    pub async fn send(&self, alert: &Alert) {
        if let Some(url) = &self.url
            && let Err(error) = Self::send_fallible(url.clone(), alert).await
        {
            warn!("failed to deliver the alert: {error:#}");
        }
    }

    #[instrument(skip_all)]
    async fn send_fallible(url: Url, alert: &Alert) -> Result {
        info!("delivering the alert…");
        reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()?
            .post(url)
            .json(alert)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn alert_payload_ok() -> Result {
        let alert = Alert {
            breach: Breach::Below,
            price: KilowattHourRate::from(2.1),
            limit: KilowattHourRate::from(4.0),
            starts_at: Utc.with_ymd_and_hms(2024, 3, 25, 11, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2024, 3, 25, 12, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&alert)?;
        assert_eq!(value["breach"], "below");
        assert_eq!(value["price"], 2.1);
        assert_eq!(value["limit"], 4.0);
        assert_eq!(value["starts_at"], "2024-03-25T11:00:00Z");
        assert_eq!(value["ends_at"], "2024-03-25T12:00:00Z");
        Ok(())
    }
}
