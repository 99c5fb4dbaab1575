//! [Pörssisähkö](https://porssisahko.net) API client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use reqwest::Url;
use serde::Deserialize;

use crate::{
    core::{PriceError, PricePoint, PriceRepository},
    ops::Interval,
    prelude::*,
    quantity::rate::KilowattHourRate,
};

pub struct Api {
    client: reqwest::Client,
    base_url: Url,
}

impl Api {
    #[instrument(skip_all, fields(base_url = %base_url))]
    pub fn new(base_url: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build the price source client")?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl PriceRepository for Api {
    /// Fetch all published prices, covering today and possibly tomorrow.
    #[instrument(skip_all)]
    async fn get_latest_prices(&self) -> Result<Vec<PricePoint>, PriceError> {
        info!("fetching…");
        let body = self
            .client
            .get(format!("{}/latest-prices.json", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let points = parse_latest_prices(&body)?;
        info!(n_points = points.len(), "fetched");
        Ok(points)
    }
}

/// Parse the `latest-prices.json` payload into points sorted ascending by
/// interval start, with duplicate starts dropped. The API reports newest first.
fn parse_latest_prices(body: &str) -> Result<Vec<PricePoint>, PriceError> {
    let response: LatestPricesResponse = serde_json::from_str(body)?;
    Ok(response
        .prices
        .into_iter()
        .map(|price| PricePoint::new(Interval::new(price.start_date, price.end_date), price.price))
        .sorted_by_key(|point| point.interval.start)
        .dedup_by(|lhs, rhs| lhs.interval.start == rhs.interval.start)
        .collect())
}

#[derive(Deserialize)]
struct LatestPricesResponse {
    prices: Vec<LatestPrice>,
}

/// Hour-long price period in snt/kWh.
#[derive(Deserialize)]
struct LatestPrice {
    price: KilowattHourRate,

    #[serde(rename = "startDate")]
    start_date: DateTime<Utc>,

    #[serde(rename = "endDate")]
    end_date: DateTime<Utc>,
}
