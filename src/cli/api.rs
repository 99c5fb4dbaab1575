use clap::Parser;
use reqwest::Url;

use crate::{api::porssisahko, prelude::*};

#[derive(Parser)]
pub struct ApiArgs {
    /// Pörssisähkö API base URL.
    #[clap(
        long = "api-base-url",
        env = "API_BASE_URL",
        default_value = "https://api.porssisahko.net/v1"
    )]
    base_url: Url,
}

impl ApiArgs {
    pub fn try_new_client(&self) -> Result<porssisahko::Api> {
        porssisahko::Api::new(self.base_url.clone())
    }
}
