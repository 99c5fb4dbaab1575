use chrono::Utc;
use clap::Parser;

use crate::{
    cli::{api::ApiArgs, limits::LimitArgs},
    core::PriceRepository,
    prelude::*,
    tables::build_hour_prices_table,
};

#[derive(Parser)]
pub struct NowArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[clap(flatten)]
    limits: LimitArgs,
}

impl NowArgs {
    pub async fn run(self) -> Result {
        let limits = self.limits.price_limits()?;
        let repository = self.api.try_new_client()?;
        let (current, next) = repository
            .get_current_and_next_hour_prices(Utc::now())
            .await
            .context("failed to fetch the current and next-hour prices")?;
        println!("{}", build_hour_prices_table(current, next, limits));
        if let Some(breach) = limits.breach(current.price)
            && self.limits.notify_on.covers(breach)
        {
            warn!("{}", breach.message(current.price, limits));
        }
        Ok(())
    }
}
