use chrono::{Days, Local, NaiveDate, Utc};
use clap::Parser;

use crate::{
    cli::{api::ApiArgs, limits::LimitArgs},
    core::PriceRepository,
    prelude::*,
    tables::build_price_table,
};

#[derive(Parser)]
pub struct PricesArgs {
    /// Restrict the view to a single day.
    #[clap(long, env = "DAY")]
    day: Option<Day>,

    #[clap(flatten)]
    api: ApiArgs,

    #[clap(flatten)]
    limits: LimitArgs,
}

#[derive(Copy, Clone, Eq, PartialEq, clap::ValueEnum)]
enum Day {
    Today,
    Tomorrow,
}

impl Day {
    fn date(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::Tomorrow => today.checked_add_days(Days::new(1)).unwrap(),
        }
    }
}

impl PricesArgs {
    pub async fn run(self) -> Result {
        let limits = self.limits.price_limits()?;
        let repository = self.api.try_new_client()?;
        let today = Local::now().date_naive();
        let mut points = repository
            .get_daily_prices(today, &Local)
            .await
            .context("failed to fetch the daily prices")?;
        if let Some(day) = self.day {
            let date = day.date(today);
            points.retain(|point| point.interval.start.with_timezone(&Local).date_naive() == date);
        }
        if points.is_empty() {
            match self.day {
                Some(Day::Tomorrow) => println!("Tomorrow's prices are not published yet."),
                _ => println!("No prices have been published yet."),
            }
            return Ok(());
        }
        println!("{}", build_price_table(&points, limits, Utc::now()));
        Ok(())
    }
}
