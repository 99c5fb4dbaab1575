mod api;
mod limits;
mod now;
mod prices;
mod watch;

use clap::{Parser, Subcommand};

use crate::cli::{now::NowArgs, prices::PricesArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: poll the spot prices and alert on limit breaches.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// One-shot refresh: print the current and next-hour prices.
    #[clap(name = "now")]
    Now(Box<NowArgs>),

    /// Print the published prices for today and tomorrow.
    #[clap(name = "prices")]
    Prices(Box<PricesArgs>),
}
