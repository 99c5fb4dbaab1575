use std::{
    io::Write,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use bon::Builder;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use clap::Parser;
use reqwest::Url;
use signal_hook::{consts::TERM_SIGNALS, flag};
use tokio::time::sleep;

use crate::{
    api::webhook::{self, Alert},
    cli::{api::ApiArgs, limits::LimitArgs},
    core::{NotifyOn, PriceError, PriceLimits, PricePoint, PriceRepository},
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    /// Refresh on a fixed period instead of at the top of each hour.
    #[clap(long = "poll-interval", env = "POLL_INTERVAL")]
    poll_interval: Option<humantime::Duration>,

    /// Do not ring the terminal bell on alerts.
    #[clap(long, env = "MUTE")]
    mute: bool,

    /// POST a JSON alert to this URL when the price crosses a limit.
    #[clap(long = "alert-webhook-url", env = "ALERT_WEBHOOK_URL")]
    alert_webhook_url: Option<Url>,

    #[clap(flatten)]
    api: ApiArgs,

    #[clap(flatten)]
    limits: LimitArgs,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let should_terminate = Arc::new(AtomicBool::new(false));
        for signal in TERM_SIGNALS {
            // A second signal while the flag is already set terminates right away.
            flag::register_conditional_default(*signal, Arc::clone(&should_terminate))?;
            flag::register(*signal, Arc::clone(&should_terminate))?;
        }

        let limits = self.limits.price_limits()?;
        info!(lower = %limits.lower, upper = %limits.upper, "watching…");
        let notifier = Notifier::builder()
            .limits(limits)
            .notify_on(self.limits.notify_on)
            .bell(!self.mute)
            .webhook(webhook::Client::new(self.alert_webhook_url))
            .build();
        Watcher::builder()
            .repository(self.api.try_new_client()?)
            .notifier(notifier)
            .maybe_poll_interval(self.poll_interval.map(Into::into))
            .should_terminate(should_terminate)
            .build()
            .run()
            .await
    }
}

#[derive(Builder)]
struct Watcher<R> {
    repository: R,
    notifier: Notifier,
    poll_interval: Option<Duration>,
    should_terminate: Arc<AtomicBool>,
}

impl<R: PriceRepository> Watcher<R> {
    async fn run(self) -> Result {
        while !self.should_terminate.load(Ordering::Relaxed) {
            if let Err(error) = self.refresh(Utc::now()).await {
                // Keep polling: the source may recover by the next refresh.
                if error.is_not_found() {
                    warn!("the published prices are incomplete: {error:#}");
                } else if error.is_unavailable() {
                    warn!("the price source is unavailable: {error:#}");
                }
            }
            let pause = self.pause()?;
            info!(?pause, "sleeping…");
            sleep(pause).await;
        }
        Ok(())
    }

    #[instrument(skip_all)]
    async fn refresh(&self, now: DateTime<Utc>) -> Result<(), PriceError> {
        let (current, next) = self.repository.get_current_and_next_hour_prices(now).await?;
        info!(current = %current.price, next = %next.price);
        self.notifier.notify(&current).await;
        Ok(())
    }

    fn pause(&self) -> Result<Duration> {
        match self.poll_interval {
            Some(period) => Ok(period),
            None => {
                let now = Utc::now();
                Ok((next_top_of_hour(now)? - now).to_std()?)
            }
        }
    }
}

/// The next exact top of the hour after `now`.
fn next_top_of_hour(now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    Ok(now.duration_trunc(TimeDelta::hours(1))? + TimeDelta::hours(1))
}

#[derive(Builder)]
struct Notifier {
    limits: PriceLimits,
    notify_on: NotifyOn,
    bell: bool,
    webhook: webhook::Client,
}

impl Notifier {
    /// Evaluate the current price against the limits. Never fails the caller.
    async fn notify(&self, current: &PricePoint) {
        let Some(breach) = self.limits.breach(current.price) else {
            return;
        };
        if !self.notify_on.covers(breach) {
            return;
        }
        warn!("{}", breach.message(current.price, self.limits));
        if self.bell {
            print!("\x07");
            let _ = std::io::stdout().flush();
        }
        let alert = Alert {
            breach,
            price: current.price,
            limit: breach.limit(self.limits),
            starts_at: current.interval.start,
            ends_at: current.interval.end,
        };
        self.webhook.send(&alert).await;
    }
}
