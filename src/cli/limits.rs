use clap::Parser;

use crate::{
    core::{NotifyOn, PriceLimits},
    prelude::*,
    quantity::rate::KilowattHourRate,
};

#[derive(Copy, Clone, Parser)]
pub struct LimitArgs {
    /// Lower price limit in snt/kWh.
    #[clap(long = "lower-limit", env = "LOWER_LIMIT", default_value = "0.0")]
    pub lower_limit: KilowattHourRate,

    /// Upper price limit in snt/kWh.
    #[clap(long = "upper-limit", env = "UPPER_LIMIT", default_value = "10.0")]
    pub upper_limit: KilowattHourRate,

    /// Price breaches that should raise a notification.
    #[clap(long = "notify-on", env = "NOTIFY_ON", default_value = "lower")]
    pub notify_on: NotifyOn,
}

impl LimitArgs {
    pub fn price_limits(self) -> Result<PriceLimits> {
        ensure!(
            self.lower_limit <= self.upper_limit,
            "the lower limit ({}) must not exceed the upper limit ({})",
            self.lower_limit,
            self.upper_limit,
        );
        Ok(PriceLimits {
            lower: self.lower_limit,
            upper: self.upper_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_limits_ok() -> Result {
        let args = LimitArgs {
            lower_limit: KilowattHourRate::from(0.0),
            upper_limit: KilowattHourRate::from(10.0),
            notify_on: NotifyOn::Lower,
        };
        let limits = args.price_limits()?;
        assert_eq!(limits.lower, KilowattHourRate::from(0.0));
        assert_eq!(limits.upper, KilowattHourRate::from(10.0));
        Ok(())
    }

    #[test]
    fn inverted_limits_fail() {
        let args = LimitArgs {
            lower_limit: KilowattHourRate::from(10.0),
            upper_limit: KilowattHourRate::from(0.0),
            notify_on: NotifyOn::Lower,
        };
        assert!(args.price_limits().is_err());
    }
}
