use crate::quantity::rate::KilowattHourRate;

/// User-configured price thresholds, both bounds inclusive.
///
/// Invariant: `lower <= upper`.
#[derive(Copy, Clone, Debug)]
#[must_use]
pub struct PriceLimits {
    pub lower: KilowattHourRate,
    pub upper: KilowattHourRate,
}

impl PriceLimits {
    /// Test the price against the limits.
    ///
    /// A price sitting exactly on either bound is within the limits.
    #[must_use]
    pub fn breach(self, price: KilowattHourRate) -> Option<Breach> {
        if price < self.lower {
            Some(Breach::Below)
        } else if price > self.upper {
            Some(Breach::Above)
        } else {
            None
        }
    }
}

/// Direction in which a price escaped the limits.
#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breach {
    Below,
    Above,
}

impl Breach {
    /// The limit that was crossed.
    #[must_use]
    pub const fn limit(self, limits: PriceLimits) -> KilowattHourRate {
        match self {
            Self::Below => limits.lower,
            Self::Above => limits.upper,
        }
    }

    /// Alert line for the crossed limit.
    #[must_use]
    pub fn message(self, price: KilowattHourRate, limits: PriceLimits) -> String {
        match self {
            Self::Below => {
                format!("current price ({price}) is lower than the set lower limit ({})", limits.lower)
            }
            Self::Above => {
                format!("current price ({price}) is higher than the set upper limit ({})", limits.upper)
            }
        }
    }
}

/// Breach directions that should raise a notification.
#[derive(Copy, Clone, Eq, PartialEq, clap::ValueEnum)]
pub enum NotifyOn {
    /// Prices below the lower limit.
    Lower,

    /// Prices above the upper limit.
    Higher,

    /// Either direction.
    Both,
}

impl NotifyOn {
    #[must_use]
    pub const fn covers(self, breach: Breach) -> bool {
        matches!(
            (self, breach),
            (Self::Lower | Self::Both, Breach::Below) | (Self::Higher | Self::Both, Breach::Above)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> PriceLimits {
        PriceLimits {
            lower: KilowattHourRate::from(10.0),
            upper: KilowattHourRate::from(20.0),
        }
    }

    #[test]
    fn bounds_are_inclusive_ok() {
        for price in [10.0, 15.0, 20.0] {
            assert_eq!(limits().breach(KilowattHourRate::from(price)), None);
        }
    }

    #[test]
    fn breaches_are_strict_ok() {
        assert_eq!(limits().breach(KilowattHourRate::from(9.99)), Some(Breach::Below));
        assert_eq!(limits().breach(KilowattHourRate::from(20.01)), Some(Breach::Above));
    }

    #[test]
    fn equal_bounds_ok() {
        let limits = PriceLimits {
            lower: KilowattHourRate::from(10.0),
            upper: KilowattHourRate::from(10.0),
        };
        assert_eq!(limits.breach(KilowattHourRate::from(10.0)), None);
        assert_eq!(limits.breach(KilowattHourRate::from(10.01)), Some(Breach::Above));
    }

    #[test]
    fn covers_gates_directions_ok() {
        assert!(NotifyOn::Lower.covers(Breach::Below));
        assert!(!NotifyOn::Lower.covers(Breach::Above));
        assert!(NotifyOn::Higher.covers(Breach::Above));
        assert!(!NotifyOn::Higher.covers(Breach::Below));
        assert!(NotifyOn::Both.covers(Breach::Below));
        assert!(NotifyOn::Both.covers(Breach::Above));
    }

    #[test]
    fn crossed_limit_ok() {
        assert_eq!(Breach::Below.limit(limits()), KilowattHourRate::from(10.0));
        assert_eq!(Breach::Above.limit(limits()), KilowattHourRate::from(20.0));
    }
}
