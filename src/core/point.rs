use crate::{ops::Interval, quantity::rate::KilowattHourRate};

/// Single spot price and the hour-long interval it covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Constructor)]
pub struct PricePoint {
    pub interval: Interval,
    pub price: KilowattHourRate,
}
