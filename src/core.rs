mod error;
mod limits;
mod point;
mod repository;

pub use self::{
    error::PriceError,
    limits::{Breach, NotifyOn, PriceLimits},
    point::PricePoint,
    repository::PriceRepository,
};
