use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure modes of a price repository.
#[derive(Debug, Error)]
pub enum PriceError {
    /// The source cannot be called or refused the request.
    #[error("the price source is unreachable")]
    Unreachable(#[from] reqwest::Error),

    /// The source answered with a payload that does not parse.
    #[error("the price source returned a malformed payload")]
    Malformed(#[from] serde_json::Error),

    /// No published price covers the given instant.
    #[error("no published price covers {0}")]
    NotFound(DateTime<Utc>),
}

impl PriceError {
    /// The data source itself is unavailable: unreachable or malformed.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Malformed(_))
    }

    /// An expected price point is absent from otherwise valid data.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
