use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

use crate::{
    core::{error::PriceError, point::PricePoint},
    prelude::*,
};

/// Access to the published spot prices, hiding the data source from callers.
///
/// [`PriceRepository::get_latest_prices`] is the single required operation,
/// the derived operations are default methods layered on top of it.
#[async_trait]
pub trait PriceRepository: Sync {
    /// Fetch all currently known price points, ascending by interval start.
    ///
    /// An empty vector is a valid result when nothing is published yet.
    async fn get_latest_prices(&self) -> Result<Vec<PricePoint>, PriceError>;

    /// The price point covering `at`, and the point starting where it ends.
    #[instrument(skip_all, fields(at = ?at))]
    async fn get_current_and_next_hour_prices(
        &self,
        at: DateTime<Utc>,
    ) -> Result<(PricePoint, PricePoint), PriceError> {
        current_and_next(&self.get_latest_prices().await?, at)
    }

    /// The fetched points restricted to those starting on `today` or the
    /// following calendar day in the given time zone.
    #[instrument(skip_all, fields(today = ?today))]
    async fn get_daily_prices<Tz>(
        &self,
        today: NaiveDate,
        time_zone: &Tz,
    ) -> Result<Vec<PricePoint>, PriceError>
    where
        Tz: TimeZone + Sync,
    {
        Ok(on_days(self.get_latest_prices().await?, today, time_zone))
    }
}

/// Select the point whose interval contains `at`, and the point starting
/// exactly at the first one's end.
pub fn current_and_next(
    points: &[PricePoint],
    at: DateTime<Utc>,
) -> Result<(PricePoint, PricePoint), PriceError> {
    let current = points
        .iter()
        .find(|point| point.interval.contains(at))
        .copied()
        .ok_or(PriceError::NotFound(at))?;
    let next = points
        .iter()
        .find(|point| point.interval.start == current.interval.end)
        .copied()
        .ok_or(PriceError::NotFound(current.interval.end))?;
    Ok((current, next))
}

/// Restrict the points to those starting on `today` or the following calendar
/// day in the given time zone.
#[must_use]
pub fn on_days<Tz: TimeZone>(
    mut points: Vec<PricePoint>,
    today: NaiveDate,
    time_zone: &Tz,
) -> Vec<PricePoint> {
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
    points.retain(|point| {
        let date = point.interval.start.with_timezone(time_zone).date_naive();
        (date == today) || (date == tomorrow)
    });
    points
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::{ops::Interval, quantity::rate::KilowattHourRate};

    struct FixedPrices(Vec<PricePoint>);

    #[async_trait]
    impl PriceRepository for FixedPrices {
        async fn get_latest_prices(&self) -> Result<Vec<PricePoint>, PriceError> {
            Ok(self.0.clone())
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn span(start: DateTime<Utc>) -> Interval {
        Interval::new(start, start + TimeDelta::hours(1))
    }

    fn point(start_hour: u32, price: f64) -> PricePoint {
        PricePoint::new(span(at(25, start_hour)), price.into())
    }

    #[test]
    fn current_and_next_ok() -> Result {
        let points = [point(10, 5.2), point(11, 6.1), point(12, 4.8)];
        let (current, next) = current_and_next(&points, at(25, 11))?;
        assert_eq!(current, points[1]);
        assert_eq!(next, points[2]);
        assert_eq!(next.interval.start - current.interval.start, TimeDelta::hours(1));
        assert_eq!(current.interval.end, next.interval.start);
        Ok(())
    }

    #[test]
    fn current_and_next_between_hours_ok() -> Result {
        let points = [point(10, 5.2), point(11, 6.1), point(12, 4.8)];
        let half_past = Utc.with_ymd_and_hms(2024, 3, 25, 11, 30, 0).unwrap();
        let (current, next) = current_and_next(&points, half_past)?;
        assert_eq!(current, points[1]);
        assert_eq!(next, points[2]);
        Ok(())
    }

    #[test]
    fn missing_current_fails() {
        let points = [point(10, 5.2), point(12, 4.8)];
        let error = current_and_next(&points, at(25, 11)).unwrap_err();
        assert!(error.is_not_found());
        assert!(!error.is_unavailable());
    }

    #[test]
    fn missing_next_fails() {
        let points = [point(10, 5.2), point(11, 6.1)];
        assert!(current_and_next(&points, at(25, 11)).unwrap_err().is_not_found());
    }

    #[test]
    fn empty_fails() {
        assert!(current_and_next(&[], at(25, 11)).unwrap_err().is_not_found());
    }

    #[test]
    fn on_days_filters_ok() {
        let points = vec![
            PricePoint::new(span(at(24, 23)), 1.2.into()),
            point(11, 6.1),
            PricePoint::new(span(at(26, 10)), 3.4.into()),
            PricePoint::new(span(at(27, 0)), 5.6.into()),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap();
        let filtered = on_days(points.clone(), today, &Utc);
        assert_eq!(filtered, vec![points[1], points[2]]);
    }

    #[tokio::test]
    async fn fixed_current_and_next_ok() -> Result {
        let repository = FixedPrices(vec![point(10, 5.2), point(11, 6.1), point(12, 4.8)]);
        let (current, next) = repository.get_current_and_next_hour_prices(at(25, 11)).await?;
        assert_eq!(current.price, KilowattHourRate::from(6.1));
        assert_eq!(next.price, KilowattHourRate::from(4.8));
        Ok(())
    }

    #[tokio::test]
    async fn fixed_empty_fails() -> Result {
        let repository = FixedPrices(Vec::new());
        assert!(repository.get_latest_prices().await?.is_empty());
        let error = repository.get_current_and_next_hour_prices(at(25, 11)).await.unwrap_err();
        assert!(error.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn fixed_daily_ok() -> Result {
        let repository = FixedPrices(vec![PricePoint::new(span(at(24, 23)), 1.2.into()), point(11, 6.1)]);
        let today = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap();
        let daily = repository.get_daily_prices(today, &Utc).await?;
        assert_eq!(daily, vec![repository.0[1]]);
        Ok(())
    }
}
