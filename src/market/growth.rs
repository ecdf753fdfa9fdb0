//! Population growth model
//!
//! Markets only carry sparse yearly samples. Values between two samples
//! follow the compound annual growth rate between them; values outside
//! the sampled range are held flat at the nearest sample.

use chrono::{Datelike, NaiveDate};

use super::TimeSeriesSample;

/// Value of a yearly series on a calendar date.
///
/// Only the year of `date` matters. Returns `None` for an empty series.
pub fn value_at(samples: &[TimeSeriesSample], date: NaiveDate) -> Option<f64> {
    value_in_year(samples, date.year())
}

/// Value of a yearly series in the given year
pub fn value_in_year(samples: &[TimeSeriesSample], year: i32) -> Option<f64> {
    let earliest = samples.iter().min_by_key(|s| s.year)?;
    let latest = samples.iter().max_by_key(|s| s.year)?;

    let before = samples.iter().filter(|s| s.year <= year).max_by_key(|s| s.year);
    let after = samples.iter().filter(|s| s.year >= year).min_by_key(|s| s.year);

    let (a, b) = match (before, after) {
        (None, _) => return Some(earliest.value),
        (_, None) => return Some(latest.value),
        (Some(a), Some(b)) => (a, b),
    };

    if a.year == year {
        return Some(a.value);
    }

    let span = f64::from(b.year - a.year);
    let elapsed = f64::from(year - a.year);

    if a.value <= 0.0 {
        // Compound growth from zero is undefined
        return Some(a.value + (b.value - a.value) * elapsed / span);
    }

    let rate = (b.value / a.value).powf(1.0 / span);
    Some(a.value * rate.powf(elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<TimeSeriesSample> {
        vec![
            TimeSeriesSample::new(2000, 1000.0),
            TimeSeriesSample::new(2010, 2000.0),
            TimeSeriesSample::new(2020, 2100.0),
        ]
    }

    fn date(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 7, 15).unwrap()
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(value_at(&[], date(2000)), None);
    }

    #[test]
    fn test_before_first_sample_holds_earliest() {
        assert_eq!(value_at(&series(), date(1990)), Some(1000.0));
    }

    #[test]
    fn test_after_last_sample_holds_latest() {
        assert_eq!(value_at(&series(), date(2035)), Some(2100.0));
    }

    #[test]
    fn test_exact_year_ignores_month_and_day() {
        let jan = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let dec = NaiveDate::from_ymd_opt(2010, 12, 31).unwrap();
        assert_eq!(value_at(&series(), jan), Some(2000.0));
        assert_eq!(value_at(&series(), dec), Some(2000.0));
    }

    #[test]
    fn test_compound_growth_between_samples() {
        // Doubling over ten years: halfway is 1000 * sqrt(2)
        let value = value_at(&series(), date(2005)).unwrap();
        assert!((value - 1000.0 * 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_unordered_samples() {
        let mut samples = series();
        samples.reverse();
        let value = value_at(&samples, date(2005)).unwrap();
        assert!((value - 1000.0 * 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample_is_flat() {
        let samples = [TimeSeriesSample::new(2015, 42.0)];
        assert_eq!(value_at(&samples, date(1900)), Some(42.0));
        assert_eq!(value_at(&samples, date(2100)), Some(42.0));
    }

    #[test]
    fn test_growth_from_zero_is_linear() {
        let samples = [TimeSeriesSample::new(2000, 0.0), TimeSeriesSample::new(2004, 400.0)];
        assert_eq!(value_at(&samples, date(2001)), Some(100.0));
    }

    #[test]
    fn test_decline_between_samples() {
        let samples = [TimeSeriesSample::new(2000, 400.0), TimeSeriesSample::new(2002, 100.0)];
        let value = value_at(&samples, date(2001)).unwrap();
        assert!((value - 200.0).abs() < 1e-9);
    }
}
