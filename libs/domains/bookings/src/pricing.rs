//! Stay pricing.

use chrono::{DateTime, Utc};

use crate::error::{BookingError, BookingResult};

const MS_PER_DAY: i64 = 86_400_000;

/// Number of billable nights: partial days round up.
pub fn nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> BookingResult<i64> {
    let diff_ms = (check_out - check_in).num_milliseconds();
    if diff_ms <= 0 {
        return Err(BookingError::InvalidDateRange);
    }
    // ceil for positive values
    Ok((diff_ms + MS_PER_DAY - 1) / MS_PER_DAY)
}

/// Total stay price for `rate` per night.
pub fn quote(rate: f64, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> BookingResult<f64> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(BookingError::Validation(format!(
            "invalid nightly rate {}",
            rate
        )));
    }
    Ok(rate * nights(check_in, check_out)? as f64)
}
