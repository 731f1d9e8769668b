//! Shared helpers for date scans and root finding.

use chrono::{DateTime, NaiveDate, Utc};

/// First and last civil dates of a Gregorian year.
pub(crate) fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// Intersect `[first, last]` with the civil year.
pub(crate) fn clamp_to_year(
    first: NaiveDate,
    last: NaiveDate,
    year: i32,
) -> Option<(NaiveDate, NaiveDate)> {
    let (y0, y1) = year_bounds(year)?;
    let (a, b) = (first.max(y0), last.min(y1));
    (a <= b).then_some((a, b))
}

/// Inclusive daily iterator.
pub(crate) fn days_between(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |d| *d <= last)
}

/// Midpoint of two instants.
pub(crate) fn midpoint(a: DateTime<Utc>, b: DateTime<Utc>) -> DateTime<Utc> {
    a + (b - a) / 2
}

/// Bisection on `[left, right]` where `f(left) ≤ 0 ≤ f(right)`.
///
/// Stops after `max_iterations` halvings or as soon as `|f(mid)| < tolerance`.
pub(crate) fn bisect_root<E>(
    f: &dyn Fn(&DateTime<Utc>) -> Result<f64, E>,
    mut left: DateTime<Utc>,
    mut f_left: f64,
    mut right: DateTime<Utc>,
    max_iterations: u32,
    tolerance: f64,
) -> Result<DateTime<Utc>, E> {
    for _ in 0..max_iterations {
        let mid = midpoint(left, right);
        let f_mid = f(&mid)?;
        if f_mid.abs() < tolerance {
            return Ok(mid);
        }
        if f_left * f_mid <= 0.0 {
            right = mid;
        } else {
            left = mid;
            f_left = f_mid;
        }
    }
    Ok(midpoint(left, right))
}
