//! New-moon root finding and yearly lunation enumeration.
//!
//! The root function is `f(t) = wrap180(λ☾ − λ☉)`, which rises through zero
//! at every new moon and jumps from +180 to −180 at every full moon. A guess
//! is bracketed with a ±36 h window that widens by 24 h per side up to six
//! times; only a negative-to-positive bracket is accepted, so the full-moon
//! jump is never mistaken for a root. Unbracketed guesses yield `None`.

use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};
use vrat_ephem::{EphemerisError, PositionProvider, wrap_180};

use crate::lunation_types::{Lunation, LunationSearchConfig};
use crate::search_util::bisect_root;

/// Mean synodic month in days.
pub const MEAN_SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// `wrap180(λ☾ − λ☉)` in degrees at an instant.
pub fn new_moon_offset_deg(
    provider: &dyn PositionProvider,
    at: &DateTime<Utc>,
) -> Result<f64, EphemerisError> {
    let lon = provider.ecliptic_longitudes(at)?;
    Ok(wrap_180(lon.moon_deg() - lon.sun_deg()))
}

fn brackets_new_moon(f_left: f64, f_right: f64) -> bool {
    f_left <= 0.0 && f_right >= 0.0
}

/// Find the new moon near `guess`.
///
/// Returns `Ok(None)` when no bracket is found within the allowed widenings;
/// the caller discards that guess.
pub fn find_new_moon(
    provider: &dyn PositionProvider,
    guess: DateTime<Utc>,
    config: &LunationSearchConfig,
) -> Result<Option<DateTime<Utc>>, EphemerisError> {
    let f = |t: &DateTime<Utc>| new_moon_offset_deg(provider, t);

    let mut left = guess - config.initial_half_window;
    let mut right = guess + config.initial_half_window;
    let mut f_left = f(&left)?;
    let mut f_right = f(&right)?;

    let mut expansions = 0;
    while !brackets_new_moon(f_left, f_right) && expansions < config.max_expansions {
        left -= config.expansion_step;
        right += config.expansion_step;
        f_left = f(&left)?;
        f_right = f(&right)?;
        expansions += 1;
    }
    if !brackets_new_moon(f_left, f_right) {
        tracing::debug!(%guess, "no new moon bracketed, guess discarded");
        return Ok(None);
    }

    let root = bisect_root(
        &f,
        left,
        f_left,
        right,
        config.max_iterations,
        config.tolerance_deg,
    )?;
    Ok(Some(root))
}

/// Guess instants for a year's new moons.
///
/// The series starts from December 10 of the prior year, moved back to the
/// mean new moon preceding it, and advances by `guess_spacing`. It runs to
/// January 20 of the following year and includes the first guess past that
/// date so the month containing December 31 is always closed.
pub fn lunation_guesses(
    provider: &dyn PositionProvider,
    year: i32,
    config: &LunationSearchConfig,
) -> Result<Vec<DateTime<Utc>>, EphemerisError> {
    let (Some(anchor), Some(end)) = (
        Utc.with_ymd_and_hms(year - 1, 12, 10, 0, 0, 0).single(),
        Utc.with_ymd_and_hms(year + 1, 1, 20, 0, 0, 0).single(),
    ) else {
        return Ok(Vec::new());
    };

    let elongation = provider.ecliptic_longitudes(&anchor)?.elongation_deg();
    let age_days = elongation / 360.0 * MEAN_SYNODIC_MONTH_DAYS;
    let mut cur = anchor - TimeDelta::seconds((age_days * 86_400.0).round() as i64);

    let mut guesses = Vec::with_capacity(16);
    while cur <= end {
        guesses.push(cur);
        cur += config.guess_spacing;
    }
    guesses.push(cur);
    Ok(guesses)
}

/// All new moons needed to cover the civil year, sorted ascending.
///
/// Roots within `merge_threshold` of an earlier root are dropped as
/// duplicates.
pub fn lunations_covering_year(
    provider: &dyn PositionProvider,
    year: i32,
    config: &LunationSearchConfig,
) -> Result<Vec<Lunation>, EphemerisError> {
    let mut found: Vec<DateTime<Utc>> = Vec::new();
    for guess in lunation_guesses(provider, year, config)? {
        let Some(root) = find_new_moon(provider, guess, config)? else {
            continue;
        };
        if found
            .iter()
            .any(|x| (root - *x).abs() < config.merge_threshold)
        {
            continue;
        }
        found.push(root);
    }
    found.sort();

    tracing::debug!(year, count = found.len(), "lunations found");
    if let (Some(first), Some(last)) = (found.first(), found.last()) {
        if first.year() >= year || last.year() <= year {
            tracing::warn!(year, %first, %last, "lunations do not span the whole year");
        }
    }
    Ok(found
        .into_iter()
        .map(|new_moon| Lunation { new_moon })
        .collect())
}
