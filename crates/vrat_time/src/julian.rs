//! Julian Date ↔ Gregorian calendar conversions.
//!
//! Meeus, "Astronomical Algorithms", ch. 7. Valid for any Gregorian date
//! after 1582-Oct-15; earlier dates are not needed by the calendar engine.

/// Julian Date of the J2000.0 epoch (2000-Jan-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in one Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date from a Gregorian calendar date with fractional day.
///
/// `JD = ⌊365.25(y+4716)⌋ + ⌊30.6001(m+1)⌋ + d + B − 1524.5`, with January
/// and February counted as months 13 and 14 of the previous year and
/// `B = 2 − A + ⌊A/4⌋`, `A = ⌊y/100⌋`.
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day_frac + b - 1524.5
}

/// Gregorian calendar date from a Julian Date.
///
/// Returns `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_epoch() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9, "jd = {jd}");
    }

    #[test]
    fn meeus_example_7a() {
        // Sputnik launch, 1957-Oct-04.81
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6, "jd = {jd}");
    }

    #[test]
    fn january_uses_previous_year_months() {
        let jd = calendar_to_jd(2025, 1, 1.0);
        assert!((jd - 2_460_676.5).abs() < 1e-9, "jd = {jd}");
    }

    #[test]
    fn calendar_roundtrip() {
        let jd = calendar_to_jd(2024, 3, 20.375);
        let (y, m, d) = jd_to_calendar(jd);
        assert_eq!((y, m), (2024, 3));
        assert!((d - 20.375).abs() < 1e-8, "day = {d}");
    }

    #[test]
    fn centuries_at_2050() {
        let t = julian_centuries(calendar_to_jd(2050, 1, 1.5));
        assert!((t - 0.5).abs() < 1e-4, "t = {t}");
    }
}
