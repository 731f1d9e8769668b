//! ΔT = TT − UT1 from the Espenak–Meeus polynomial fits.
//!
//! The fits cover 1900–2150 piecewise; outside that range the long-term
//! parabola is used. Accuracy is a few seconds near the present, which moves
//! the Moon by well under an arcsecond per second of error.

/// ΔT in seconds for a decimal year (e.g. `2025.5`).
pub fn delta_t_seconds(decimal_year: f64) -> f64 {
    let y = decimal_year;
    if (2005.0..2050.0).contains(&y) {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else if (1986.0..2005.0).contains(&y) {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if (2050.0..2150.0).contains(&y) {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
    } else if (1961.0..1986.0).contains(&y) {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if (1941.0..1961.0).contains(&y) {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if (1920.0..1941.0).contains(&y) {
        let t = y - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if (1900.0..1920.0).contains(&y) {
        let t = y - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
            - 0.000197 * t.powi(4)
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

/// Decimal year used as the ΔT argument for a calendar month.
pub fn decimal_year(year: i32, month: u32) -> f64 {
    year as f64 + (month as f64 - 0.5) / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_day_near_seventy_seconds() {
        let dt = delta_t_seconds(2025.0);
        assert!((60.0..80.0).contains(&dt), "ΔT(2025) = {dt}");
    }

    #[test]
    fn year_2000_matches_observed() {
        let dt = delta_t_seconds(2000.0);
        assert!((dt - 63.8).abs() < 0.5, "ΔT(2000) = {dt}");
    }

    #[test]
    fn continuous_at_2005_boundary() {
        let before = delta_t_seconds(2004.999);
        let after = delta_t_seconds(2005.0);
        assert!((before - after).abs() < 1.0, "{before} vs {after}");
    }

    #[test]
    fn decimal_year_mid_month() {
        assert!((decimal_year(2025, 1) - 2025.041_666).abs() < 1e-5);
    }
}
