//! Ecliptic ↔ equatorial coordinate conversion.

use std::f64::consts::TAU;

/// Convert ecliptic (λ, β) to equatorial (α, δ) for obliquity ε.
///
/// All angles in degrees on input; returns `(ra_rad, dec_rad)` with RA in
/// [0, 2π).
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let (lam, beta, eps) = (
        lon_deg.to_radians(),
        lat_deg.to_radians(),
        obliquity_deg.to_radians(),
    );
    let ra = (lam.sin() * eps.cos() - beta.tan() * eps.sin()).atan2(lam.cos());
    let dec = (beta.sin() * eps.cos() + beta.cos() * eps.sin() * lam.sin()).asin();
    (ra.rem_euclid(TAU), dec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equinox_point_maps_to_origin() {
        let (ra, dec) = ecliptic_to_equatorial(0.0, 0.0, 23.44);
        assert!(ra.abs() < 1e-12 || (ra - TAU).abs() < 1e-12);
        assert!(dec.abs() < 1e-12);
    }

    #[test]
    fn summer_solstice_declination_equals_obliquity() {
        let (ra, dec) = ecliptic_to_equatorial(90.0, 0.0, 23.44);
        assert!((ra.to_degrees() - 90.0).abs() < 1e-9);
        assert!((dec.to_degrees() - 23.44).abs() < 1e-9);
    }

    #[test]
    fn meeus_example_13a() {
        // Pollux: λ = 113.215630°, β = 6.684170°, ε = 23.4392911° → α = 116.328942°, δ = 28.026183°
        let (ra, dec) = ecliptic_to_equatorial(113.215_630, 6.684_170, 23.439_291_1);
        assert!((ra.to_degrees() - 116.328_942).abs() < 1e-5);
        assert!((dec.to_degrees() - 28.026_183).abs() < 1e-5);
    }
}
