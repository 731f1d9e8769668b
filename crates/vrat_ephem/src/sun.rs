//! Geometric solar position from the low-precision solar theory.
//!
//! Meeus ch. 25 ("lower accuracy"): mean longitude and anomaly with a
//! three-term equation of centre. Good to about 0.01° over 1900–2100,
//! which keeps tithi boundaries within a minute or two.

use crate::util::normalize_360;

/// Geometric (true) solar longitude and Earth–Sun distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGeometry {
    /// True geometric longitude referred to the mean equinox of date (degrees).
    pub true_longitude_deg: f64,
    /// Earth–Sun radius vector (AU).
    pub radius_au: f64,
}

/// Solar geometry at `t` Julian centuries (TT) since J2000.0.
pub fn solar_geometry(t: f64) -> SolarGeometry {
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let m_rad = m.to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m_rad.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m_rad).sin()
        + 0.000_289 * (3.0 * m_rad).sin();

    let true_anomaly = (m + c).to_radians();
    let radius_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    SolarGeometry {
        true_longitude_deg: normalize_360(l0 + c),
        radius_au,
    }
}

/// Annual aberration in longitude for the Sun, in degrees.
pub fn aberration_deg(radius_au: f64) -> f64 {
    -20.4898 / 3600.0 / radius_au
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Meeus example 25.a: 1992-Oct-13 0h TD (JDE 2448908.5).
    const T_1992: f64 = -0.072_183_436;

    #[test]
    fn meeus_25a_true_longitude() {
        let g = solar_geometry(T_1992);
        assert!(
            (g.true_longitude_deg - 199.909_88).abs() < 1e-3,
            "☉ = {}",
            g.true_longitude_deg
        );
    }

    #[test]
    fn meeus_25a_radius() {
        let g = solar_geometry(T_1992);
        assert!((g.radius_au - 0.997_66).abs() < 1e-4, "R = {}", g.radius_au);
    }

    #[test]
    fn aberration_about_twenty_arcsec() {
        let a = aberration_deg(1.0) * 3600.0;
        assert!((a + 20.49).abs() < 0.01);
    }
}
