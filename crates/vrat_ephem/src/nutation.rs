//! Nutation and obliquity of the ecliptic.
//!
//! Four-term nutation series (Meeus ch. 22, accurate to 0.5″ in Δψ and
//! 0.1″ in Δε) and the IAU 1980 mean obliquity polynomial.

/// Nutation in longitude and obliquity, in arcseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Δψ, nutation in longitude (arcsec).
    pub dpsi_arcsec: f64,
    /// Δε, nutation in obliquity (arcsec).
    pub deps_arcsec: f64,
}

impl Nutation {
    /// Δψ in degrees.
    pub fn dpsi_deg(self) -> f64 {
        self.dpsi_arcsec / 3600.0
    }
}

/// Low-precision nutation at `t` Julian centuries (TT) since J2000.0.
pub fn nutation(t: f64) -> Nutation {
    let omega = (125.044_52 - 1934.136_261 * t + 0.002_070_8 * t * t + t * t * t / 450_000.0)
        .to_radians();
    let l_sun = (280.4665 + 36_000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481_267.8813 * t).to_radians();

    let dpsi = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps = 9.20 * omega.cos() + 0.57 * (2.0 * l_sun).cos() + 0.10 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos();

    Nutation {
        dpsi_arcsec: dpsi,
        deps_arcsec: deps,
    }
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = 84_381.448 - 46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t;
    arcsec / 3600.0
}

/// True obliquity (mean + Δε) in degrees.
pub fn true_obliquity_deg(t: f64) -> f64 {
    mean_obliquity_deg(t) + nutation(t).deps_arcsec / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Meeus example 22.a: 1987-Apr-10 0h TD.
    const T_1987: f64 = -0.127_296_372_348;

    #[test]
    fn meeus_22a_dpsi() {
        let n = nutation(T_1987);
        assert!((n.dpsi_arcsec - (-3.788)).abs() < 0.5, "Δψ = {}", n.dpsi_arcsec);
    }

    #[test]
    fn meeus_22a_deps() {
        let n = nutation(T_1987);
        assert!((n.deps_arcsec - 9.443).abs() < 0.1, "Δε = {}", n.deps_arcsec);
    }

    #[test]
    fn meeus_22a_mean_obliquity() {
        let eps0 = mean_obliquity_deg(T_1987);
        let expected = 23.0 + 26.0 / 60.0 + 27.407 / 3600.0;
        assert!((eps0 - expected).abs() < 1e-4, "ε0 = {eps0}");
    }

    #[test]
    fn true_obliquity_includes_nutation() {
        let t = 0.25;
        let diff = (true_obliquity_deg(t) - mean_obliquity_deg(t)) * 3600.0;
        assert!((diff - nutation(t).deps_arcsec).abs() < 1e-9);
    }
}
