//! Angle helpers shared across the crate.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Wrap an angle into (−180, 180] degrees.
pub fn wrap_180(deg: f64) -> f64 {
    let r = normalize_360(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_in_range() {
        let r = normalize_360(-1e-17);
        assert!((0.0..360.0).contains(&r));
    }

    #[test]
    fn wrap_boundaries() {
        assert!((wrap_180(180.0) - 180.0).abs() < 1e-12);
        assert!((wrap_180(-180.0) - 180.0).abs() < 1e-12);
        assert!((wrap_180(190.0) + 170.0).abs() < 1e-12);
        assert!((wrap_180(-5.0) + 5.0).abs() < 1e-12);
    }
}
