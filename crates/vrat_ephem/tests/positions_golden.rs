//! Golden checks of the analytic ephemeris against published phase instants.
//!
//! New and full moon times are from the USNO phase tables (UTC, minute
//! precision). At those instants the apparent elongation must sit on 0°/180°
//! to within the series accuracy plus one minute of lunar motion.

use chrono::{DateTime, TimeZone, Utc};
use vrat_ephem::{AnalyticEphemeris, Body, PositionProvider, wrap_180};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn elongation(eph: &AnalyticEphemeris, t: &DateTime<Utc>) -> f64 {
    eph.ecliptic_longitudes(t).unwrap().elongation_deg()
}

#[test]
fn new_moons_2025() {
    let eph = AnalyticEphemeris::with_default();
    for t in [
        at(2025, 1, 29, 12, 36),
        at(2025, 4, 27, 19, 31),
        at(2025, 10, 21, 12, 25),
    ] {
        let e = wrap_180(elongation(&eph, &t));
        assert!(e.abs() < 0.05, "elongation at {t} = {e}");
    }
}

#[test]
fn full_moons_2025() {
    let eph = AnalyticEphemeris::with_default();
    for t in [at(2025, 3, 14, 6, 55), at(2025, 9, 7, 18, 9)] {
        let e = elongation(&eph, &t);
        assert!((e - 180.0).abs() < 0.05, "elongation at {t} = {e}");
    }
}

#[test]
fn moon_distance_in_physical_range() {
    let eph = AnalyticEphemeris::with_default();
    for day in 1..=28 {
        let p = eph
            .apparent_position(Body::Moon, &at(2025, 2, day, 0, 0))
            .unwrap();
        assert!(
            (356_000.0..407_000.0).contains(&p.distance_km),
            "Δ = {}",
            p.distance_km
        );
        assert!(p.latitude_deg.abs() < 5.4, "β = {}", p.latitude_deg);
    }
}

#[test]
fn sun_declination_at_june_solstice() {
    let eph = AnalyticEphemeris::with_default();
    // June solstice 2025: 2025-06-21 02:42 UTC
    let eq = eph.equatorial(Body::Sun, &at(2025, 6, 21, 2, 42)).unwrap();
    assert!(
        (eq.dec_rad.to_degrees() - 23.436).abs() < 0.01,
        "δ = {}",
        eq.dec_rad.to_degrees()
    );
}

#[test]
fn deterministic_for_identical_instants() {
    let eph = AnalyticEphemeris::with_default();
    let t = at(2031, 7, 19, 3, 14);
    assert_eq!(
        eph.ecliptic_longitudes(&t).unwrap(),
        eph.ecliptic_longitudes(&t).unwrap()
    );
}
