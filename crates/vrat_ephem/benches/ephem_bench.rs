use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vrat_ephem::{AnalyticEphemeris, Body, PositionProvider};

fn bench_positions(c: &mut Criterion) {
    let eph = AnalyticEphemeris::with_default();
    let at = Utc.with_ymd_and_hms(2025, 8, 27, 6, 0, 0).unwrap();

    let mut group = c.benchmark_group("analytic_ephemeris");
    group.bench_function("ecliptic_longitudes", |b| {
        b.iter(|| eph.ecliptic_longitudes(black_box(&at)))
    });
    group.bench_function("moon_equatorial", |b| {
        b.iter(|| eph.equatorial(Body::Moon, black_box(&at)))
    });
    group.finish();
}

criterion_group!(benches, bench_positions);
criterion_main!(benches);
