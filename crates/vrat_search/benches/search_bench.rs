use std::sync::Arc;

use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vrat_base::{AstronomicalRiseSet, FixedZoneResolver, GeoLocation, RiseSetConfig};
use vrat_ephem::{AnalyticEphemeris, PositionProvider};
use vrat_search::{
    AssemblyOptions, LunationSearchConfig, ObservanceEngine, find_new_moon,
    lunations_covering_year,
};

fn engine() -> ObservanceEngine {
    let eph: Arc<dyn PositionProvider> = Arc::new(AnalyticEphemeris::with_default());
    let rise_set = AstronomicalRiseSet::new(Arc::clone(&eph), RiseSetConfig::default());
    ObservanceEngine::new(
        eph,
        Arc::new(rise_set),
        Arc::new(FixedZoneResolver::new(chrono_tz::Asia::Kolkata)),
    )
}

fn lunation_bench(c: &mut Criterion) {
    let eph = AnalyticEphemeris::with_default();
    let config = LunationSearchConfig::default();
    let guess = Utc.with_ymd_and_hms(2025, 3, 27, 0, 0, 0).unwrap();

    let mut group = c.benchmark_group("search_lunation");
    group.sample_size(20);
    group.bench_function("find_new_moon", |b| {
        b.iter(|| {
            find_new_moon(black_box(&eph), black_box(guess), black_box(&config))
                .expect("search should succeed")
                .expect("root should be bracketed")
        })
    });
    group.bench_function("lunations_covering_year", |b| {
        b.iter(|| {
            lunations_covering_year(black_box(&eph), black_box(2025), black_box(&config))
                .expect("search should succeed")
        })
    });
    group.finish();
}

fn events_bench(c: &mut Criterion) {
    let engine = engine();
    let mumbai = GeoLocation::new(19.0760, 72.8777, 0.0);
    let options = AssemblyOptions::default();

    let mut group = c.benchmark_group("search_events");
    group.sample_size(10);
    group.bench_function("events_for_year", |b| {
        b.iter(|| {
            engine
                .events_for_year(black_box(&mumbai), black_box(2025), black_box(&options))
                .expect("events should assemble")
        })
    });
    group.bench_function("rahu_kaal_year", |b| {
        b.iter(|| {
            engine
                .rahu_kaal(black_box(&mumbai), black_box(2025))
                .expect("rahu kaal should compute")
        })
    });
    group.finish();
}

criterion_group!(benches, lunation_bench, events_bench);
criterion_main!(benches);
