use criterion::{Criterion, black_box, criterion_group, criterion_main};
use panchang_ephem::AnalyticEphemeris;
use panchang_search::{
    SankrantiConfig, ScanConfig, find_sankranti, next_new_moon, panchang_at,
    sankrantis_for_calendar_year, scan_tithis,
};
use panchang_time::{Instant, TimeZoneSpec, UtcTime};

fn ist() -> TimeZoneSpec {
    TimeZoneSpec::iana("Asia/Calcutta").expect("zone should parse")
}

fn lunar_phase_bench(c: &mut Criterion) {
    let eph = AnalyticEphemeris::default();
    let from = Instant::from_utc(&UtcTime::new(2024, 3, 20, 12, 0, 0.0)).expect("valid instant");

    let mut group = c.benchmark_group("search_lunar_phase");
    group.sample_size(20);
    group.bench_function("next_new_moon", |b| {
        b.iter(|| next_new_moon(black_box(&eph), black_box(from)).expect("search should succeed"))
    });
    group.bench_function("panchang_at", |b| {
        b.iter(|| panchang_at(black_box(&eph), black_box(from)).expect("panchang should succeed"))
    });
    group.finish();
}

fn sankranti_bench(c: &mut Criterion) {
    let eph = AnalyticEphemeris::default();
    let zone = ist();
    let config = SankrantiConfig::default();

    let mut group = c.benchmark_group("search_sankranti");
    group.sample_size(20);
    group.bench_function("find_sankranti_makara", |b| {
        b.iter(|| {
            find_sankranti(black_box(&eph), 9, black_box(2025), &zone, &config)
                .expect("search should succeed")
        })
    });
    group.bench_function("sankrantis_for_calendar_year", |b| {
        b.iter(|| sankrantis_for_calendar_year(black_box(&eph), black_box(2025), &zone, &config))
    });
    group.finish();
}

fn tithi_scan_bench(c: &mut Criterion) {
    let eph = AnalyticEphemeris::default();
    let zone = ist();
    let config = ScanConfig::default();

    let mut group = c.benchmark_group("search_tithi_scan");
    group.sample_size(10);
    group.bench_function("scan_tithis_2025", |b| {
        b.iter(|| {
            scan_tithis(black_box(&eph), black_box(2025), &zone, &config)
                .expect("scan should succeed")
        })
    });
    group.finish();
}

criterion_group!(benches, lunar_phase_bench, sankranti_bench, tithi_scan_bench);
criterion_main!(benches);
