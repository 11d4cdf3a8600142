use chrono::FixedOffset;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kaal_dasha::{BirthMoonPosition, TimelineRequest, nakshatra_birth_balance, vimshottari_snapshot};

const BIRTH_JD: f64 = 2_451_545.0;

fn request(horizon_years: f64) -> TimelineRequest {
    TimelineRequest::new(
        BirthMoonPosition::new(1, 8.0),
        BIRTH_JD,
        FixedOffset::east_opt(19_800).unwrap(),
    )
    .with_horizon(horizon_years)
}

fn generation_bench(c: &mut Criterion) {
    let moon = BirthMoonPosition::new(1, 8.0);

    let mut group = c.benchmark_group("generation");
    group.bench_function("birth_balance", |b| {
        b.iter(|| nakshatra_birth_balance(black_box(&moon)))
    });
    group.bench_function("timeline_120y", |b| {
        let req = request(120.0);
        b.iter(|| black_box(&req).generate())
    });
    group.bench_function("timeline_1200y", |b| {
        let req = request(1200.0);
        b.iter(|| black_box(&req).generate())
    });
    group.bench_function("snapshot_only", |b| {
        b.iter(|| vimshottari_snapshot(&moon, BIRTH_JD, black_box(BIRTH_JD + 12_345.6), 120.0))
    });
    group.finish();
}

fn query_bench(c: &mut Criterion) {
    let timeline = request(120.0).generate().expect("timeline generation");
    let jd = BIRTH_JD + 12_345.6;

    let mut group = c.benchmark_group("query");
    group.bench_function("active_chain", |b| {
        b.iter(|| timeline.active_chain(black_box(jd)).pratyantardasha.map(|p| p.graha))
    });
    group.bench_function("next_mahadasha", |b| {
        b.iter(|| timeline.next_mahadasha(black_box(jd)).map(|p| p.start_jd))
    });
    group.bench_function("view_at", |b| {
        b.iter(|| timeline.view_at(black_box(jd)).next_mahadasha().map(|p| p.graha))
    });
    group.finish();
}

criterion_group!(benches, generation_bench, query_bench);
criterion_main!(benches);
