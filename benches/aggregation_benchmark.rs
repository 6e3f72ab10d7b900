use airq_analytics::models::{FilterCriteria, ObservationRecord, Pollutant};
use airq_analytics::processors::{filter, FeatureDeriver};
use airq_analytics::{AirQualityAnalyzer, ObservationTable};
use chrono::{Datelike, Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const STATIONS: [&str; 4] = ["Aotizhongxin", "Changping", "Dingling", "Dongsi"];

fn create_test_table(days: u32) -> ObservationTable {
    let mut records = Vec::new();
    for offset in 0..days {
        let date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + Duration::days(offset as i64);
        for (i, station) in STATIONS.iter().enumerate() {
            for hour in 0..24 {
                let base = (hour as f64) * 2.0 + (i as f64) * 5.0 + (offset % 7) as f64;
                records.push(
                    ObservationRecord::new(*station, date.year(), date.month(), date.day(), hour)
                        .with_value(Pollutant::Pm25, base)
                        .with_value(Pollutant::Pm10, base * 1.5)
                        .with_value(Pollutant::So2, base / 4.0)
                        .with_rain(((hour * 7 + offset) % 60) as f64),
                );
            }
        }
    }
    FeatureDeriver::new().derive_table(records).unwrap()
}

fn benchmark_feature_derivation(c: &mut Criterion) {
    let table = create_test_table(90);

    c.bench_function("feature_derivation", |b| {
        b.iter(|| {
            let derived = FeatureDeriver::new().rederive(&table).unwrap();
            black_box(derived.len())
        })
    });
}

fn benchmark_filter(c: &mut Criterion) {
    let table = create_test_table(365);
    let criteria = FilterCriteria::new(2015, ["Changping", "Dongsi"]);

    c.bench_function("filter_stage", |b| {
        b.iter(|| black_box(filter(&table, &criteria).len()))
    });
}

fn benchmark_views(c: &mut Criterion) {
    let table = create_test_table(365);
    let analyzer = AirQualityAnalyzer::new(&table);
    let criteria = FilterCriteria::new(2015, STATIONS);

    c.bench_function("hourly_profile", |b| {
        b.iter(|| black_box(analyzer.hourly(&criteria, None).unwrap().peak_value))
    });

    c.bench_function("rain_effect", |b| {
        b.iter(|| black_box(analyzer.rain_effect(&criteria, &[]).unwrap().rows.len()))
    });

    c.bench_function("station_ranking", |b| {
        b.iter(|| black_box(analyzer.station_ranking(&criteria, None).unwrap().top_value))
    });

    c.bench_function("weekday_weekend", |b| {
        b.iter(|| black_box(analyzer.weekday_weekend(&criteria, None).unwrap().test.p_value))
    });
}

fn benchmark_varying_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_by_size");

    for &days in &[30, 90, 365] {
        group.bench_with_input(BenchmarkId::new("days", days), &days, |b, &days| {
            let table = create_test_table(days);
            let analyzer = AirQualityAnalyzer::new(&table);
            let criteria = FilterCriteria::new(2015, STATIONS);

            b.iter(|| {
                let report = analyzer.report(&criteria, None);
                black_box(report.weekday_weekend.is_ok())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_feature_derivation,
    benchmark_filter,
    benchmark_views,
    benchmark_varying_data_sizes
);
criterion_main!(benches);
