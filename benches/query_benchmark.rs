use chrono::{Duration, NaiveDate};
use climate_api::models::Observation;
use climate_api::{ObservationStore, QueryService};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

// Create test data for benchmarking
fn create_test_observations(station_count: usize, days: usize) -> Vec<Observation> {
    let base_date = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
    let mut observations = Vec::with_capacity(station_count * days);

    for day in 0..days {
        let date = (base_date + Duration::days(day as i64))
            .format("%Y-%m-%d")
            .to_string();
        for station_id in 1..=station_count {
            let precipitation = if day % 7 == 0 {
                None
            } else {
                Some((day % 5) as f64 * 0.1)
            };
            observations.push(Observation::new(
                format!("USC{:08}", station_id),
                date.clone(),
                precipitation,
                60.0 + (day % 20) as f64 + station_id as f64 * 0.5,
            ));
        }
    }

    observations
}

fn seeded_service(rt: &Runtime, station_count: usize, days: usize) -> QueryService {
    rt.block_on(async {
        let store = ObservationStore::in_memory().await.unwrap();
        store
            .insert_observations(&create_test_observations(station_count, days))
            .await
            .unwrap();
        QueryService::new(store)
    })
}

fn benchmark_recent_window(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let service = seeded_service(&rt, 9, 600);

    c.bench_function("recent_precipitation", |b| {
        b.to_async(&rt).iter(|| async {
            let map = service.list_recent_precipitation().await.unwrap();
            black_box(map.len())
        })
    });

    c.bench_function("recent_temperature_observations", |b| {
        b.to_async(&rt).iter(|| async {
            let rows = service.list_recent_temperature_observations().await.unwrap();
            black_box(rows.len())
        })
    });
}

fn benchmark_aggregation_by_size(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("aggregate_from_by_stations");

    for &size in &[1, 9, 50] {
        let service = seeded_service(&rt, size, 365);
        group.bench_with_input(BenchmarkId::new("stations", size), &size, |b, _| {
            b.to_async(&rt).iter(|| async {
                let rows = service.aggregate_from("2016-06-01").await.unwrap();
                black_box(rows.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_recent_window, benchmark_aggregation_by_size);
criterion_main!(benches);
