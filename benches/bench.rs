// Criterion benchmarks for the Revive scoring core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use revive_engine::core::{cluster_density_scores, distance::haversine_distance};
use revive_engine::models::{
    AirQualitySignal, AmenityObservation, PropertyRecord, RenovationEstimate, RenovationItem,
};
use revive_engine::ViabilityEngine;

fn create_record(id: usize, lat: f64, lon: f64) -> PropertyRecord {
    PropertyRecord {
        property_id: format!("prop-{id}"),
        address: Some(format!("{id} Example Road")),
        latitude: lat,
        longitude: lon,
        listed_price: 120_000.0 + (id % 50) as f64 * 5_000.0,
        market_average_price: 300_000.0,
        area_m2: Some(80.0 + (id % 10) as f64 * 10.0),
        ber: Some(if id % 3 == 0 { "G" } else { "E1" }.to_string()),
        amenities: vec![
            AmenityObservation {
                name: "Supermarket".to_string(),
                kind: "supermarket".to_string(),
                distance_km: 0.3 + (id % 5) as f64 * 0.2,
            },
            AmenityObservation {
                name: "Bus stop".to_string(),
                kind: "bus station".to_string(),
                distance_km: 0.2 + (id % 7) as f64 * 0.3,
            },
            AmenityObservation {
                name: "Primary school".to_string(),
                kind: "school".to_string(),
                distance_km: 0.5 + (id % 4) as f64 * 0.4,
            },
        ],
        renovation: RenovationEstimate {
            items: vec![RenovationItem {
                item: "Roof".to_string(),
                reason: "Slates missing, insulation degraded".to_string(),
                material: "Slate".to_string(),
                amount: "40 m2".to_string(),
                cost: 25_000.0,
            }],
            total_cost: 25_000.0,
        },
        air_quality: AirQualitySignal {
            current_index: 40.0,
            historical_indexes: vec![35.0, 45.0, 50.0],
        },
    }
}

fn create_batch(size: usize) -> Vec<PropertyRecord> {
    (0..size)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.001) % 0.5;
            create_record(i, 53.3498 + lat_offset, -6.2603 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(53.3498),
                black_box(-6.2603),
                black_box(53.3518),
                black_box(-6.2650),
            )
        });
    });
}

fn bench_cluster_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");

    for batch_size in [10, 50, 100, 500].iter() {
        let coordinates: Vec<(f64, f64)> = create_batch(*batch_size)
            .iter()
            .map(|r| (r.latitude, r.longitude))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("density_scores", batch_size),
            batch_size,
            |b, _| {
                b.iter(|| cluster_density_scores(black_box(&coordinates), black_box(0.3)));
            },
        );
    }

    group.finish();
}

fn bench_full_ranking(c: &mut Criterion) {
    let engine = ViabilityEngine::with_default_config();

    let mut group = c.benchmark_group("ranking");

    for batch_size in [10, 50, 100, 500].iter() {
        let batch = create_batch(*batch_size);

        group.bench_with_input(
            BenchmarkId::new("score_batch", batch_size),
            batch_size,
            |b, _| {
                b.iter(|| engine.score_batch(black_box(batch.clone())));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_cluster_scoring,
    bench_full_ranking
);

criterion_main!(benches);
