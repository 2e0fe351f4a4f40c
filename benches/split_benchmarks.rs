//! Performance benchmarks for the SplitBill split engine.
//!
//! Covers the pure calculator at several group sizes and the preview endpoint
//! end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use splitbill::api::{create_router, AppState};
use splitbill::calculation::{allocate_split, validate_split};
use splitbill::config::{ConfigLoader, SplitPolicy};
use splitbill::models::SplitInput;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Builds an input of `count` participants where every fourth one has a manual amount.
fn create_input(count: usize) -> SplitInput {
    let participants: Vec<String> = (0..count).map(|i| format!("p{:03}", i)).collect();
    let total = Decimal::new(100_000 * count as i64 + 1, 2);

    participants
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 4 == 1)
        .fold(SplitInput::new(total, participants.clone()), |input, (_, id)| {
            input.with_manual_entry(id.clone(), Decimal::new(12_345, 2))
        })
}

/// Benchmark: allocation at increasing group sizes.
fn bench_allocate_scaling(c: &mut Criterion) {
    let policy = SplitPolicy::default();
    let mut group = c.benchmark_group("allocate_split");

    for count in [2usize, 3, 10, 50, 200].iter() {
        let input = create_input(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("participants", count), &input, |b, input| {
            b.iter(|| black_box(allocate_split(black_box(input), &policy)))
        });
    }

    group.finish();
}

/// Benchmark: validating an allocation produced for 50 participants.
fn bench_validate(c: &mut Criterion) {
    let policy = SplitPolicy::default();
    let input = create_input(50);
    let lines = allocate_split(&input, &policy)
        .expect("benchmark input must split")
        .lines;

    c.bench_function("validate_split_50", |b| {
        b.iter(|| {
            black_box(validate_split(
                input.total,
                black_box(&input.participants),
                black_box(&lines),
                &policy,
            ))
        })
    });
}

/// Benchmark: preview request through the router.
fn bench_preview_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/splitbill").expect("Failed to load config");
    let router = create_router(AppState::from_config(&config));
    let body = serde_json::json!({
        "total": "100.00",
        "participants": ["alice", "bob", "carol"],
        "manual_entries": [{ "participant_id": "alice", "amount": "20.00" }]
    })
    .to_string();

    c.bench_function("preview_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/splits/preview")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_allocate_scaling,
    bench_validate,
    bench_preview_endpoint,
);
criterion_main!(benches);
