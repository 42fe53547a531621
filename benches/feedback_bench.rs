//! Benchmarks for feedback parsing and dashboard reduction
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mindu::assessment::CategoryScores;
use mindu::dashboard::summarize;
use mindu::llm::parse_feedback;
use mindu::storage::ResponseRecord;

const PLAIN: &str = r#"{"tag":"needs help","feedback":"Your stress scores are elevated.","action":"Sleep eight hours. Walk daily. Talk to a friend."}"#;

const FENCED: &str = "```json\n{\"tag\":\"normal\",\"feedback\":\"Balanced results.\",\"action\":\"Keep your routine. Check in monthly.\"}\n```";

const PROSE: &str = "Sure! Here is the assessment you asked for:\n{\"tag\":\"critical\",\"feedback\":\"Several areas are very low.\",\"action\":\"Reach out to a professional. Tell someone you trust.\"}\nTake care.";

const GARBAGE: &str = "I'm sorry, I can't produce JSON for that request right now.";

fn bench_parse_feedback(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_feedback");

    for (name, input) in [
        ("plain", PLAIN),
        ("fenced", FENCED),
        ("prose", PROSE),
        ("garbage", GARBAGE),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| parse_feedback(black_box(input)))
        });
    }

    group.finish();
}

fn create_records(count: usize) -> Vec<ResponseRecord> {
    (0..count)
        .map(|i| {
            let base = 1.0 + (i % 5) as f64;
            ResponseRecord {
                id: format!("r{}", i),
                user_id: "bench".to_string(),
                answers: CategoryScores::new([base, 5.0, 3.0, base, 2.4]).unwrap(),
                timestamp: i as i64 * 86_400_000,
            }
        })
        .collect()
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");

    for size in [10, 100, 1000] {
        let records = create_records(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("summarize_{}", size), |b| {
            b.iter(|| summarize(black_box(&records)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_feedback, bench_dashboard);
criterion_main!(benches);
