//! Benchmarks for the stat aggregation hot path.

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nettakip_core::model::{StudyEntry, Subject};
use nettakip_core::scoring::entries_net;
use nettakip_core::stats::{subject_stats, weekly_activity};

fn make_entries(n: usize) -> Vec<StudyEntry> {
    (0..n)
        .map(|i| {
            StudyEntry::new(
                Utc::now() - Duration::hours(i as i64),
                Subject::ALL[i % Subject::ALL.len()],
                "konu",
                (i % 40) as u32,
                (i % 11) as u32,
                30 + (i % 60) as u32,
            )
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let entries = make_entries(1000);

    c.bench_function("entries_net_1000", |b| {
        b.iter(|| entries_net(black_box(&entries)))
    });

    c.bench_function("subject_stats_1000", |b| {
        b.iter(|| subject_stats(black_box(&entries)))
    });

    let today = Utc::now().date_naive();
    c.bench_function("weekly_activity_1000", |b| {
        b.iter(|| weekly_activity(black_box(&entries), today))
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
