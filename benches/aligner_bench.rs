use archery_trends::core::{
    AthleteResults, CompetitionCatalog, CompetitionInfo, RawResult, StatisticsOptions,
    StatisticsSummary, align, normalize_result_date,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_results(athlete: usize, count: usize) -> Vec<RawResult> {
    (0..count)
        .map(|i| {
            let day = (i + athlete * 3) % 28 + 1;
            let month = (i / 28) % 12 + 1;
            let year = 2015 + i / 336;
            let date = if i % 2 == 0 {
                format!("{day:02}/{month:02}/{year}")
            } else {
                format!("{year}-{month:02}-{day:02}")
            };
            RawResult::new(date, 500.0 + (i % 100) as f64)
                .with_competition(format!("Cup {i}"), "indoor_18m")
                .with_position((i % 40 + 1) as u32)
        })
        .collect()
}

fn bench_normalize_mixed_dates(c: &mut Criterion) {
    let inputs = [
        "01/01/2024",
        "2024-01-15",
        "15-01-2024",
        "2024-01-15T10:30:00Z",
        "January 15, 2024",
        "garbage",
    ];

    c.bench_function("normalize_mixed_dates", |b| {
        b.iter(|| {
            for input in inputs {
                let _ = normalize_result_date(black_box(input));
            }
        })
    });
}

fn bench_align_five_athletes_2k(c: &mut Criterion) {
    let sets: Vec<AthleteResults> = (0..5)
        .map(|athlete| {
            AthleteResults::new(
                format!("id-{athlete}"),
                format!("Athlete {athlete}"),
                generated_results(athlete, 2_000),
            )
        })
        .collect();

    c.bench_function("align_five_athletes_2k", |b| {
        b.iter(|| {
            let chart = align(black_box(&sets), black_box(false));
            black_box(chart.labels.len());
        })
    });
}

fn bench_statistics_summary_2k(c: &mut Criterion) {
    let catalog = CompetitionCatalog::from_entries([
        CompetitionInfo::new("indoor_18m", "indoor").with_arrow_count(60)
    ]);
    let results = generated_results(0, 2_000);

    c.bench_function("statistics_summary_2k", |b| {
        b.iter(|| {
            let _ = StatisticsSummary::compute(
                black_box(&results),
                black_box(&catalog),
                StatisticsOptions::default(),
            );
        })
    });
}

criterion_group!(
    benches,
    bench_normalize_mixed_dates,
    bench_align_five_athletes_2k,
    bench_statistics_summary_2k
);
criterion_main!(benches);
