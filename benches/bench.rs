// Criterion benchmarks for Dealflow

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use chrono::NaiveDate;
use dealflow::core::{band_of, filters::filter_deals, sorting::sort_deals, DealFilterSort};
use dealflow::models::{
    Deal, FilterConfig, MatchRange, Metrics, ReviewStatus, SortConfig, SortDirection, SortField,
    Stage,
};

fn create_deal(id: usize) -> Deal {
    let score = ((id * 37 + 11) % 101) as u8;
    Deal {
        id: id.to_string(),
        match_score: score,
        metrics: Metrics {
            market: ((id * 13) % 101) as u8,
            team: ((id * 29) % 101) as u8,
            product: ((id * 7) % 101) as u8,
            traction: ((id * 53) % 101) as u8,
            vc_match: score,
        },
        uploaded_at: NaiveDate::from_ymd_opt(2024, 3, 1 + (id % 28) as u32).unwrap(),
        company: format!("Company {}", id),
        industry: if id % 4 == 0 { "AI/ML" } else { "SaaS" }.to_string(),
        stage: if id % 2 == 0 { Stage::Seed } else { Stage::SeriesA },
        founders: format!("Founder {}, Partner {}", id, id + 1),
        prelovc_status: ReviewStatus::Proceed,
        investor_status: ReviewStatus::NotReviewed,
        favorite: id % 3 == 0,
        raising: format!("${}M", id % 25),
        email: String::new(),
        oneliner: String::new(),
    }
}

fn create_filters() -> FilterConfig {
    FilterConfig::default()
        .with_match_range(MatchRange::new(50, 100))
        .with_stages([Stage::Seed])
        .with_search_query("ai")
}

fn bench_band_of(c: &mut Criterion) {
    c.bench_function("band_of", |b| {
        b.iter(|| band_of(black_box(73.0)));
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let query = DealFilterSort::default();
    let filters = create_filters();

    let mut group = c.benchmark_group("pipeline");

    for deal_count in [10, 100, 1000, 10000].iter() {
        let deals: Vec<Deal> = (0..*deal_count).map(create_deal).collect();

        group.bench_with_input(
            BenchmarkId::new("apply", deal_count),
            deal_count,
            |b, _| {
                b.iter(|| query.apply(black_box(&deals), black_box(&filters)));
            },
        );
    }

    group.finish();
}

fn bench_filter_and_sort(c: &mut Criterion) {
    let deals: Vec<Deal> = (0..1000).map(create_deal).collect();
    let filters = create_filters();
    let by_company = SortConfig::new(SortField::Company, SortDirection::Asc);

    c.bench_function("filter_1000_deals", |b| {
        b.iter(|| filter_deals(black_box(&deals), black_box(&filters)));
    });

    c.bench_function("sort_1000_deals_by_company", |b| {
        b.iter(|| sort_deals(black_box(&deals), black_box(&by_company)));
    });
}

criterion_group!(benches, bench_band_of, bench_pipeline, bench_filter_and_sort);

criterion_main!(benches);
