use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lecatalogue::EndpointCatalog;
use lerecommandation::{validate, CategoryFilter, RankRequest, SuggestionRanker};

fn bench_rank(c: &mut Criterion) {
    let catalog = EndpointCatalog::builtin();
    let ranker = SuggestionRanker::new();

    c.bench_function("rank_all_llama", |b| {
        b.iter(|| ranker.rank(&catalog, black_box("llama3.2"), CategoryFilter::All))
    });

    c.bench_function("rank_hinted_limited", |b| {
        let request = RankRequest::new("gpt-4o").with_provider("openai").with_limit(5);
        b.iter(|| ranker.rank_with(&catalog, black_box(&request)))
    });
}

fn bench_validate(c: &mut Criterion) {
    c.bench_function("validate_triplet", |b| {
        b.iter(|| validate(black_box("localhost"), black_box("11434"), black_box("/v1/chat")))
    });
}

criterion_group!(benches, bench_rank, bench_validate);
criterion_main!(benches);
