use criterion::{criterion_group, criterion_main, Criterion};
use textindex::tokenizer::tokenize;
use textindex::{Documents, InvertedIndex, ResultRetriever};

const WORDS: &[&str] = &[
    "index", "search", "Query,", "term", "posting", "rank!", "snippet", "the", "document", "score.",
];

fn synthetic_text(seed: usize, len: usize) -> String {
    (0..len)
        .map(|i| WORDS[(i * 7 + seed) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_tokenize(c: &mut Criterion) {
    let text = synthetic_text(0, 10_000);
    c.bench_function("tokenize_10k_words", |b| b.iter(|| tokenize(&text)));
}

fn bench_build_and_search(c: &mut Criterion) {
    let docs: Documents = (0..200)
        .map(|i| (format!("doc{i:03}.txt"), synthetic_text(i, 500)))
        .collect();
    c.bench_function("build_200_docs", |b| {
        b.iter(|| {
            let mut idx = InvertedIndex::new();
            idx.build(&docs).unwrap();
            idx
        })
    });

    let mut idx = InvertedIndex::new();
    idx.build(&docs).unwrap();
    let retriever = ResultRetriever::new(&idx, &docs).unwrap();
    c.bench_function("display_results_or", |b| {
        b.iter(|| retriever.display_results("posting snippet rank", false, 10))
    });
}

criterion_group!(benches, bench_tokenize, bench_build_and_search);
criterion_main!(benches);
