use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use simplerag_core::{Corpus, Encoder, FlatL2Index, HashedEncoder, Retriever, RetrieverConfig};

fn synthetic_vectors(count: usize, dimension: usize) -> Vec<Vec<f32>> {
    (0..count)
        .map(|i| {
            (0..dimension)
                .map(|j| ((i * 31 + j * 17) % 97) as f32 / 97.0)
                .collect()
        })
        .collect()
}

fn bench_index_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_l2_search");
    for count in [80, 500, 2000] {
        let vectors = synthetic_vectors(count, 384);
        let mut index = FlatL2Index::new(384);
        index.build(&vectors).unwrap();
        let query = vectors[count / 2].clone();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| index.search(black_box(&query), 5).unwrap())
        });
    }
    group.finish();
}

fn bench_retrieve(c: &mut Criterion) {
    let retriever = Retriever::ready(
        HashedEncoder::default(),
        Corpus::builtin(),
        RetrieverConfig::default(),
    )
    .unwrap();

    c.bench_function("retrieve_builtin_hashed", |b| {
        b.iter(|| {
            retriever
                .retrieve(black_box("Which foods can supplement iron?"), 5, 2.0)
                .unwrap()
        })
    });

    let encoder = HashedEncoder::default();
    let corpus = Corpus::builtin();
    c.bench_function("encode_builtin_hashed", |b| {
        b.iter(|| encoder.encode(black_box(&corpus.texts())).unwrap())
    });
}

criterion_group!(benches, bench_index_search, bench_retrieve);
criterion_main!(benches);
