use criterion::{black_box, criterion_group, criterion_main, Criterion};
use legal_text_similarity::SimilarityEngine;

// Opinion-sized synthetic texts: enough tokens, terminology, and citations
// to exercise every scoring dimension.
fn opinion_pair() -> (String, String) {
    let opinion_a = "The court held that the plaintiff established negligence and \
        awarded damages for breach of contract. The holding relied on 410 U.S. 113 \
        and 42 U.S.C. § 1983, and the motion for a new trial was denied. The verdict \
        rested on testimony, exhibits, and the weight of the evidence presented at \
        trial, and the judgment was affirmed on appeal. "
        .repeat(40);
    let opinion_b = "On appeal the judgment was reversed and the cause remanded. The \
        jury verdict finding liability in tort could not be sustained on this \
        evidence, and the damages award for negligence was vacated. See 987 F.3d \
        1250 and 29 C.F.R. § 1910.147. The petition for rehearing and the writ of \
        mandamus were both denied. "
        .repeat(40);
    (opinion_a, opinion_b)
}

fn similarity_benchmarks(c: &mut Criterion) {
    let engine = SimilarityEngine::new().expect("engine construction");
    let (opinion_a, opinion_b) = opinion_pair();

    c.bench_function("cosine_similarity", |b| {
        b.iter(|| engine.cosine_similarity(black_box(&opinion_a), black_box(&opinion_b)));
    });

    c.bench_function("jaccard_similarity", |b| {
        b.iter(|| engine.jaccard_similarity(black_box(&opinion_a), black_box(&opinion_b)));
    });

    c.bench_function("extract_citations", |b| {
        b.iter(|| engine.extract_citations(black_box(&opinion_a)));
    });

    c.bench_function("overall_similarity", |b| {
        b.iter(|| engine.overall_similarity(black_box(&opinion_a), black_box(&opinion_b)));
    });
}

criterion_group!(benches, similarity_benchmarks);
criterion_main!(benches);
