// Matching benchmarks over synthetic catalogs
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::sync::Arc;
use symptomatch_core::{normalize, Catalog, DiseaseRecord};
use symptomatch_similarity::{MatchConfig, Matcher, RankingStrategy, Scorer};
use symptomatch_storage::{parse_catalog_bytes, write_records};

const SYMPTOMS: &[&str] = &[
    "fever", "cough", "fatigue", "headache", "nausea", "vomiting", "rash", "chills",
    "dizziness", "wheezing", "sneezing", "congestion", "palpitations", "numbness",
    "swelling", "itching", "bleeding", "stiffness", "insomnia", "thirst", "sweating",
    "tingling", "blurred", "vision", "abdominal", "chest", "pain", "diarrhea",
];

const NAME_STEMS: &[&str] = &[
    "Viral Infection", "Heart Disease", "Lung Cancer", "Migraine", "Gastric Ulcer",
    "Thyroid Disorder", "Eye Strain", "Back Pain", "Food Poisoning", "Vitamin Deficiency",
];

fn generate_symptoms(rng: &mut impl Rng, count: usize) -> String {
    (0..count)
        .filter_map(|_| SYMPTOMS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(", ")
}

fn generate_catalog(size: usize) -> Catalog {
    let mut rng = rand::rng();
    let records = (0..size)
        .map(|i| {
            let stem = NAME_STEMS.choose(&mut rng).copied().unwrap_or("Disease");
            let symptom_count = rng.random_range(3..9);
            DiseaseRecord::new(i as u64, format!("{} {}", stem, i))
                .with_symptoms(generate_symptoms(&mut rng, symptom_count))
                .with_treatments("rest, fluids")
        })
        .collect();
    Catalog::new(records).unwrap()
}

fn benchmark_normalize(c: &mut Criterion) {
    let text = "I've had a terrible Headache, FEVER and chills for 3 days; also some nausea & dizziness.";

    c.bench_function("normalize", |b| {
        b.iter(|| black_box(normalize(black_box(text))));
    });
}

fn benchmark_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [1_000, 10_000].iter() {
        let catalog = generate_catalog(*size);
        let mut csv = Vec::new();
        write_records(&mut csv, catalog.iter().map(|e| e.record())).unwrap();

        group.bench_with_input(BenchmarkId::new("parse_csv", size), &csv, |b, csv| {
            b.iter(|| black_box(parse_catalog_bytes(black_box(csv)).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    let query = "fever, cough, fatigue and a headache";

    for size in [1_000, 10_000].iter() {
        let catalog = generate_catalog(*size);

        for strategy in [RankingStrategy::StrictFloor, RankingStrategy::CategoryBiased] {
            for scorer in [Scorer::Weighted, Scorer::Jaccard] {
                let matcher = Matcher::new(MatchConfig::new(scorer, strategy));
                let id = format!("{}/{}", strategy, scorer);
                group.bench_with_input(BenchmarkId::new(id, size), &catalog, |b, catalog| {
                    b.iter(|| black_box(matcher.find_matches(black_box(query), catalog)));
                });
            }
        }
    }

    group.finish();
}

fn benchmark_concurrent_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_queries");

    let catalog = Arc::new(generate_catalog(1_000));
    let matcher = Arc::new(Matcher::default());

    group.bench_function("10_threads", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..10)
                .map(|i| {
                    let catalog = catalog.clone();
                    let matcher = matcher.clone();
                    let query = SYMPTOMS[i % SYMPTOMS.len()];
                    std::thread::spawn(move || matcher.find_matches(query, &catalog))
                })
                .collect();

            for handle in handles {
                black_box(handle.join().unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_load,
    benchmark_match,
    benchmark_concurrent_queries
);
criterion_main!(benches);
