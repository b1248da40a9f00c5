use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taggers::{ExperimentConfig, TaggedSentence, TrainingData};

fn synthetic(n: usize) -> Vec<TaggedSentence> {
    let vocab = [("the", "AT"), ("jury", "NN"), ("said", "VBD"), ("running", "VBG"), ("it", "PPS"), (".", ".")];
    (0..n)
        .map(|i| {
            (0..12)
                .map(|j| {
                    let (w, t) = vocab[(i * 7 + j * 3) % vocab.len()];
                    (format!("{w}{}", (i + j) % 50), t.to_string())
                })
                .collect()
        })
        .collect()
}

fn train(sents: &[TaggedSentence], config: &ExperimentConfig) {
    let words: Vec<&str> = sents.iter().flatten().map(|(w, _)| w.as_str()).collect();
    let tagged_words: Vec<(&str, &str)> = sents.iter().flatten().map(|(w, t)| (w.as_str(), t.as_str())).collect();
    let data = TrainingData { words: &words, tagged_words: &tagged_words, train_sents: sents };
    taggers::compose_specs(&config.backoff_chain(), &data).expect("failed to train");
}

fn train_benchmark(c: &mut Criterion) {
    let sents = synthetic(2000);
    let config = ExperimentConfig::default();
    c.bench_function("train", |b| b.iter(|| train(black_box(&sents), black_box(&config))));
}

criterion_group! {
    name = benchmarks;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = train_benchmark
}

criterion_main!(benchmarks);
