use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taggers::{dataset::split_sentences, evaluation, Corpus, ExperimentConfig, TaggedCorpus, Tagger, TrainingData};

const SENTS: &str = "\
The/at jury/nn said/vbd it/pps did/dod find/vb that/cs many/ap of/in Atlanta's/np$ registration/nn practices/nns ./.
The/at jury/nn praised/vbn the/at administration/nn and/cc operation/nn of/in the/at Atlanta/np police/nn department/nn ./.
The/at election/nn was/bedz conducted/vbn ./.
It/pps urged/vbd that/cs the/at city/nn take/vb steps/nns ./.
";

fn predict(tagger: &dyn Tagger, corpus: &Corpus) {
    let acc = evaluation::accuracy(tagger, corpus.tagged_sents("news")).expect("failed to tag");
    assert!(acc > 0.0);
}

fn tag_benchmark(c: &mut Criterion) {
    let mut corpus = Corpus::default();
    for _ in 0..200 {
        corpus.read_category("news", SENTS.as_bytes()).expect("failed to read sentences");
    }
    let config = ExperimentConfig::default();
    let words = corpus.words("news");
    let tagged_words = corpus.tagged_words("news");
    let (train, _) = split_sentences(corpus.tagged_sents("news"), config.train_ratio);
    let data = TrainingData { words: &words, tagged_words: &tagged_words, train_sents: train };
    let tagger = taggers::compose_specs(&config.backoff_chain(), &data).expect("failed to train");

    c.bench_function("tag", |b| b.iter(|| predict(black_box(tagger.as_ref()), black_box(&corpus))));
}

criterion_group!(benchmarks, tag_benchmark);
criterion_main!(benchmarks);
