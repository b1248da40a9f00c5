//! Part-of-speech taggers chained through a backoff model, and the
//! measures used to compare them.
//!
//! ```no_run
//! use taggers::{evaluation, Corpus, ExperimentConfig, TaggedCorpus, TrainingData};
//!
//! let corpus = Corpus::from_dir("brown").unwrap();
//! let config = ExperimentConfig::default();
//! let sents = corpus.tagged_sents("news");
//! let (train, test) = taggers::dataset::split_sentences(sents, config.train_ratio);
//! let words = corpus.words("news");
//! let tagged_words = corpus.tagged_words("news");
//! let data = TrainingData { words: &words, tagged_words: &tagged_words, train_sents: train };
//! let tagger = taggers::compose_specs(&config.backoff_chain(), &data).unwrap();
//! println!("{}", evaluation::accuracy(tagger.as_ref(), test).unwrap());
//! ```

mod errors;

pub mod config;
pub mod dataset;
pub mod evaluation;
pub mod frequency;
pub mod report;
pub mod tagger;

pub use config::ExperimentConfig;
pub use dataset::{Corpus, TaggedCorpus, TaggedSentence, TaggedToken};
pub use errors::{Error, Result};
pub use evaluation::{ConfusionMatrix, Evaluation, FormatOptions, SetScores};
pub use frequency::{ConditionalFreqDist, FreqDist};
pub use report::{JsonReporter, Reporter};
pub use tagger::{compose, compose_specs, Tagger, TaggerSpec, TrainingData};

/// The most frequent tag of `category`, `None` if it has no tokens.
///
/// Tags are counted as the corpus stores them. No mapping to a coarser
/// tagset is applied, so Brown text reports tags such as `NN` rather than
/// `NOUN`.
pub fn most_common_tag<C: TaggedCorpus + ?Sized>(corpus: &C, category: &str) -> Option<String> {
    let fd: FreqDist<&str> = corpus.tagged_words(category).into_iter().map(|(_, tag)| tag).collect();
    fd.max().map(|tag| tag.to_string())
}
