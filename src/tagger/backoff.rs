use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{DefaultTagger, LookupTagger, NgramTagger, RegexpTagger, Tagger};
use crate::{dataset::TaggedSentence, Error, Result};

/// Builds one tagger on top of the backoff tagger built before it.
pub type Build<'a> = Box<dyn FnOnce(Option<Arc<dyn Tagger>>) -> Result<Arc<dyn Tagger>> + 'a>;

/// Chains taggers so that each one becomes the backoff of the next.
///
/// The first builder produces the innermost tagger and the last one the
/// tagger that is actually invoked.
pub fn compose<'a, I>(builders: I) -> Result<Arc<dyn Tagger>>
where
    I: IntoIterator<Item = Build<'a>>,
{
    let mut tagger: Option<Arc<dyn Tagger>> = None;
    for build in builders {
        tagger = Some(build(tagger)?);
    }
    tagger.ok_or(Error::EmptyInput("backoff chain"))
}

/// Config-driven front of [`compose`].
pub fn compose_specs<'a>(specs: &'a [TaggerSpec], data: &'a TrainingData<'a>) -> Result<Arc<dyn Tagger>> {
    compose(specs.iter().map(|spec| {
        let build: Build<'a> = Box::new(move |backoff: Option<Arc<dyn Tagger>>| spec.build(data, backoff));
        build
    }))
}

/// Training material shared by every tagger of a chain.
#[derive(Debug, Clone, Copy)]
pub struct TrainingData<'a> {
    /// Vocabulary the lookup tagger ranks by frequency.
    pub words: &'a [&'a str],
    pub tagged_words: &'a [(&'a str, &'a str)],
    pub train_sents: &'a [TaggedSentence],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaggerSpec {
    Default { tag: String },
    Regex { rules: Vec<(String, String)> },
    Lookup { top_n: usize },
    Unigram,
    Bigram { cutoff: i64 },
    Trigram { cutoff: i64 },
}

impl TaggerSpec {
    pub fn build(&self, data: &TrainingData, backoff: Option<Arc<dyn Tagger>>) -> Result<Arc<dyn Tagger>> {
        let tagger: Arc<dyn Tagger> = match self {
            Self::Default { tag } => Arc::new(DefaultTagger::new(tag.as_str())),
            Self::Regex { rules } => Arc::new(RegexpTagger::new(rules, backoff)?),
            Self::Lookup { top_n } => Arc::new(LookupTagger::train(data.words, data.tagged_words, backoff, *top_n)),
            Self::Unigram => Arc::new(NgramTagger::unigram(data.train_sents, backoff)?),
            Self::Bigram { cutoff } => Arc::new(NgramTagger::bigram(data.train_sents, backoff, check_cutoff(*cutoff)?)?),
            Self::Trigram { cutoff } => Arc::new(NgramTagger::trigram(data.train_sents, backoff, check_cutoff(*cutoff)?)?),
        };
        Ok(tagger)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Default { .. } => "Default",
            Self::Regex { .. } => "Regex",
            Self::Lookup { .. } => "Lookup",
            Self::Unigram => "Unigram",
            Self::Bigram { .. } => "Bigram",
            Self::Trigram { .. } => "Trigram",
        }
    }
}

pub(crate) fn check_cutoff(cutoff: i64) -> Result<usize> {
    usize::try_from(cutoff).map_err(|_| Error::InvalidCutoff(cutoff))
}
