//! Tagging strategies and their composition into backoff chains.
//!
//! Every tagger either resolves a token itself or defers to its backoff
//! tagger. Tokens are tagged left to right, and the tags already assigned
//! in the current sentence are passed along as history so that n-gram
//! taggers can condition on them.

use crate::{Error, Result};

pub mod backoff;
pub mod default;
pub mod lookup;
pub mod ngram;
pub mod regexp;

pub use backoff::{compose, compose_specs, Build, TaggerSpec, TrainingData};
pub use default::DefaultTagger;
pub use lookup::LookupTagger;
pub use ngram::NgramTagger;
pub use regexp::RegexpTagger;

pub trait Tagger: Send + Sync {
    fn name(&self) -> &str;

    /// The tag for `tokens[index]`, or `None` to defer to the backoff tagger.
    ///
    /// `history` holds the tags assigned to `tokens[..index]` in this call.
    fn choose_tag(&self, tokens: &[&str], index: usize, history: &[&str]) -> Option<&str>;

    fn backoff(&self) -> Option<&dyn Tagger>;

    fn tag_one(&self, tokens: &[&str], index: usize, history: &[&str]) -> Result<&str> {
        if let Some(tag) = self.choose_tag(tokens, index, history) {
            return Ok(tag);
        }
        match self.backoff() {
            Some(backoff) => backoff.tag_one(tokens, index, history),
            None => Err(Error::NoTag { token: tokens[index].to_string(), index }),
        }
    }

    /// Tags a whole sentence; the output has one tag per input token.
    fn tag_tokens(&self, tokens: &[&str]) -> Result<Vec<&str>> {
        let mut tags: Vec<&str> = Vec::with_capacity(tokens.len());
        for index in 0..tokens.len() {
            let tag = self.tag_one(tokens, index, &tags)?;
            tags.push(tag);
        }
        Ok(tags)
    }

    fn tag(&self, tokens: &[&str]) -> Result<Vec<(String, String)>> {
        let tags = self.tag_tokens(tokens)?;
        Ok(tokens.iter().zip(tags).map(|(word, tag)| (word.to_string(), tag.to_string())).collect())
    }
}

/// Names of the taggers in a chain, outermost first.
pub fn chain_names(tagger: &dyn Tagger) -> Vec<String> {
    let mut names = vec![tagger.name().to_string()];
    let mut current = tagger.backoff();
    while let Some(t) = current {
        names.push(t.name().to_string());
        current = t.backoff();
    }
    names
}
