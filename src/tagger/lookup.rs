use std::{collections::HashMap, sync::Arc};

use super::Tagger;
use crate::frequency::{build_conditional_frequency, build_frequency};

/// A fixed word to tag table covering the most frequent words of a corpus.
pub struct LookupTagger {
    model: HashMap<String, String>,
    backoff: Option<Arc<dyn Tagger>>,
}

impl LookupTagger {
    /// Keeps the `top_n` most frequent `words`, each mapped to its most
    /// frequent tag in `tagged_words`.
    pub fn train<W, T>(words: &[W], tagged_words: &[(W, T)], backoff: Option<Arc<dyn Tagger>>, top_n: usize) -> Self
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        let fd = build_frequency(words.iter().map(W::as_ref));
        let cfd = build_conditional_frequency(tagged_words.iter().map(|(w, t)| (w.as_ref(), t.as_ref())));
        let model: HashMap<String, String> = fd
            .most_common(top_n)
            .into_iter()
            .filter_map(|(&word, _)| cfd.most_frequent_outcome(&word).map(|&tag| (word.to_string(), tag.to_string())))
            .collect();
        log::info!("lookup: {} of {} words kept", model.len(), fd.len());
        Self { model, backoff }
    }

    pub fn from_model(model: HashMap<String, String>, backoff: Option<Arc<dyn Tagger>>) -> Self {
        Self { model, backoff }
    }

    pub fn len(&self) -> usize {
        self.model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }
}

impl Tagger for LookupTagger {
    fn name(&self) -> &str {
        "lookup"
    }

    fn choose_tag(&self, tokens: &[&str], index: usize, _history: &[&str]) -> Option<&str> {
        self.model.get(tokens[index]).map(String::as_str)
    }

    fn backoff(&self) -> Option<&dyn Tagger> {
        self.backoff.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tagger::DefaultTagger, Error};

    #[test]
    fn keeps_only_top_n_words() {
        let words = ["cat", "cat", "dog"];
        let tagged = [("cat", "NOUN"), ("cat", "NOUN"), ("dog", "VERB")];
        let fallback: Arc<dyn Tagger> = Arc::new(DefaultTagger::new("X"));
        let tagger = LookupTagger::train(&words, &tagged, Some(fallback), 1);
        assert_eq!(tagger.len(), 1);
        assert_eq!(tagger.tag_tokens(&["cat", "dog"]).unwrap(), vec!["NOUN", "X"]);
    }

    #[test]
    fn unknown_word_without_backoff() {
        let tagger = LookupTagger::train(&["a"], &[("a", "DT")], None, 10);
        assert!(matches!(tagger.tag_tokens(&["b"]), Err(Error::NoTag { .. })));
    }

    #[test]
    fn prebuilt_model() {
        let model = HashMap::from([("the".to_string(), "AT".to_string()), ("ran".to_string(), "VBD".to_string())]);
        let fallback: Arc<dyn Tagger> = Arc::new(DefaultTagger::new("NN"));
        let tagger = LookupTagger::from_model(model, Some(fallback));
        assert_eq!(tagger.len(), 2);
        assert_eq!(tagger.tag_tokens(&["the", "dog", "ran"]).unwrap(), vec!["AT", "NN", "VBD"]);
    }

    #[test]
    fn word_without_tagged_occurrence_is_skipped() {
        let tagger = LookupTagger::train(&["a", "b"], &[("a", "DT")], None, 10);
        assert_eq!(tagger.len(), 1);
    }
}
