use std::{collections::HashMap, sync::Arc};

use super::Tagger;
use crate::{dataset::TaggedSentence, frequency::ConditionalFreqDist, Error, Result};

/// Preceding tags (at most `n - 1`, fewer at the start of a sentence) and the current token.
type Context = (Vec<String>, String);

/// Tag histories of one token, nearest preceding tag first.
#[derive(Debug, Default)]
struct HistoryNode {
    tag: Option<String>,
    next: HashMap<String, HistoryNode>,
}

impl HistoryNode {
    fn insert(&mut self, history: &[String], tag: String) {
        let node = history.iter().rev().fold(self, |node, t| node.next.entry(t.clone()).or_default());
        node.tag = Some(tag);
    }

    fn get(&self, history: &[&str]) -> Option<&str> {
        let mut node = self;
        for t in history.iter().rev() {
            node = node.next.get(*t)?;
        }
        node.tag.as_deref()
    }

    fn len(&self) -> usize {
        usize::from(self.tag.is_some()) + self.next.values().map(HistoryNode::len).sum::<usize>()
    }
}

/// Tags a token with the tag seen most often in its context during training.
///
/// The context is the token itself plus the `n - 1` tags assigned before
/// it. While tagging, those are the tags this chain produced for the
/// preceding tokens, not gold tags, so earlier mistakes feed into later
/// contexts.
pub struct NgramTagger {
    n: usize,
    name: String,
    /// token -> preceding tags -> tag
    model: HashMap<String, HistoryNode>,
    backoff: Option<Arc<dyn Tagger>>,
}

impl NgramTagger {
    /// A context is kept only if its most frequent tag was seen more than
    /// `cutoff` times in it.
    pub fn train(n: usize, train_sents: &[TaggedSentence], backoff: Option<Arc<dyn Tagger>>, cutoff: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidConfig("n-gram order must be at least 1".to_string()));
        }
        let mut cfd: ConditionalFreqDist<Context, String> = ConditionalFreqDist::new();
        for sentence in train_sents {
            for (index, (word, tag)) in sentence.iter().enumerate() {
                let start = (index + 1).saturating_sub(n);
                let history: Vec<String> = sentence[start..index].iter().map(|(_, t)| t.clone()).collect();
                cfd.add((history, word.clone()), tag.clone());
            }
        }

        let mut model: HashMap<String, HistoryNode> = HashMap::new();
        let mut kept = 0;
        for ((history, word), fd) in cfd.iter() {
            let Some(best) = fd.max() else { continue };
            if fd.count(best) <= cutoff {
                continue;
            }
            model.entry(word.clone()).or_default().insert(history, best.clone());
            kept += 1;
        }
        let name = match n {
            1 => "unigram".to_string(),
            2 => "bigram".to_string(),
            3 => "trigram".to_string(),
            n => format!("{n}-gram"),
        };
        log::info!("{name}: {kept} of {} contexts kept (cutoff {cutoff})", cfd.conditions().len());
        Ok(Self { n, name, model, backoff })
    }

    pub fn unigram(train_sents: &[TaggedSentence], backoff: Option<Arc<dyn Tagger>>) -> Result<Self> {
        Self::train(1, train_sents, backoff, 0)
    }

    pub fn bigram(train_sents: &[TaggedSentence], backoff: Option<Arc<dyn Tagger>>, cutoff: usize) -> Result<Self> {
        Self::train(2, train_sents, backoff, cutoff)
    }

    pub fn trigram(train_sents: &[TaggedSentence], backoff: Option<Arc<dyn Tagger>>, cutoff: usize) -> Result<Self> {
        Self::train(3, train_sents, backoff, cutoff)
    }

    pub fn order(&self) -> usize {
        self.n
    }

    /// Number of contexts kept after the cutoff.
    pub fn len(&self) -> usize {
        self.model.values().map(HistoryNode::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }
}

impl Tagger for NgramTagger {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_tag(&self, tokens: &[&str], index: usize, history: &[&str]) -> Option<&str> {
        let start = (index + 1).saturating_sub(self.n);
        self.model.get(tokens[index])?.get(&history[start..index])
    }

    fn backoff(&self) -> Option<&dyn Tagger> {
        self.backoff.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::DefaultTagger;

    fn sent(pairs: &[(&str, &str)]) -> TaggedSentence {
        pairs.iter().map(|(w, t)| (w.to_string(), t.to_string())).collect()
    }

    fn fallback() -> Option<Arc<dyn Tagger>> {
        Some(Arc::new(DefaultTagger::new("FALLBACK")))
    }

    #[test]
    fn unigram_most_frequent_tag() {
        let train = vec![
            sent(&[("the", "AT"), ("run", "NN")]),
            sent(&[("run", "VB"), ("run", "NN")]),
        ];
        let tagger = NgramTagger::unigram(&train, fallback()).unwrap();
        assert_eq!(tagger.tag_tokens(&["run", "the", "cat"]).unwrap(), vec!["NN", "AT", "FALLBACK"]);
    }

    #[test]
    fn unigram_tie_goes_to_first_seen() {
        let train = vec![sent(&[("run", "VB"), ("run", "NN")])];
        let tagger = NgramTagger::unigram(&train, None).unwrap();
        assert_eq!(tagger.tag_tokens(&["run"]).unwrap(), vec!["VB"]);
    }

    #[test]
    fn bigram_cutoff() {
        let train = vec![sent(&[("the", "DET"), ("cat", "NOUN")]), sent(&[("the", "DET"), ("cat", "NOUN")])];
        let det: Arc<dyn Tagger> = Arc::new(DefaultTagger::new("DET"));

        let tagger = NgramTagger::bigram(&train, Some(det.clone()), 0).unwrap();
        assert_eq!(tagger.tag_tokens(&["the", "cat"]).unwrap(), vec!["DET", "NOUN"]);

        let tagger = NgramTagger::bigram(&train, Some(det), 3).unwrap();
        assert!(tagger.is_empty());
        assert_eq!(tagger.tag_tokens(&["the", "cat"]).unwrap(), vec!["DET", "DET"]);
    }

    #[test]
    fn bigram_uses_assigned_tags_as_context() {
        let train = vec![sent(&[("a", "X"), ("b", "Y")]), sent(&[("c", "Z"), ("b", "W")])];
        let tagger = NgramTagger::bigram(&train, fallback(), 0).unwrap();
        // "a" was only seen at sentence start, so after a fallback tag neither "a" nor "b" has a context
        assert_eq!(tagger.tag_tokens(&["c", "b"]).unwrap(), vec!["Z", "W"]);
        assert_eq!(tagger.tag_tokens(&["x", "a", "b"]).unwrap(), vec!["FALLBACK", "FALLBACK", "FALLBACK"]);
    }

    #[test]
    fn trigram_context() {
        let train = vec![sent(&[("a", "A"), ("b", "B"), ("c", "C1")]), sent(&[("x", "X"), ("b", "B"), ("c", "C2")])];
        let tagger = NgramTagger::trigram(&train, fallback(), 0).unwrap();
        assert_eq!(tagger.order(), 3);
        assert_eq!(tagger.tag_tokens(&["a", "b", "c"]).unwrap(), vec!["A", "B", "C1"]);
        assert_eq!(tagger.tag_tokens(&["x", "b", "c"]).unwrap(), vec!["X", "B", "C2"]);
    }

    #[test]
    fn cutoff_counts_most_frequent_tag() {
        let train = vec![
            sent(&[("a", "X"), ("b", "A")]),
            sent(&[("a", "X"), ("b", "A")]),
            sent(&[("a", "X"), ("b", "B")]),
        ];
        // (X, b) was seen three times but its best tag only twice
        let tagger = NgramTagger::bigram(&train, fallback(), 2).unwrap();
        assert_eq!(tagger.tag_tokens(&["a", "b"]).unwrap(), vec!["X", "FALLBACK"]);
        assert_eq!(tagger.len(), 1);

        let tagger = NgramTagger::bigram(&train, fallback(), 1).unwrap();
        assert_eq!(tagger.tag_tokens(&["a", "b"]).unwrap(), vec!["X", "A"]);
        assert_eq!(tagger.len(), 2);
    }

    #[test]
    fn shorter_history_is_a_separate_context() {
        let train = vec![sent(&[("b", "S")]), sent(&[("a", "X"), ("b", "A")])];
        let tagger = NgramTagger::trigram(&train, fallback(), 0).unwrap();
        assert_eq!(tagger.len(), 3);
        assert_eq!(tagger.tag_tokens(&["b"]).unwrap(), vec!["S"]);
        assert_eq!(tagger.tag_tokens(&["a", "b"]).unwrap(), vec!["X", "A"]);
        assert_eq!(tagger.tag_tokens(&["c", "b"]).unwrap(), vec!["FALLBACK", "FALLBACK"]);
    }

    #[test]
    fn order_zero_rejected() {
        assert!(matches!(NgramTagger::train(0, &[], None, 0), Err(Error::InvalidConfig(..))));
    }
}
