use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{Error, Result};

pub type TaggedToken = (String, String);
pub type TaggedSentence = Vec<TaggedToken>;

/// Read-only access to a corpus of tagged sentences grouped into categories.
pub trait TaggedCorpus {
    fn categories(&self) -> Vec<&str>;
    fn tagged_sents(&self, category: &str) -> &[TaggedSentence];

    fn words(&self, category: &str) -> Vec<&str> {
        self.tagged_sents(category)
            .iter()
            .flatten()
            .map(|(word, _)| word.as_str())
            .collect()
    }

    fn tagged_words(&self, category: &str) -> Vec<(&str, &str)> {
        self.tagged_sents(category)
            .iter()
            .flatten()
            .map(|(word, tag)| (word.as_str(), tag.as_str()))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct Category {
    pub name: String,
    pub sentences: Vec<TaggedSentence>,
}

impl Category {
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn total_items(&self) -> usize {
        self.sentences.iter().map(|x| x.len()).sum()
    }
}

/// A corpus in the Brown distribution layout.
///
/// The directory holds `cats.txt`, one `<fileid> <category>` pair per line,
/// and one file per id. Every non-blank line of a file is a sentence of
/// whitespace separated `word/tag` tokens.
#[derive(Debug, Default)]
pub struct Corpus {
    categories: Vec<Category>,
}

impl Corpus {
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let cats = BufReader::new(File::open(dir.join("cats.txt"))?);
        let mut corpus = Corpus::default();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for line in cats.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (fileid, category) = line
                .split_once(char::is_whitespace)
                .map(|(f, c)| (f, c.trim()))
                .ok_or_else(|| Error::InvalidCorpus(format!("invalid cats.txt line: {line}")))?;
            let idx = *positions.entry(category.to_string()).or_insert_with(|| {
                corpus.categories.push(Category { name: category.to_string(), sentences: Vec::new() });
                corpus.categories.len() - 1
            });
            let f = File::open(dir.join(fileid))?;
            let sentences = read_sentences(BufReader::new(f))?;
            log::debug!("{fileid}: {} sentences ({category})", sentences.len());
            corpus.categories[idx].sentences.extend(sentences);
        }
        if corpus.categories.is_empty() {
            return Err(Error::InvalidCorpus(format!("no categories in {}", dir.display())));
        }
        log::info!(
            "loaded {} categories, {} sentences",
            corpus.categories.len(),
            corpus.categories.iter().map(Category::len).sum::<usize>()
        );
        Ok(corpus)
    }

    /// Appends the sentences read from `reader` to `name`, creating the category if needed.
    pub fn read_category<R: BufRead>(&mut self, name: &str, reader: R) -> Result<()> {
        let sentences = read_sentences(reader)?;
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(category) => category.sentences.extend(sentences),
            None => self.categories.push(Category { name: name.to_string(), sentences }),
        }
        Ok(())
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl TaggedCorpus for Corpus {
    fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    fn tagged_sents(&self, category: &str) -> &[TaggedSentence] {
        self.category(category).map(|c| c.sentences.as_slice()).unwrap_or_default()
    }
}

/// Splits `word/tag` at the last slash; the tag is upper-cased.
pub fn parse_token(s: &str) -> Option<TaggedToken> {
    let (word, tag) = s.rsplit_once('/')?;
    if word.is_empty() || tag.is_empty() {
        return None;
    }
    Some((word.to_string(), tag.to_uppercase()))
}

pub fn read_sentences<R: BufRead>(reader: R) -> Result<Vec<TaggedSentence>> {
    let mut sentences = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut sentence = TaggedSentence::new();
        for s in line.split_whitespace() {
            match parse_token(s) {
                Some(token) => sentence.push(token),
                None => log::warn!("invalid token: {s}"),
            }
        }
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
    }
    Ok(sentences)
}

/// Partitions `sents` into (train, test) at `floor(len * ratio)`.
pub fn split_sentences(sents: &[TaggedSentence], ratio: f64) -> (&[TaggedSentence], &[TaggedSentence]) {
    let size = ((sents.len() as f64) * ratio) as usize;
    sents.split_at(size.min(sents.len()))
}

pub fn untag(sentence: &[TaggedToken]) -> Vec<&str> {
    sentence.iter().map(|(word, _)| word.as_str()).collect()
}
