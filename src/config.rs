use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    tagger::{backoff::check_cutoff, regexp::english_rules, TaggerSpec},
    Error, Result,
};

/// Settings of one experiment run. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub default_tag: String,
    /// `(pattern, tag)` pairs, first match wins.
    pub rules: Vec<(String, String)>,
    /// Category the taggers are trained on.
    pub category: String,
    pub train_ratio: f64,
    pub lookup_top_n: usize,
    /// Model sizes tried by the lookup sweep.
    pub lookup_sizes: Vec<usize>,
    pub bigram_cutoff: i64,
    pub trigram_cutoff: i64,
    /// Tags shown in the confusion matrix.
    pub confusion_truncate: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            default_tag: "NN".to_string(),
            rules: english_rules(),
            category: "news".to_string(),
            train_ratio: 0.9,
            lookup_top_n: 100,
            lookup_sizes: (0..15).map(|i| 1 << i).collect(),
            bigram_cutoff: 0,
            trigram_cutoff: 2,
            confusion_truncate: 10,
        }
    }
}

impl ExperimentConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(f))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_cutoff(self.bigram_cutoff)?;
        check_cutoff(self.trigram_cutoff)?;
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(Error::InvalidConfig(format!("train_ratio must be in (0, 1), got {}", self.train_ratio)));
        }
        if self.rules.is_empty() {
            return Err(Error::InvalidConfig("rules must not be empty".to_string()));
        }
        Ok(())
    }

    /// The full chain, innermost first: default, regex, lookup, unigram, bigram, trigram.
    pub fn backoff_chain(&self) -> Vec<TaggerSpec> {
        vec![
            TaggerSpec::Default { tag: self.default_tag.clone() },
            TaggerSpec::Regex { rules: self.rules.clone() },
            TaggerSpec::Lookup { top_n: self.lookup_top_n },
            TaggerSpec::Unigram,
            TaggerSpec::Bigram { cutoff: self.bigram_cutoff },
            TaggerSpec::Trigram { cutoff: self.trigram_cutoff },
        ]
    }
}
