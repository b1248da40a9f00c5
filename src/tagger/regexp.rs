use std::sync::Arc;

use regex::Regex;

use super::Tagger;
use crate::Result;

/// Tags a token with the tag of the first rule whose pattern matches it.
///
/// Rules are tried in order. A pattern must match at the start of the token,
/// but may stop short of its end unless it ends in `$`. A rule list ending in
/// a catch-all such as `.*` never defers, which makes any backoff tagger
/// unreachable.
pub struct RegexpTagger {
    rules: Vec<(Regex, String)>,
    backoff: Option<Arc<dyn Tagger>>,
}

impl RegexpTagger {
    pub fn new<P, T>(rules: &[(P, T)], backoff: Option<Arc<dyn Tagger>>) -> Result<Self>
    where
        P: AsRef<str>,
        T: AsRef<str>,
    {
        let rules = rules
            .iter()
            .map(|(pattern, tag)| {
                let re = Regex::new(&format!("^(?:{})", pattern.as_ref()))?;
                Ok((re, tag.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules, backoff })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Tagger for RegexpTagger {
    fn name(&self) -> &str {
        "regexp"
    }

    fn choose_tag(&self, tokens: &[&str], index: usize, _history: &[&str]) -> Option<&str> {
        let token = tokens[index];
        self.rules.iter().find(|(re, _)| re.is_match(token)).map(|(_, tag)| tag.as_str())
    }

    fn backoff(&self) -> Option<&dyn Tagger> {
        self.backoff.as_deref()
    }
}

/// Suffix rules for English text, ending in the `.*` catch-all.
pub fn english_rules() -> Vec<(String, String)> {
    [
        (r".*ing$", "VBG"),
        (r".*ed$", "VBD"),
        (r".*es$", "VBZ"),
        (r".*ould$", "MD"),
        (r".*'s$", "NN$"),
        (r".*s$", "NNS"),
        (r"^-?[0-9]+(.[0-9]+)?$", "CD"),
        (r".*", "NN"),
    ]
    .into_iter()
    .map(|(p, t)| (p.to_string(), t.to_string()))
    .collect()
}
