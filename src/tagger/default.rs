use super::Tagger;

/// Assigns the same tag to every token. Never defers, so it terminates a chain.
#[derive(Debug, Clone)]
pub struct DefaultTagger {
    tag: String,
}

impl DefaultTagger {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self { tag: tag.into() }
    }
}

impl Tagger for DefaultTagger {
    fn name(&self) -> &str {
        "default"
    }

    fn choose_tag(&self, _tokens: &[&str], _index: usize, _history: &[&str]) -> Option<&str> {
        Some(self.tag.as_str())
    }

    fn backoff(&self) -> Option<&dyn Tagger> {
        None
    }
}
