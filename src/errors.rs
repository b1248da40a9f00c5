use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A chain was asked to tag a token that no tagger in it resolves.
    #[error("no tag for token {token:?} at position {index}")]
    NoTag { token: String, index: usize },
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
    #[error("length mismatch: {gold} gold tags, {predicted} predicted tags")]
    LengthMismatch { gold: usize, predicted: usize },
    #[error("invalid cutoff: {0} (must be >= 0)")]
    InvalidCutoff(i64),
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
