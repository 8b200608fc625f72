use thiserror::Error;

#[derive(Debug, Error)]
pub enum MolevalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{kind} benchmark suite \"{version}\" does not exist")]
    UnknownSuite { kind: String, version: String },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MolevalError {
    /// Build the unrecognized-version error raised at suite-selection time.
    pub fn unknown_suite(kind: &str, version: &str) -> Self {
        MolevalError::UnknownSuite {
            kind: kind.to_string(),
            version: version.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MolevalError>;
