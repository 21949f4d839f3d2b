use std::path::PathBuf;
use thiserror::Error;

use crate::grammar::GrammarError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A dictionary could not be read or parsed. Fatal at setup.
    #[error("Failed to load dictionary {language} from {}: {message}", dir.display())]
    Dictionary {
        language: String,
        dir: PathBuf,
        message: String,
    },

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Grammar service error: {0}")]
    Grammar(#[from] GrammarError),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
