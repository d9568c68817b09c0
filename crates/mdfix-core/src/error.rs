use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while patching a single file. Recorded on the outcome, never
/// propagated out of a batch.
#[derive(Debug, Error)]
pub enum FixError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    Encoding { path: PathBuf },
}

impl FixError {
    pub fn from_io(path: &std::path::Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FixError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FixError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("search text must not be empty")]
    EmptySearch,

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern '{pattern}' matches empty text")]
    MatchesEmpty { pattern: String },
}
