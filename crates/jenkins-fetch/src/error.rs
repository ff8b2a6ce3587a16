//! Error types for jenkins-fetch.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("GET {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Syntax(#[from] MetadataSyntaxError),

    #[error("decode build metadata: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("{}: already exists and replace not requested", path.display())]
    DestinationExists { path: PathBuf },

    #[error("{op} {}: {source}", path.display())]
    Filesystem {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("artifact file name {0:?} is not a plain file name")]
    InvalidFileName(String),
}

impl Error {
    pub(crate) fn transport(
        url: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn fs(op: FsOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Filesystem step that failed during a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    Stat,
    Remove,
    Create,
    Write,
    Sync,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsOp::Stat => write!(f, "stat"),
            FsOp::Remove => write!(f, "remove"),
            FsOp::Create => write!(f, "create"),
            FsOp::Write => write!(f, "write"),
            FsOp::Sync => write!(f, "sync"),
        }
    }
}

/// Malformed JSON in a metadata response.
///
/// Keeps the whole body so callers can show where decoding stopped.
#[derive(Debug, Error)]
#[error("{message} (offset {offset})")]
pub struct MetadataSyntaxError {
    pub raw: String,
    pub message: String,
    pub offset: usize,
}

impl MetadataSyntaxError {
    /// The part of the body surrounding `offset`, at most `radius` bytes each side.
    pub fn excerpt(&self, radius: usize) -> &str {
        let mut start = self.offset.saturating_sub(radius);
        let mut end = (self.offset + radius).min(self.raw.len());
        while !self.raw.is_char_boundary(start) {
            start -= 1;
        }
        while !self.raw.is_char_boundary(end) {
            end += 1;
        }
        &self.raw[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_clamps_to_body() {
        let err = MetadataSyntaxError {
            raw: "{\"id\": ]".to_string(),
            message: "expected value".to_string(),
            offset: 8,
        };
        assert_eq!(err.excerpt(3), ": ]");
        assert_eq!(err.excerpt(100), "{\"id\": ]");
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let err = MetadataSyntaxError {
            raw: "ééé".to_string(),
            message: "bad".to_string(),
            offset: 3,
        };
        assert_eq!(err.excerpt(1), "é");
    }

    #[test]
    fn test_destination_exists_message_names_path() {
        let err = Error::DestinationExists {
            path: PathBuf::from("out/app.jar"),
        };
        assert!(err.to_string().starts_with("out/app.jar"));
    }
}
