//! Error types for niklanson.

use thiserror::Error;

/// Result type for niklanson operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for niklanson operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required key is absent, a field failed to decode, or an invariant of
    /// the annotation structure is violated. `detail` carries the JSON path
    /// where one is known.
    #[error("invalid {kind}: {detail}")]
    Structural {
        /// Entity kind being constructed (e.g. `"sentence"`).
        kind: &'static str,
        /// What went wrong, with JSON path context where available.
        detail: String,
    },

    /// Construction was attempted from the wrong JSON shape (e.g. a scalar
    /// where a mapping was expected).
    #[error("cannot build {kind} from {found}, expected {expected}")]
    Type {
        /// Entity kind being constructed.
        kind: &'static str,
        /// The JSON shape the constructor accepts.
        expected: &'static str,
        /// The JSON shape it was given.
        found: &'static str,
    },

    /// A lookup found nothing: an extra field that was never set, a character
    /// position covered by no word, or a derived identifier requested before
    /// its inputs exist.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// A sentence id that does not decompose into 2 or 4 dot-separated
    /// components, or whose numeric components do not parse.
    #[error("malformed sentence id `{id}`: {detail}")]
    SentenceId {
        /// The offending id, verbatim.
        id: String,
        /// Why it could not be decomposed.
        detail: String,
    },

    /// Input text is not valid JSON.
    #[error("parse error for {kind}: {detail}")]
    Parse {
        /// Entity kind being constructed.
        kind: &'static str,
        /// The underlying JSON syntax error.
        detail: String,
    },

    /// IO error (file-backed reader only).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a structural error.
    #[must_use]
    pub fn structural(kind: &'static str, detail: impl ToString) -> Self {
        Self::Structural {
            kind,
            detail: detail.to_string(),
        }
    }

    /// Create a type error for a constructor given the wrong JSON shape.
    #[must_use]
    pub fn expected(kind: &'static str, expected: &'static str, found: &'static str) -> Self {
        Self::Type {
            kind,
            expected,
            found,
        }
    }

    /// Create a lookup error.
    #[must_use]
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Create a sentence-id format error.
    #[must_use]
    pub fn sentence_id(id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SentenceId {
            id: id.into(),
            detail: detail.into(),
        }
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(kind: &'static str, detail: impl ToString) -> Self {
        Self::Parse {
            kind,
            detail: detail.to_string(),
        }
    }

    /// Wrap an element-construction error with its list index.
    #[must_use]
    pub fn element(kind: &'static str, index: usize, source: Error) -> Self {
        Self::Structural {
            kind,
            detail: format!("[{index}]: {source}"),
        }
    }
}
