// ABOUTME: Structured error type returned by SSH config parsing and include loading
// ABOUTME: Wraps failures with the include pattern or file that produced them

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read SSH config file: {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: `{directive}` is missing its {missing}")]
    MalformedDirective {
        line: usize,
        directive: String,
        missing: &'static str,
    },

    #[error("invalid include pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("include nesting exceeds the limit of {depth}")]
    IncludeDepthExceeded { depth: usize },

    #[error("failed to load include `{pattern}`")]
    Include {
        pattern: String,
        #[source]
        source: Box<ParseError>,
    },

    #[error("failed to parse included file: {}", .path.display())]
    Included {
        path: PathBuf,
        #[source]
        source: Box<ParseError>,
    },
}

/// The underlying failure once include context has been peeled away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    MalformedDirective,
    InvalidPattern,
    IncludeDepthExceeded,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            ParseError::MalformedDirective { .. } => ErrorKind::MalformedDirective,
            ParseError::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            ParseError::IncludeDepthExceeded { .. } => ErrorKind::IncludeDepthExceeded,
            ParseError::Include { source, .. } | ParseError::Included { source, .. } => {
                source.kind()
            }
        }
    }

    pub(crate) fn malformed(line: usize, directive: &str, missing: &'static str) -> Self {
        ParseError::MalformedDirective {
            line,
            directive: directive.to_string(),
            missing,
        }
    }
}
