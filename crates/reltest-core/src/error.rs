use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Programmed outcome handed back to the code under test.
/// Not an engine failure: returned verbatim from a matched expectation.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Distinguished convenience error for a dropped connection.
    #[must_use]
    pub fn connection_closed() -> Self {
        Self::new(ErrorKind::ConnectionClosed, "reltest: connection closed")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    #[must_use]
    pub const fn is_connection_closed(&self) -> bool {
        matches!(self.kind, ErrorKind::ConnectionClosed)
    }

    #[must_use]
    pub fn display_with_kind(&self) -> String {
        format!("{}: {}", self.kind, self.message)
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    ConnectionClosed,
    NotFound,
    Conflict,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ConnectionClosed => "connection_closed",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ExpectationError
///
/// Engine diagnostics. The `Display` output is exactly what the failure
/// sink receives.
///
/// UnmatchedCall is fatal; NotCalled and CalledTooFew are reported softly so
/// that one teardown can list every unmet expectation.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ExpectationError {
    #[error(
        "FAIL: unexpected call, no registered expectation matched:\n\tcall:     {call}\n\texpected: {}{}",
        render_candidates(.candidates, .omitted),
        render_suggestion(.suggestion)
    )]
    UnmatchedCall {
        call: String,
        candidates: Vec<String>,
        omitted: usize,
        suggestion: Option<String>,
    },

    #[error("FAIL: mock defined but not called:\n\t{expectation}")]
    NotCalled { expectation: String },

    #[error(
        "FAIL: mock defined but called {calls} time(s), expected {expected} time(s):\n\t{expectation}"
    )]
    CalledTooFew {
        expectation: String,
        calls: u32,
        expected: u32,
    },
}

impl ExpectationError {
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::UnmatchedCall { .. })
    }
}

fn render_candidates(candidates: &[String], omitted: &usize) -> String {
    if candidates.is_empty() {
        return "<none registered>".to_string();
    }

    let mut out = String::new();
    for (i, candidate) in candidates.iter().enumerate() {
        out.push_str(&format!("\n\t  {}. {candidate}", i + 1));
    }
    if *omitted > 0 {
        out.push_str(&format!("\n\t  ... and {omitted} more"));
    }

    out
}

fn render_suggestion(suggestion: &Option<String>) -> String {
    suggestion.as_deref().map_or_else(String::new, |s| {
        format!("\n\n\tto accept this call, register:\n\t  {s}")
    })
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
