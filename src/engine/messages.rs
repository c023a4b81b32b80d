use std::fmt;

use crate::domain::Payload;
use crate::error::FetchError;

/// Whether missing upstream data sank one entry or the whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingScope {
    Partial,
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Timeout,
    Transport,
    Http(u16),
    Decode,
    UpstreamDataMissing(MissingScope),
    Unexpected,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCategory::Timeout => write!(f, "timeout"),
            FailureCategory::Transport => write!(f, "transport error"),
            FailureCategory::Http(status) => write!(f, "HTTP {}", status),
            FailureCategory::Decode => write!(f, "malformed response"),
            FailureCategory::UpstreamDataMissing(MissingScope::Partial) => {
                write!(f, "data missing (partial)")
            }
            FailureCategory::UpstreamDataMissing(MissingScope::Total) => write!(f, "data missing"),
            FailureCategory::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// A failed fetch: category plus the full human-readable reason.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    pub category: FailureCategory,
    pub message: String,
}

impl FetchFailure {
    pub fn new(category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn missing(scope: MissingScope, message: impl Into<String>) -> Self {
        Self::new(FailureCategory::UpstreamDataMissing(scope), message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(FailureCategory::Unexpected, message)
    }

    /// First `max_chars` characters of the message, with "..." when cut.
    pub fn display_message(&self, max_chars: usize) -> String {
        truncate_chars(&self.message, max_chars)
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

impl From<FetchError> for FetchFailure {
    fn from(err: FetchError) -> Self {
        let category = match &err {
            FetchError::Timeout(_) => FailureCategory::Timeout,
            FetchError::Transport(_) => FailureCategory::Transport,
            FetchError::Http { status, .. } => FailureCategory::Http(*status),
            FetchError::Decode(_) => FailureCategory::Decode,
            FetchError::DataMissing(_) => {
                FailureCategory::UpstreamDataMissing(MissingScope::Total)
            }
            FetchError::Unexpected(_) => FailureCategory::Unexpected,
        };
        Self::new(category, err.to_string())
    }
}

/// What a fetch operation hands to its result channel. Exactly one per operation.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Success(Payload),
    Failure(FetchFailure),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchResult::Failure(f) => Some(f),
            FetchResult::Success(_) => None,
        }
    }
}

impl From<Result<Payload, FetchFailure>> for FetchResult {
    fn from(res: Result<Payload, FetchFailure>) -> Self {
        match res {
            Ok(payload) => FetchResult::Success(payload),
            Err(failure) => FetchResult::Failure(failure),
        }
    }
}

/// Char-boundary safe truncation.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
