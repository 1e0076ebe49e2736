use thiserror::Error;

/// Failure of a single request attempt.
///
/// Carries rendered messages instead of source errors so one failed
/// in-flight fetch can be handed to every caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("background fetch did not complete: {0}")]
    Task(String),
}

impl ApiError {
    pub(crate) fn transport(url: &str, error: &reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    pub(crate) fn decode(url: &str, error: &impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
