use std::fmt;

/// The single failure kind of the board API.
///
/// Transport failures, non-success statuses and undecodable bodies all
/// collapse into this one type; `status` is kept for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkError {
    pub status: Option<u16>,
    pub message: String,
}

impl NetworkError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "network error (HTTP {status}): {}", self.message),
            None => write!(f, "network error: {}", self.message),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
