//! Failure taxonomy for search requests.

use serde::Deserialize;
use thiserror::Error;

/// Why a search attempt failed.
///
/// The `Display` output is the message shown to the user, so the variants
/// carrying diagnostic detail keep it out of the rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("request timed out")]
    TimeoutExceeded,
    #[error("cannot connect to server")]
    ConnectionRefused,
    #[error("server error, please try again later")]
    ServerFault { status: u16 },
    #[error("search endpoint not found")]
    NotFound,
    #[error("{0}")]
    Application(String),
    #[error("unexpected error")]
    Unknown(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl SearchError {
    /// Classify a non-2xx response from its status code and raw body.
    ///
    /// Server faults win over not-found, which wins over a structured
    /// `{ "error": "..." }` payload.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        if (500..600).contains(&status) {
            return Self::ServerFault { status };
        }
        if status == 404 {
            return Self::NotFound;
        }
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                error: Some(message),
            }) if !message.trim().is_empty() => Self::Application(message),
            _ => Self::Unknown(format!("unexpected status {status}")),
        }
    }

    /// Message suitable for the inline error line.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
