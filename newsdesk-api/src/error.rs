use reqwest::StatusCode;
use thiserror::Error;

const GENERIC_ERROR: &str = "Something went wrong, please try again";

#[derive(Debug, Error)]
pub enum NewsApiError {
    #[error("unauthorized ({status})")]
    Unauthorized {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("{call} returned {status}")]
    Remote {
        call: String,
        status: StatusCode,
        message: Option<String>,
    },
    #[error("failed to call {call}: {source}")]
    Request {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to parse {call} response: {source}")]
    Decode {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
    #[error("login response did not contain a token")]
    MissingToken,
}

impl NewsApiError {
    /// Message suitable for an alert: the remote-supplied message when the
    /// server sent one, otherwise a generic description.
    pub fn user_message(&self) -> String {
        match self {
            NewsApiError::Unauthorized {
                message: Some(message),
                ..
            }
            | NewsApiError::Remote {
                message: Some(message),
                ..
            } => message.clone(),
            NewsApiError::Unauthorized { message: None, .. } => {
                "Session expired or invalid. Run `newsdesk login` to authenticate.".to_string()
            }
            NewsApiError::Remote { message: None, .. } => GENERIC_ERROR.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NewsApiError::Unauthorized { .. })
    }
}

/// Presence checks performed when a draft is turned into a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
}
