// ABOUTME: Custom error types for Jira SDK with user-friendly messages
// ABOUTME: Separates transport failures, decode failures, and transition resolution misses

use thiserror::Error;

/// Failure to complete an HTTP round trip, or a non-2xx answer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Timeout: Request took too long to complete")]
    Timeout,

    /// The raw body is kept verbatim so the caller can show the server's own message.
    #[error("Request failed (status {status}): {raw_body}")]
    Rejected { status: u16, raw_body: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::ConnectionFailed(err.to_string())
        }
    }
}

/// A status string that matched none of a ticket's available transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error(
        "no matching transition found for '{input}'. Available transitions: {}",
        .available.join(", ")
    )]
    NoMatch {
        input: String,
        available: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum JiraError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Invalid API response while decoding {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Failed to look up the current user: {source}")]
    Identity {
        #[source]
        source: Box<JiraError>,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl JiraError {
    pub(crate) fn decode(context: &'static str, source: serde_json::Error) -> Self {
        JiraError::Decode { context, source }
    }

    pub(crate) fn identity(source: JiraError) -> Self {
        JiraError::Identity {
            source: Box::new(source),
        }
    }

    /// HTTP status of a rejected request, looking through identity wrappers.
    pub fn status(&self) -> Option<u16> {
        match self {
            JiraError::Transport(err) => err.status(),
            JiraError::Identity { source } => source.status(),
            _ => None,
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            JiraError::Transport(TransportError::Rejected { status: 401, .. }) => Some(
                "Check your credentials: Cloud uses email + API token, Server/DC uses a personal access token",
            ),
            JiraError::Transport(TransportError::Rejected { status: 403, .. }) => {
                Some("Your account does not have permission for this operation")
            }
            JiraError::Transport(TransportError::Rejected { status: 404, .. }) => {
                Some("Please check the issue key format (e.g., PROJ-123) and that it exists")
            }
            JiraError::Transport(TransportError::Timeout) => {
                Some("Try again or check your network connection")
            }
            JiraError::Transport(TransportError::ConnectionFailed(_)) => {
                Some("Check the Jira URL in your configuration and your internet connection")
            }
            JiraError::Identity { source } => source.help_text(),
            JiraError::Configuration(_) => Some("Run 'jira init' to set up your configuration"),
            _ => None,
        }
    }
}
