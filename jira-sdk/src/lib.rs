// ABOUTME: Jira SDK library providing a dual-dialect REST client for Jira Cloud and Server/DC
// ABOUTME: Includes authentication, dialect selection, rich-text handling and transition resolution

pub mod builder;
pub mod constants;
pub mod dialect;
pub mod error;
pub mod identity;
pub mod issues;
pub mod rich_text;
pub mod transitions;
pub mod transport;
pub mod types;

#[cfg(test)]
pub mod test_helpers;

pub use builder::JiraClientConfig;
pub use dialect::{AuthMode, Dialect, IdentifierField, RichTextMode, api_version, dialect_for};
pub use error::{JiraError, ResolutionError, TransportError};
pub use identity::{assignee_identifier, is_me_sentinel};
pub use rich_text::{DescriptionValue, DocumentNode, decode_text, encode_body};
pub use secrecy::SecretString;
pub use transport::{Credentials, Response};
pub use types::*;

pub type Result<T> = std::result::Result<T, JiraError>;

/// Client for one Jira deployment. The credential type fixes the dialect for its lifetime.
pub struct JiraClient {
    pub(crate) transport: transport::Transport,
    pub(crate) mode: AuthMode,
}

impl JiraClient {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Dialect for this client, looked up fresh on every call.
    pub fn dialect(&self) -> Dialect {
        dialect_for(self.mode)
    }
}
