// ABOUTME: Resolves the "current user" sentinel into a dialect-appropriate user identifier
// ABOUTME: Cloud writes accountId, Server/DC writes the user's display name under "name"

use http::Method;
use log::debug;

use crate::constants::identity::ME_SENTINELS;
use crate::dialect::{Dialect, IdentifierField};
use crate::error::JiraError;
use crate::types::Identity;
use crate::{JiraClient, Result};

/// True for "@me" or "me", ignoring case and surrounding whitespace.
pub fn is_me_sentinel(who: &str) -> bool {
    let normalized = who.trim().to_lowercase();
    ME_SENTINELS.contains(&normalized.as_str())
}

/// The value to place under the dialect's identifier field when assigning `identity`.
pub fn assignee_identifier(identity: &Identity, dialect: &Dialect) -> String {
    match dialect.identifier_field {
        IdentifierField::AccountId => identity.account_id.clone(),
        IdentifierField::Name => identity.display_name.clone(),
    }
}

impl JiraClient {
    /// Fetch the authenticated user. One `GET /myself` per call.
    pub async fn myself(&self) -> Result<Identity> {
        let dialect = self.dialect();
        let response = self
            .transport
            .send(Method::GET, &dialect.path("/myself"), &[], None)
            .await?;
        response.decode("current user")
    }

    /// Like [`JiraClient::myself`], with failures reported as identity errors.
    pub(crate) async fn resolve_me(&self) -> Result<Identity> {
        self.myself().await.map_err(JiraError::identity)
    }

    /// Turn user input into the identifier the current dialect expects.
    /// Sentinels go through `/myself`; anything else is passed through unchanged.
    pub(crate) async fn resolve_assignee(&self, who: &str) -> Result<String> {
        if !is_me_sentinel(who) {
            return Ok(who.to_string());
        }

        let me = self.resolve_me().await?;
        let identifier = assignee_identifier(&me, &self.dialect());
        debug!("resolved '{}' to '{}'", who, identifier);
        Ok(identifier)
    }
}
