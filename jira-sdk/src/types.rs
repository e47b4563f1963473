// ABOUTME: Serde models for Jira REST payloads shared by both API dialects
// ABOUTME: Tickets, users, transitions, comments, search results and issue creation

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::rich_text::DescriptionValue;

/// Jira renders offsets without a colon (`+0000`), so RFC 3339 parsing is not enough.
const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parse a Jira timestamp such as `2024-01-15T10:30:00.000+0000`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, JIRA_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub fields: TicketFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TicketFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: DescriptionValue,
    #[serde(default, rename = "issuetype")]
    pub issue_type: IssueType,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub assignee: Option<Identity>,
    #[serde(default)]
    pub reporter: Option<Identity>,
    #[serde(default)]
    pub project: Project,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl TicketFields {
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created.as_deref().and_then(parse_timestamp)
    }

    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.updated.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueType {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Priority {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
}

/// A Jira user. Cloud fills `account_id`; Server/DC fills `name`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    /// Absent from the cloud `/search/jql` response.
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub issues: Vec<Ticket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub author: Option<Identity>,
    #[serde(default)]
    pub body: DescriptionValue,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl Comment {
    pub fn body_text(&self) -> String {
        crate::rich_text::decode_text(&self.body)
    }

    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct CommentPage {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A workflow edge currently legal for one ticket. The id is only meaningful for that ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub to: Status,
}

impl Transition {
    /// Display name of the status this transition moves the ticket into.
    pub fn target(&self) -> &str {
        &self.to.name
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct TransitionList {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Input for creating a ticket.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct NewIssue {
    #[builder(setter(into))]
    pub project: String,
    #[builder(setter(into))]
    pub summary: String,
    #[builder(default, setter(into))]
    pub description: String,
    #[builder(default = "Task".to_string(), setter(into))]
    pub issue_type: String,
    #[builder(default, setter(strip_option, into))]
    pub priority: Option<String>,
    #[builder(default = false)]
    pub assign_to_me: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    #[serde(default)]
    pub id: String,
    pub key: String,
    #[serde(default, rename = "self")]
    pub self_url: String,
}
