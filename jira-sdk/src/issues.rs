// ABOUTME: Ticket operations exposed by JiraClient: fetch, search, create, comment, assign, transition
// ABOUTME: Every call re-derives the dialect and shapes paths, queries and bodies accordingly

use http::Method;
use log::{debug, info};
use serde_json::{Map, Value, json};

use crate::constants::paths::NAVIGABLE_FIELDS;
use crate::dialect::Dialect;
use crate::error::JiraError;
use crate::rich_text::encode_body;
use crate::transitions;
use crate::types::{
    Comment, CommentPage, CreatedIssue, NewIssue, SearchResults, Ticket, Transition,
    TransitionList,
};
use crate::{JiraClient, Result};

fn navigable_fields(dialect: &Dialect) -> Vec<(&'static str, String)> {
    if dialect.requires_navigable_fields {
        vec![("fields", NAVIGABLE_FIELDS.to_string())]
    } else {
        Vec::new()
    }
}

fn encoded(plain: &str, dialect: &Dialect) -> Result<Value> {
    serde_json::to_value(encode_body(plain, dialect))
        .map_err(|e| JiraError::decode("request body", e))
}

impl JiraClient {
    /// Fetch a single ticket by key.
    pub async fn get_issue(&self, key: &str) -> Result<Ticket> {
        let dialect = self.dialect();
        let response = self
            .transport
            .send(
                Method::GET,
                &dialect.issue_path(key, ""),
                &navigable_fields(&dialect),
                None,
            )
            .await?;
        response.decode("issue")
    }

    /// Run a JQL query.
    pub async fn search(&self, jql: &str, max_results: u32) -> Result<SearchResults> {
        let dialect = self.dialect();
        let mut query = vec![
            ("jql", jql.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        query.extend(navigable_fields(&dialect));

        debug!("searching with JQL: {}", jql);
        let response = self
            .transport
            .send(
                Method::GET,
                &dialect.path(dialect.search_path),
                &query,
                None,
            )
            .await?;
        response.decode("search results")
    }

    pub async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        let dialect = self.dialect();

        let mut fields = Map::new();
        fields.insert("project".to_string(), json!({ "key": issue.project }));
        fields.insert("summary".to_string(), json!(issue.summary));
        fields.insert("issuetype".to_string(), json!({ "name": issue.issue_type }));

        if !issue.description.is_empty() {
            fields.insert(
                "description".to_string(),
                encoded(&issue.description, &dialect)?,
            );
        }

        if let Some(priority) = &issue.priority {
            fields.insert("priority".to_string(), json!({ "name": priority }));
        }

        if issue.assign_to_me {
            let identifier = self.resolve_assignee("@me").await?;
            let mut assignee = Map::new();
            assignee.insert(
                dialect.identifier_field.json_key().to_string(),
                Value::String(identifier),
            );
            fields.insert("assignee".to_string(), Value::Object(assignee));
        }

        let body = json!({ "fields": fields });
        let response = self
            .transport
            .send(Method::POST, &dialect.path("/issue"), &[], Some(&body))
            .await?;
        let created: CreatedIssue = response.decode("created issue")?;
        info!("created issue {}", created.key);
        Ok(created)
    }

    /// Append a comment. Returns the comment as stored by the server.
    pub async fn add_comment(&self, key: &str, text: &str) -> Result<Comment> {
        let dialect = self.dialect();
        let body = json!({ "body": encoded(text, &dialect)? });
        let response = self
            .transport
            .send(
                Method::POST,
                &dialect.issue_path(key, "/comment"),
                &[],
                Some(&body),
            )
            .await?;
        response.decode("comment")
    }

    /// All comments on a ticket, oldest first.
    pub async fn comments(&self, key: &str) -> Result<Vec<Comment>> {
        let dialect = self.dialect();
        let response = self
            .transport
            .send(Method::GET, &dialect.issue_path(key, "/comment"), &[], None)
            .await?;
        let page: CommentPage = response.decode("comments")?;
        Ok(page.comments)
    }

    /// Assign a ticket. `who` may be "@me"/"me" or a raw identifier for the active dialect.
    pub async fn set_assignee(&self, key: &str, who: &str) -> Result<()> {
        let dialect = self.dialect();
        let identifier = self.resolve_assignee(who).await?;

        let mut body = Map::new();
        body.insert(
            dialect.identifier_field.json_key().to_string(),
            Value::String(identifier),
        );

        self.transport
            .send(
                Method::PUT,
                &dialect.issue_path(key, "/assignee"),
                &[],
                Some(&Value::Object(body)),
            )
            .await?;
        Ok(())
    }

    /// Transitions currently available for a ticket, in server order.
    pub async fn transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let dialect = self.dialect();
        let response = self
            .transport
            .send(
                Method::GET,
                &dialect.issue_path(key, "/transitions"),
                &[],
                None,
            )
            .await?;
        let list: TransitionList = response.decode("transitions")?;
        Ok(list.transitions)
    }

    /// Move a ticket to the status best matching `status`.
    ///
    /// The transition list is fetched fresh on every call; ids are never reused
    /// across tickets or calls.
    pub async fn transition_status(&self, key: &str, status: &str) -> Result<Transition> {
        let dialect = self.dialect();
        let available = self.transitions(key).await?;
        let chosen = transitions::resolve(&available, status)?.clone();

        let body = json!({ "transition": { "id": chosen.id } });
        self.transport
            .send(
                Method::POST,
                &dialect.issue_path(key, "/transitions"),
                &[],
                Some(&body),
            )
            .await?;

        info!("moved {} to '{}' via transition {}", key, chosen.target(), chosen.id);
        Ok(chosen)
    }
}
