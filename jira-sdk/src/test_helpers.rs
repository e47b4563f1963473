// ABOUTME: Test helper utilities for mocking Jira REST responses and server
// ABOUTME: Provides mockito-based helpers and canned payloads for both API dialects

#[cfg(test)]
use mockito::{Server, ServerGuard};
#[cfg(test)]
use secrecy::SecretString;
#[cfg(test)]
use serde_json::json;

#[cfg(test)]
use crate::{Credentials, JiraClient};

#[cfg(test)]
pub async fn mock_jira_server() -> ServerGuard {
    Server::new_async().await
}

#[cfg(test)]
pub fn secret(value: &str) -> SecretString {
    SecretString::new(value.to_string().into_boxed_str())
}

#[cfg(test)]
pub fn cloud_client(server: &ServerGuard) -> JiraClient {
    JiraClient::builder()
        .base_url(server.url())
        .credentials(Credentials::Basic {
            username: "dev@example.com".to_string(),
            token: secret("cloud-token"),
        })
        .build()
        .unwrap()
}

#[cfg(test)]
pub fn server_client(server: &ServerGuard) -> JiraClient {
    JiraClient::builder()
        .base_url(server.url())
        .credentials(Credentials::Bearer {
            token: secret("server-pat"),
        })
        .build()
        .unwrap()
}

#[cfg(test)]
pub fn mock_cloud_myself_response() -> serde_json::Value {
    json!({
        "self": "https://example.atlassian.net/rest/api/3/user?accountId=5b10ac8d82e05b22cc7d4ef5",
        "accountId": "5b10ac8d82e05b22cc7d4ef5",
        "accountType": "atlassian",
        "emailAddress": "dev@example.com",
        "displayName": "Dana Developer",
        "active": true,
        "timeZone": "Europe/Berlin"
    })
}

#[cfg(test)]
pub fn mock_server_myself_response() -> serde_json::Value {
    json!({
        "self": "https://jira.example.com/rest/api/2/user?username=ddev",
        "key": "JIRAUSER10100",
        "name": "ddev",
        "emailAddress": "dev@example.com",
        "displayName": "Dana Developer",
        "active": true
    })
}

#[cfg(test)]
pub fn mock_cloud_issue_response() -> serde_json::Value {
    json!({
        "id": "10042",
        "key": "PROJ-123",
        "fields": {
            "summary": "Fix login race condition",
            "description": {
                "type": "doc",
                "version": 1,
                "content": [
                    {"type": "paragraph", "content": [
                        {"type": "text", "text": "Users are logged out at random."}
                    ]},
                    {"type": "paragraph", "content": [
                        {"type": "text", "text": "Happens on mobile only."}
                    ]}
                ]
            },
            "issuetype": {"id": "10004", "name": "Bug"},
            "status": {"id": "3", "name": "In Progress"},
            "priority": {"id": "2", "name": "High"},
            "assignee": {
                "accountId": "5b10ac8d82e05b22cc7d4ef5",
                "displayName": "Dana Developer",
                "emailAddress": "dev@example.com",
                "active": true
            },
            "reporter": {
                "accountId": "5b10a2844c20165700ede21g",
                "displayName": "Riley Reporter",
                "active": true
            },
            "project": {"id": "10000", "key": "PROJ", "name": "Project"},
            "created": "2024-01-15T10:30:00.000+0000",
            "updated": "2024-01-16T14:45:00.000+0000"
        }
    })
}

#[cfg(test)]
pub fn mock_server_issue_response() -> serde_json::Value {
    json!({
        "id": "20001",
        "key": "OPS-7",
        "fields": {
            "summary": "Build agent out of disk",
            "description": "Disk is full on build agent",
            "issuetype": {"id": "3", "name": "Task"},
            "status": {"id": "1", "name": "To Do"},
            "priority": {"id": "3", "name": "Medium"},
            "assignee": null,
            "reporter": {
                "name": "ops-bot",
                "displayName": "Ops Bot",
                "active": true
            },
            "project": {"id": "10100", "key": "OPS", "name": "Operations"},
            "created": "2024-03-01T08:00:00.000+0000",
            "updated": "2024-03-01T08:00:00.000+0000"
        }
    })
}

#[cfg(test)]
pub fn mock_search_response() -> serde_json::Value {
    json!({
        "startAt": 0,
        "maxResults": 20,
        "total": 2,
        "issues": [
            mock_server_issue_response(),
            {
                "id": "20002",
                "key": "OPS-8",
                "fields": {
                    "summary": "Rotate certificates",
                    "status": {"id": "3", "name": "In Progress"},
                    "issuetype": {"id": "3", "name": "Task"},
                    "project": {"id": "10100", "key": "OPS", "name": "Operations"}
                }
            }
        ]
    })
}

#[cfg(test)]
pub fn mock_cloud_search_response() -> serde_json::Value {
    json!({
        "isLast": true,
        "issues": [mock_cloud_issue_response()]
    })
}

#[cfg(test)]
pub fn mock_transitions_response() -> serde_json::Value {
    json!({
        "expand": "transitions",
        "transitions": [
            {"id": "11", "name": "Reopen", "to": {"id": "1", "name": "To Do"}},
            {"id": "21", "name": "Start Progress", "to": {"id": "3", "name": "In Progress"}},
            {"id": "31", "name": "Resolve", "to": {"id": "10001", "name": "Done"}}
        ]
    })
}

#[cfg(test)]
pub fn mock_comments_response() -> serde_json::Value {
    json!({
        "startAt": 0,
        "maxResults": 1048576,
        "total": 2,
        "comments": [
            {
                "id": "100",
                "author": {"accountId": "abc", "displayName": "Dana Developer", "active": true},
                "body": {
                    "type": "doc",
                    "version": 1,
                    "content": [{"type": "paragraph", "content": [
                        {"type": "text", "text": "Looking into it"}
                    ]}]
                },
                "created": "2024-01-15T11:00:00.000+0000"
            },
            {
                "id": "101",
                "author": {"name": "ops-bot", "displayName": "Ops Bot", "active": true},
                "body": "Plain comment",
                "created": "2024-01-15T12:00:00.000+0000"
            }
        ]
    })
}

#[cfg(test)]
pub fn mock_create_issue_response() -> serde_json::Value {
    json!({
        "id": "10050",
        "key": "PROJ-124",
        "self": "https://example.atlassian.net/rest/api/3/issue/10050"
    })
}
