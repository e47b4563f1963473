// ABOUTME: Authenticated HTTP round trips against the Jira REST API
// ABOUTME: Applies exactly one auth scheme per credential type and classifies responses

use std::time::Duration;

use http::Method;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use log::debug;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::constants::headers;
use crate::dialect::AuthMode;
use crate::error::{JiraError, TransportError};

/// Credentials for one Jira deployment. The variant decides the API dialect.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Email + API token sent as HTTP basic auth (Jira Cloud).
    Basic {
        username: String,
        token: SecretString,
    },
    /// Personal access token sent as a bearer token (Jira Server / Data Center).
    Bearer { token: SecretString },
}

impl Credentials {
    pub fn mode(&self) -> AuthMode {
        match self {
            Credentials::Basic { .. } => AuthMode::CloudBasic,
            Credentials::Bearer { .. } => AuthMode::ServerPat,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), JiraError> {
        let token = match self {
            Credentials::Basic { username, token } => {
                if username.trim().is_empty() {
                    return Err(JiraError::Configuration(
                        "basic auth requires a username (your Atlassian email)".to_string(),
                    ));
                }
                token
            }
            Credentials::Bearer { token } => token,
        };

        if token.expose_secret().trim().is_empty() {
            return Err(JiraError::Configuration(
                "API token must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Status and raw body of a successful (2xx) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub(crate) fn decode<T: DeserializeOwned>(&self, context: &'static str) -> crate::Result<T> {
        serde_json::from_str(&self.body).map_err(|e| JiraError::decode(context, e))
    }
}

pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    verbose: bool,
}

impl Transport {
    pub(crate) fn new(
        base_url: &Url,
        credentials: Credentials,
        timeout: Duration,
        proxy: Option<reqwest::Proxy>,
        verbose: bool,
    ) -> Result<Self, JiraError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static(headers::JSON));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(headers::JSON));

        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers)
            .user_agent(headers::USER_AGENT)
            .timeout(timeout);

        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy);
        }

        let http = builder.build().map_err(|e| {
            JiraError::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            credentials,
            verbose,
        })
    }

    /// Perform one request. Any status outside 2xx comes back as `Rejected`.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<Response, TransportError> {
        // Plain concatenation keeps any context path on the base URL (e.g. /jira).
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        request = match &self.credentials {
            Credentials::Basic { username, token } => {
                request.basic_auth(username, Some(token.expose_secret()))
            }
            Credentials::Bearer { token } => request.bearer_auth(token.expose_secret()),
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let raw_body = response.text().await?;
        debug!("{} {} -> {}", method, path, status);
        if self.verbose {
            debug!("response body: {}", raw_body);
        }

        if !(200..300).contains(&status) {
            return Err(TransportError::Rejected { status, raw_body });
        }

        Ok(Response {
            status,
            body: raw_body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{mock_jira_server, secret};
    use mockito::Matcher;

    fn transport(base: &str, credentials: Credentials) -> Transport {
        Transport::new(
            &Url::parse(base).unwrap(),
            credentials,
            Duration::from_secs(5),
            None,
            false,
        )
        .unwrap()
    }

    fn basic() -> Credentials {
        Credentials::Basic {
            username: "dev@example.com".to_string(),
            token: secret("cloud-token"),
        }
    }

    fn bearer() -> Credentials {
        Credentials::Bearer {
            token: secret("server-pat"),
        }
    }

    #[test]
    fn test_credentials_select_mode() {
        assert_eq!(basic().mode(), AuthMode::CloudBasic);
        assert_eq!(bearer().mode(), AuthMode::ServerPat);
    }

    #[test]
    fn test_credentials_validation() {
        assert!(basic().validate().is_ok());
        assert!(bearer().validate().is_ok());

        let blank_token = Credentials::Bearer { token: secret("  ") };
        assert!(matches!(
            blank_token.validate(),
            Err(JiraError::Configuration(_))
        ));

        let blank_user = Credentials::Basic {
            username: String::new(),
            token: secret("t"),
        };
        assert!(matches!(
            blank_user.validate(),
            Err(JiraError::Configuration(_))
        ));
    }

    #[test]
    fn test_credentials_debug_hides_token() {
        let debug = format!("{:?}", bearer());
        assert!(!debug.contains("server-pat"));
    }

    #[tokio::test]
    async fn test_basic_auth_and_json_headers() {
        let mut server = mock_jira_server().await;
        // base64("dev@example.com:cloud-token")
        let mock = server
            .mock("GET", "/rest/api/3/myself")
            .match_header(
                "authorization",
                "Basic ZGV2QGV4YW1wbGUuY29tOmNsb3VkLXRva2Vu",
            )
            .match_header("accept", "application/json")
            .match_header("content-type", "application/json")
            .match_header("user-agent", Matcher::Regex("^jira-cli/".to_string()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let response = transport(&server.url(), basic())
            .send(Method::GET, "/rest/api/3/myself", &[], None)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bearer_auth_only() {
        let mut server = mock_jira_server().await;
        let mock = server
            .mock("GET", "/rest/api/2/myself")
            .match_header("authorization", "Bearer server-pat")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        transport(&server.url(), bearer())
            .send(Method::GET, "/rest/api/2/myself", &[], None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_query_and_body_are_sent() {
        let mut server = mock_jira_server().await;
        let mock = server
            .mock("POST", "/rest/api/2/thing")
            .match_query(Matcher::UrlEncoded("jql".into(), "project = OPS".into()))
            .match_body(Matcher::Json(serde_json::json!({"a": 1})))
            .with_status(201)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let response = transport(&server.url(), bearer())
            .send(
                Method::POST,
                "/rest/api/2/thing",
                &[("jql", "project = OPS".to_string())],
                Some(&serde_json::json!({"a": 1})),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected_verbatim() {
        let mut server = mock_jira_server().await;
        server
            .mock("GET", "/rest/api/2/issue/NOPE-1")
            .with_status(404)
            .with_body("Issue Not Found")
            .create_async()
            .await;

        let err = transport(&server.url(), bearer())
            .send(Method::GET, "/rest/api/2/issue/NOPE-1", &[], None)
            .await
            .unwrap_err();

        match err {
            TransportError::Rejected { status, raw_body } => {
                assert_eq!(status, 404);
                assert_eq!(raw_body, "Issue Not Found");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_redirect_status_outside_2xx_is_rejected() {
        let mut server = mock_jira_server().await;
        server
            .mock("GET", "/rest/api/2/myself")
            .with_status(304)
            .create_async()
            .await;

        let err = transport(&server.url(), bearer())
            .send(Method::GET, "/rest/api/2/myself", &[], None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(304));
    }

    #[tokio::test]
    async fn test_context_path_is_preserved() {
        let mut server = mock_jira_server().await;
        let mock = server
            .mock("GET", "/jira/rest/api/2/myself")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let base = format!("{}/jira/", server.url());
        transport(&base, bearer())
            .send(Method::GET, "/rest/api/2/myself", &[], None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_failure() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let err = transport("http://127.0.0.1:9", bearer())
            .send(Method::GET, "/rest/api/2/myself", &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_slow_server_is_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold the connection open without ever answering.
        let silent = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let slow = Transport::new(
            &Url::parse(&format!("http://{}", addr)).unwrap(),
            bearer(),
            Duration::from_millis(300),
            None,
            false,
        )
        .unwrap();
        let err = slow
            .send(Method::GET, "/rest/api/2/myself", &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Timeout));
        assert_eq!(err.status(), None);
        silent.abort();
    }

    #[test]
    fn test_response_decode_reports_context() {
        let response = Response {
            status: 200,
            body: "not json".to_string(),
        };
        let err = response.decode::<serde_json::Value>("issue").unwrap_err();
        assert!(matches!(err, JiraError::Decode { context: "issue", .. }));
    }
}
