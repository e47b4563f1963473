// ABOUTME: Builder pattern implementation for JiraClient configuration
// ABOUTME: Validates base URL and credentials before any request is made

use std::time::Duration;

use typed_builder::TypedBuilder;
use url::Url;

use crate::JiraClient;
use crate::constants::timeouts::HTTP_REQUEST_TIMEOUT;
use crate::error::JiraError;
use crate::transport::{Credentials, Transport};

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<JiraClient, JiraError>))]
pub struct JiraClientConfig {
    /// Site root, e.g. `https://example.atlassian.net` or `https://jira.corp/jira`.
    #[builder(setter(into))]
    pub base_url: String,

    pub credentials: Credentials,

    /// Log raw response bodies at debug level.
    #[builder(default = false)]
    pub verbose: bool,

    #[builder(default = HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = None)]
    pub proxy: Option<reqwest::Proxy>,
}

impl From<JiraClientConfig> for Result<JiraClient, JiraError> {
    fn from(config: JiraClientConfig) -> Self {
        JiraClient::from_config(config)
    }
}

impl JiraClient {
    pub fn builder() -> JiraClientConfigBuilder<((), (), (), (), ())> {
        JiraClientConfig::builder()
    }

    pub fn from_config(config: JiraClientConfig) -> Result<Self, JiraError> {
        let base_url = parse_base_url(&config.base_url)?;
        config.credentials.validate()?;

        let mode = config.credentials.mode();
        let transport = Transport::new(
            &base_url,
            config.credentials,
            config.timeout,
            config.proxy,
            config.verbose,
        )?;

        Ok(JiraClient { transport, mode })
    }

    pub fn create_proxy(url: &str) -> Result<reqwest::Proxy, JiraError> {
        let parsed_url = Url::parse(url)
            .map_err(|e| JiraError::Configuration(format!("Invalid proxy URL: {}", e)))?;

        reqwest::Proxy::all(parsed_url.as_str())
            .map_err(|e| JiraError::Configuration(format!("Invalid proxy configuration: {}", e)))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, JiraError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(JiraError::Configuration(
            "Jira URL must not be empty".to_string(),
        ));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| JiraError::Configuration(format!("Invalid Jira URL '{}': {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(JiraError::Configuration(format!(
            "Jira URL must use http or https, got '{}'",
            other
        ))),
    }
}
