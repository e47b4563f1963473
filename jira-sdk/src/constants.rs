// ABOUTME: Centralized constants for the Jira SDK
// ABOUTME: Contains timeouts, REST path fragments, and request header values

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// REST API path fragments shared by both dialects
pub mod paths {
    /// Root of every REST endpoint; the version segment follows it
    pub const REST_API_ROOT: &str = "/rest/api";

    /// Query value asking the cloud dialect for every navigable field
    pub const NAVIGABLE_FIELDS: &str = "*navigable";
}

/// Request header values
pub mod headers {
    pub const USER_AGENT: &str = concat!("jira-cli/", env!("CARGO_PKG_VERSION"));
    pub const JSON: &str = "application/json";
}

/// Identity sentinels accepted in place of a real user identifier
pub mod identity {
    pub const ME_SENTINELS: &[&str] = &["@me", "me"];
}
