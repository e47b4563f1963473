// ABOUTME: Centralized constants for the Jira CLI application
// ABOUTME: Contains limits, config locations, UI widths, and create-command choices

/// Default limits for issue queries
pub mod limits {
    pub const DEFAULT_LIST_LIMIT: u32 = 20;
    pub const SUMMARY_MAX_LEN: usize = 50;
    pub const ASSIGNEE_MAX_LEN: usize = 20;
}

/// Configuration file names and environment variables
pub mod config {
    pub const APP_DIR: &str = "jira-cli";
    pub const FILE_NAME: &str = "config.toml";
    pub const PROJECT_FILE_NAME: &str = "jira-cli.toml";

    pub const ENV_URL: &str = "JIRA_URL";
    pub const ENV_EMAIL: &str = "JIRA_EMAIL";
    pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";
    pub const ENV_AUTH_TYPE: &str = "JIRA_AUTH_TYPE";
    pub const ENV_DEFAULT_PROJECT: &str = "JIRA_DEFAULT_PROJECT";
}

/// UI and formatting constants
pub mod ui {
    /// Border line length for issue detail formatting
    pub const BORDER_LINE_LENGTH: usize = 80;

    /// Timestamp format for created/updated columns
    pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
}

/// Workflow status names used by the quick actions
pub mod status {
    pub const IN_PROGRESS: &str = "In Progress";
    pub const DONE: &str = "Done";
    pub const BLOCKED: &str = "Blocked";
}

/// Choices offered by the create command
pub mod create {
    pub const ISSUE_TYPES: &[&str] = &["Task", "Bug", "Story", "Epic", "Subtask"];
    pub const PRIORITIES: &[&str] = &["None", "Highest", "High", "Medium", "Low", "Lowest"];
    pub const NO_PRIORITY: &str = "None";
}
