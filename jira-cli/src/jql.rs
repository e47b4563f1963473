// ABOUTME: Builds the JQL query used by the list command from its filter flags
// ABOUTME: Filters are ANDed together and results are always ordered by last update

use jira_sdk::is_me_sentinel;

const ORDER_BY: &str = " ORDER BY updated DESC";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub project: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
}

impl ListFilter {
    /// Fill in the project from configuration when no flag was given.
    pub fn with_default_project(mut self, default_project: Option<&str>) -> Self {
        if self.project.is_none() {
            self.project = default_project
                .filter(|p| !p.trim().is_empty())
                .map(str::to_string);
        }
        self
    }

    pub fn to_jql(&self) -> String {
        let mut clauses = Vec::new();

        if let Some(project) = non_empty(&self.project) {
            clauses.push(format!("project = {}", project));
        }

        if let Some(status) = non_empty(&self.status) {
            clauses.push(format!("status = \"{}\"", escape(status)));
        }

        if let Some(assignee) = non_empty(&self.assignee) {
            if is_me_sentinel(assignee) {
                clauses.push("assignee = currentUser()".to_string());
            } else {
                clauses.push(format!("assignee = \"{}\"", escape(assignee)));
            }
        }

        format!("{}{}", clauses.join(" AND "), ORDER_BY)
            .trim_start()
            .to_string()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
