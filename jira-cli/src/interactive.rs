// ABOUTME: Interactive prompts for the init wizard and for filling in missing create arguments
// ABOUTME: Only prompts on a real terminal outside CI; otherwise missing input is an error

use anyhow::{Context, Result, bail};
use dialoguer::{Confirm, Editor, Input, Password, Select};
use jira_sdk::NewIssue;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::config::{AuthType, Config};
use crate::constants::create::{ISSUE_TYPES, NO_PRIORITY, PRIORITIES};

/// Arguments given to `create` on the command line; anything missing may be prompted for.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub project: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub issue_type: Option<String>,
    pub priority: Option<String>,
    pub assign_to_me: bool,
}

impl CreateOptions {
    /// Build the issue from flags alone. Project falls back to `default_project`.
    pub fn into_new_issue(self, default_project: Option<&str>) -> Result<NewIssue> {
        let project = non_blank(self.project)
            .or_else(|| non_blank(default_project.map(str::to_string)))
            .context("A project is required: pass --project or set default_project")?;
        let summary = non_blank(self.summary).context("A summary is required: pass --summary")?;

        Ok(build_issue(
            project,
            summary,
            self.description.unwrap_or_default(),
            non_blank(self.issue_type),
            normalize_priority(self.priority),
            self.assign_to_me,
        ))
    }
}

pub struct InteractivePrompter {
    is_tty: bool,
}

impl InteractivePrompter {
    pub fn new() -> Self {
        let is_tty = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
        Self { is_tty }
    }

    /// Check if interactive prompts should be used
    pub fn should_prompt(&self) -> bool {
        self.is_tty && !self.is_in_ci()
    }

    /// Check if running in CI environment
    pub fn is_in_ci(&self) -> bool {
        std::env::var("CI").is_ok()
            || std::env::var("GITHUB_ACTIONS").is_ok()
            || std::env::var("JENKINS_URL").is_ok()
            || std::env::var("BUILDKITE").is_ok()
    }

    /// Test helper to override TTY detection
    pub fn with_tty_override(mut self, is_tty: bool) -> Self {
        self.is_tty = is_tty;
        self
    }

    /// Resolve the create arguments, prompting for whatever the flags left out.
    pub fn collect_create_input(
        &self,
        options: CreateOptions,
        default_project: Option<&str>,
    ) -> Result<NewIssue> {
        if !self.should_prompt() {
            return options.into_new_issue(default_project);
        }

        println!("Creating a new Jira issue...\n");

        let project = match non_blank(options.project.clone()) {
            Some(project) => project,
            None => self.prompt_project(default_project)?,
        };

        let summary = match non_blank(options.summary.clone()) {
            Some(summary) => summary,
            None => self.prompt_summary()?,
        };

        let issue_type = match non_blank(options.issue_type.clone()) {
            Some(issue_type) => Some(issue_type),
            None => Some(self.prompt_issue_type()?),
        };

        let priority = match options.priority.clone() {
            Some(priority) => normalize_priority(Some(priority)),
            None => self.prompt_priority()?,
        };

        let description = match options.description.clone() {
            Some(description) => description,
            None => self.prompt_description()?.unwrap_or_default(),
        };

        let assign_to_me = options.assign_to_me || self.prompt_assign_to_me()?;

        Ok(build_issue(
            project,
            summary,
            description,
            issue_type,
            priority,
            assign_to_me,
        ))
    }

    fn prompt_project(&self, default_project: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt("Project key")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Project key cannot be empty")
                } else {
                    Ok(())
                }
            });
        if let Some(default) = default_project.filter(|p| !p.trim().is_empty()) {
            input = input.default(default.to_string());
        }

        let project = input.interact_text().context("Failed to read project key")?;
        Ok(project.trim().to_uppercase())
    }

    fn prompt_summary(&self) -> Result<String> {
        let summary: String = Input::new()
            .with_prompt("Summary")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Summary cannot be empty")
                } else if input.len() > 255 {
                    Err("Summary must be 255 characters or less")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .context("Failed to read summary")?;

        Ok(summary.trim().to_string())
    }

    fn prompt_issue_type(&self) -> Result<String> {
        let selection = Select::new()
            .with_prompt("Issue type")
            .items(ISSUE_TYPES)
            .default(0)
            .interact()
            .context("Failed to select issue type")?;

        Ok(ISSUE_TYPES[selection].to_string())
    }

    fn prompt_priority(&self) -> Result<Option<String>> {
        let selection = Select::new()
            .with_prompt("Priority")
            .items(PRIORITIES)
            .default(0)
            .interact()
            .context("Failed to select priority")?;

        Ok(normalize_priority(Some(PRIORITIES[selection].to_string())))
    }

    fn prompt_description(&self) -> Result<Option<String>> {
        let use_editor = Confirm::new()
            .with_prompt("Would you like to write a multi-line description?")
            .default(false)
            .interact()
            .context("Failed to read description choice")?;

        if use_editor {
            let description = Editor::new()
                .edit("")
                .context("Failed to open editor")?;
            return Ok(non_blank(description));
        }

        let description: String = Input::new()
            .with_prompt("Description (optional)")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read description")?;

        Ok(non_blank(Some(description)))
    }

    fn prompt_assign_to_me(&self) -> Result<bool> {
        Confirm::new()
            .with_prompt("Assign to yourself?")
            .default(false)
            .interact()
            .context("Failed to read assignment choice")
    }

    /// Walk through the settings `init` writes, seeded with whatever is already configured.
    pub fn prompt_config(&self, existing: &Config) -> Result<Config> {
        if !self.should_prompt() {
            bail!("'jira init' needs an interactive terminal; write the config file by hand instead");
        }

        let mut url_input = Input::<String>::new()
            .with_prompt("Jira URL (e.g. https://your-domain.atlassian.net)")
            .validate_with(|input: &String| -> Result<(), &str> {
                let trimmed = input.trim();
                if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                    Ok(())
                } else {
                    Err("URL must start with http:// or https://")
                }
            });
        if let Some(url) = existing.jira_url.clone() {
            url_input = url_input.default(url);
        }
        let jira_url = url_input
            .interact_text()
            .context("Failed to read Jira URL")?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let auth_choices = [
            "Jira Cloud (email + API token)",
            "Jira Server / Data Center (personal access token)",
        ];
        let auth_default = match existing.auth_type() {
            AuthType::Basic => 0,
            AuthType::Pat => 1,
        };
        let auth_type = match Select::new()
            .with_prompt("Authentication")
            .items(&auth_choices)
            .default(auth_default)
            .interact()
            .context("Failed to select authentication type")?
        {
            0 => AuthType::Basic,
            _ => AuthType::Pat,
        };

        let email = if auth_type == AuthType::Basic {
            let mut email_input = Input::<String>::new()
                .with_prompt("Email")
                .validate_with(|input: &String| -> Result<(), &str> {
                    if input.trim().is_empty() {
                        Err("Email cannot be empty")
                    } else {
                        Ok(())
                    }
                });
            if let Some(email) = existing.email.clone() {
                email_input = email_input.default(email);
            }
            Some(
                email_input
                    .interact_text()
                    .context("Failed to read email")?
                    .trim()
                    .to_string(),
            )
        } else {
            None
        };

        let token_prompt = match auth_type {
            AuthType::Basic => "API token",
            AuthType::Pat => "Personal access token",
        };
        let api_token = Password::new()
            .with_prompt(token_prompt)
            .interact()
            .context("Failed to read token")?;

        let default_project: String = Input::new()
            .with_prompt("Default project key (optional)")
            .allow_empty(true)
            .default(existing.default_project.clone().unwrap_or_default())
            .interact_text()
            .context("Failed to read default project")?;

        Ok(Config {
            jira_url: Some(jira_url),
            email,
            api_token: non_blank(Some(api_token)),
            auth_type: Some(auth_type),
            default_project: non_blank(Some(default_project.to_uppercase())),
        })
    }
}

impl Default for InteractivePrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the init wizard and write the result. Returns the path written.
pub fn run_init(existing: &Config, target: Option<&Path>) -> Result<PathBuf> {
    let prompter = InteractivePrompter::new();
    let config = prompter.prompt_config(existing)?;
    config.validate()?;

    let path = match target {
        Some(path) => path.to_path_buf(),
        None => Config::default_write_path()?,
    };
    config.save(&path)?;
    Ok(path)
}

fn build_issue(
    project: String,
    summary: String,
    description: String,
    issue_type: Option<String>,
    priority: Option<String>,
    assign_to_me: bool,
) -> NewIssue {
    let issue_type = issue_type.unwrap_or_else(|| ISSUE_TYPES[0].to_string());
    match priority {
        Some(priority) => NewIssue::builder()
            .project(project)
            .summary(summary)
            .description(description)
            .issue_type(issue_type)
            .priority(priority)
            .assign_to_me(assign_to_me)
            .build(),
        None => NewIssue::builder()
            .project(project)
            .summary(summary)
            .description(description)
            .issue_type(issue_type)
            .assign_to_me(assign_to_me)
            .build(),
    }
}

/// "None" and blank priorities mean "leave it to the project default".
fn normalize_priority(priority: Option<String>) -> Option<String> {
    non_blank(priority).filter(|p| !p.eq_ignore_ascii_case(NO_PRIORITY))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CreateOptions {
        CreateOptions {
            summary: Some("Fix login".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_non_tty_never_prompts() {
        let prompter = InteractivePrompter::new().with_tty_override(false);
        assert!(!prompter.should_prompt());
    }

    #[test]
    fn test_non_tty_uses_flags_and_default_project() {
        let prompter = InteractivePrompter::new().with_tty_override(false);
        let issue = prompter
            .collect_create_input(options(), Some("OPS"))
            .unwrap();

        assert_eq!(issue.project, "OPS");
        assert_eq!(issue.summary, "Fix login");
        assert_eq!(issue.issue_type, "Task");
        assert_eq!(issue.priority, None);
        assert!(!issue.assign_to_me);
    }

    #[test]
    fn test_flag_project_beats_default() {
        let mut opts = options();
        opts.project = Some("ENG".to_string());
        let issue = opts.into_new_issue(Some("OPS")).unwrap();
        assert_eq!(issue.project, "ENG");
    }

    #[test]
    fn test_missing_project_is_an_error() {
        let err = options().into_new_issue(None).unwrap_err();
        assert!(err.to_string().contains("project"));

        let err = options().into_new_issue(Some("  ")).unwrap_err();
        assert!(err.to_string().contains("project"));
    }

    #[test]
    fn test_missing_summary_is_an_error() {
        let opts = CreateOptions {
            project: Some("ENG".to_string()),
            summary: Some("   ".to_string()),
            ..Default::default()
        };
        let err = opts.into_new_issue(None).unwrap_err();
        assert!(err.to_string().contains("summary"));
    }

    #[test]
    fn test_flags_carry_through() {
        let opts = CreateOptions {
            project: Some("ENG".to_string()),
            summary: Some(" Crash on save ".to_string()),
            description: Some("Steps to reproduce".to_string()),
            issue_type: Some("Bug".to_string()),
            priority: Some("High".to_string()),
            assign_to_me: true,
        };
        let issue = opts.into_new_issue(None).unwrap();

        assert_eq!(issue.summary, "Crash on save");
        assert_eq!(issue.description, "Steps to reproduce");
        assert_eq!(issue.issue_type, "Bug");
        assert_eq!(issue.priority.as_deref(), Some("High"));
        assert!(issue.assign_to_me);
    }

    #[test]
    fn test_none_priority_is_dropped() {
        assert_eq!(normalize_priority(Some("None".to_string())), None);
        assert_eq!(normalize_priority(Some("none".to_string())), None);
        assert_eq!(normalize_priority(Some(" ".to_string())), None);
        assert_eq!(
            normalize_priority(Some("Low".to_string())).as_deref(),
            Some("Low")
        );
    }

    #[test]
    fn test_init_refuses_without_terminal() {
        let prompter = InteractivePrompter::new().with_tty_override(false);
        let err = prompter.prompt_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("interactive terminal"));
    }
}
