// ABOUTME: Command handlers that drive the Jira client and render results for the terminal
// ABOUTME: Data goes to the provided writer; warnings and confirmations go through CliOutput

use anyhow::{Context, Result};
use jira_sdk::{JiraClient, NewIssue};
use std::io::Write;

use crate::cli_output::CliOutput;
use crate::config::Config;
use crate::constants::status;
use crate::jql::ListFilter;
use crate::output::{JsonFormatter, OutputFormat, TableFormatter};

pub struct App<W: Write> {
    client: JiraClient,
    config: Config,
    cli: CliOutput,
    use_color: bool,
    out: W,
}

impl<W: Write> App<W> {
    pub fn new(client: JiraClient, config: Config, use_color: bool, out: W) -> Self {
        Self {
            client,
            config,
            cli: CliOutput::with_color(use_color),
            use_color,
            out,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hand back the writer, mainly so tests can inspect what was printed.
    pub fn into_output(self) -> W {
        self.out
    }

    fn formatter(&self, json: bool) -> Box<dyn OutputFormat> {
        if json {
            Box::new(JsonFormatter::new(true))
        } else {
            Box::new(
                TableFormatter::new(self.use_color)
                    .with_browse_base(
                        self.config
                            .jira_url
                            .as_deref()
                            .map(|url| url.trim().trim_end_matches('/').to_string()),
                    ),
            )
        }
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text).context("Failed to write output")
    }

    pub async fn test_connection(&mut self) -> Result<()> {
        let me = self.client.myself().await?;
        let who = if me.email_address.is_empty() {
            me.display_name.clone()
        } else {
            format!("{} <{}>", me.display_name, me.email_address)
        };
        self.emit(&format!(
            "Connected to {} as {} ({} API)",
            self.config.jira_url.as_deref().unwrap_or_default(),
            who,
            self.client.dialect().api_version
        ))
    }

    pub async fn view(&mut self, key: &str, with_comments: bool, json: bool) -> Result<()> {
        let ticket = self.client.get_issue(key).await?;
        let comments = if with_comments {
            Some(self.client.comments(key).await?)
        } else {
            None
        };

        let rendered = self
            .formatter(json)
            .format_ticket(&ticket, comments.as_deref())?;
        self.emit(&rendered)
    }

    pub async fn list(&mut self, filter: ListFilter, limit: u32, json: bool) -> Result<()> {
        let jql = filter
            .with_default_project(self.config.default_project.as_deref())
            .to_jql();
        let results = self.client.search(&jql, limit).await?;

        if results.issues.is_empty() && !json {
            return self.emit("No issues found.");
        }

        let rendered = self.formatter(json).format_tickets(&results.issues)?;
        self.emit(&rendered)
    }

    pub async fn create(&mut self, issue: NewIssue) -> Result<()> {
        let created = self.client.create_issue(&issue).await?;

        self.cli.success(&format!("Created {}", created.key));
        match self.config.browse_url(&created.key) {
            Some(url) => self.emit(&format!("{}\n{}", created.key, url)),
            None => self.emit(&created.key),
        }
    }

    pub async fn comment(&mut self, key: &str, text: &str) -> Result<()> {
        self.client.add_comment(key, text).await?;
        self.cli.success(&format!("Added comment to {}", key));
        Ok(())
    }

    pub async fn assign(&mut self, key: &str, who: &str) -> Result<()> {
        self.client.set_assignee(key, who).await?;
        self.cli.success(&format!("Assigned {} to {}", key, who));
        Ok(())
    }

    pub async fn set_status(&mut self, key: &str, wanted: &str) -> Result<()> {
        let transition = self.client.transition_status(key, wanted).await?;
        self.cli
            .success(&format!("Moved {} to {}", key, transition.target()));
        Ok(())
    }

    pub async fn transitions(&mut self, key: &str, json: bool) -> Result<()> {
        let transitions = self.client.transitions(key).await?;

        if transitions.is_empty() && !json {
            return self.emit(&format!("No transitions available for {}.", key));
        }

        let rendered = self.formatter(json).format_transitions(&transitions)?;
        self.emit(&rendered)
    }

    /// Take the issue: assign to the caller, then move it to In Progress.
    pub async fn start(&mut self, key: &str) -> Result<()> {
        if let Err(err) = self.client.set_assignee(key, "@me").await {
            self.cli
                .warning(&format!("Could not assign {} to you: {}", key, err));
        }
        self.set_status(key, status::IN_PROGRESS).await
    }

    pub async fn done(&mut self, key: &str) -> Result<()> {
        self.set_status(key, status::DONE).await
    }

    /// Move to Blocked; the reason comment is best effort once the status change landed.
    pub async fn block(&mut self, key: &str, reason: Option<&str>) -> Result<()> {
        self.set_status(key, status::BLOCKED).await?;

        if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
            if let Err(err) = self.client.add_comment(key, reason).await {
                self.cli
                    .warning(&format!("Could not add the reason comment: {}", err));
            }
        }
        Ok(())
    }
}
