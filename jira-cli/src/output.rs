// ABOUTME: This module handles output formatting for the Jira CLI
// ABOUTME: It provides table and detail views with status/priority colours, plus JSON output

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use jira_sdk::{Comment, Ticket, Transition, decode_text};
use owo_colors::OwoColorize;
use std::fmt::Write as _;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::constants::{limits, ui};
use crate::types::{PriorityLevel, StatusCategory};

pub trait OutputFormat {
    fn format_tickets(&self, tickets: &[Ticket]) -> Result<String>;
    fn format_ticket(&self, ticket: &Ticket, comments: Option<&[Comment]>) -> Result<String>;
    fn format_transitions(&self, transitions: &[Transition]) -> Result<String>;
}

/// Shorten to `max_len` characters, ending in "..." when cut.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn format_timestamp(timestamp: Option<DateTime<FixedOffset>>) -> String {
    timestamp
        .map(|t| t.format(ui::DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub struct TableFormatter {
    use_color: bool,
    /// Site root used to print a browser link in the detail view
    browse_base: Option<String>,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            browse_base: None,
        }
    }

    pub fn with_browse_base(mut self, base: Option<String>) -> Self {
        self.browse_base = base.map(|b| b.trim().trim_end_matches('/').to_string());
        self
    }

    fn format_status(&self, status: &str) -> String {
        if self.use_color {
            StatusCategory::from(status).paint(status)
        } else {
            status.to_string()
        }
    }

    fn format_priority(&self, priority: Option<&str>) -> String {
        match priority {
            Some(name) if self.use_color => PriorityLevel::from(name).paint(name),
            Some(name) => name.to_string(),
            None => "-".to_string(),
        }
    }

    fn format_assignee(&self, assignee: Option<&str>) -> String {
        let text = truncate(assignee.unwrap_or("Unassigned"), limits::ASSIGNEE_MAX_LEN);

        match (self.use_color, assignee.is_some()) {
            (true, true) => text.yellow().to_string(),
            (true, false) => text.dimmed().to_string(),
            (false, _) => text,
        }
    }

    fn format_key(&self, key: &str) -> String {
        if self.use_color {
            key.cyan().to_string()
        } else {
            key.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Type")]
    issue_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Summary")]
    summary: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

#[derive(Tabled)]
struct TransitionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Transition")]
    name: String,
    #[tabled(rename = "Target Status")]
    target: String,
}

impl OutputFormat for TableFormatter {
    fn format_tickets(&self, tickets: &[Ticket]) -> Result<String> {
        let rows: Vec<TicketRow> = tickets
            .iter()
            .map(|ticket| TicketRow {
                key: self.format_key(&ticket.key),
                issue_type: ticket.fields.issue_type.name.clone(),
                status: self.format_status(&ticket.fields.status.name),
                priority: self.format_priority(
                    ticket.fields.priority.as_ref().map(|p| p.name.as_str()),
                ),
                assignee: self.format_assignee(
                    ticket
                        .fields
                        .assignee
                        .as_ref()
                        .map(|a| a.display_name.as_str()),
                ),
                summary: truncate(&ticket.fields.summary, limits::SUMMARY_MAX_LEN),
                updated: format_timestamp(ticket.fields.updated_at()),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }

    fn format_ticket(&self, ticket: &Ticket, comments: Option<&[Comment]>) -> Result<String> {
        let fields = &ticket.fields;
        let border = "=".repeat(ui::BORDER_LINE_LENGTH);
        let mut out = String::new();

        writeln!(out, "{}", border)?;
        writeln!(out, "{} {}", self.label("Key:"), self.format_key(&ticket.key))?;
        writeln!(out, "{} {}", self.label("Type:"), fields.issue_type.name)?;
        writeln!(
            out,
            "{} {}",
            self.label("Status:"),
            self.format_status(&fields.status.name)
        )?;
        writeln!(
            out,
            "{} {}",
            self.label("Priority:"),
            self.format_priority(fields.priority.as_ref().map(|p| p.name.as_str()))
        )?;
        writeln!(
            out,
            "{} {}",
            self.label("Assignee:"),
            self.format_assignee(fields.assignee.as_ref().map(|a| a.display_name.as_str()))
        )?;
        if let Some(reporter) = &fields.reporter {
            writeln!(out, "{} {}", self.label("Reporter:"), reporter.display_name)?;
        }
        if !fields.project.key.is_empty() {
            writeln!(
                out,
                "{} {} ({})",
                self.label("Project:"),
                fields.project.name,
                fields.project.key
            )?;
        }
        writeln!(
            out,
            "{} {}",
            self.label("Created:"),
            self.muted(&format_timestamp(fields.created_at()))
        )?;
        writeln!(
            out,
            "{} {}",
            self.label("Updated:"),
            self.muted(&format_timestamp(fields.updated_at()))
        )?;
        writeln!(out, "{}", border)?;

        writeln!(out)?;
        writeln!(out, "{}", self.label("Summary:"))?;
        writeln!(out, "  {}", fields.summary)?;

        writeln!(out)?;
        writeln!(out, "{}", self.label("Description:"))?;
        let description = decode_text(&fields.description);
        if description.trim().is_empty() {
            writeln!(out, "  {}", self.muted("(No description)"))?;
        } else {
            for line in description.lines() {
                writeln!(out, "  {}", line)?;
            }
        }

        if let Some(base) = &self.browse_base {
            writeln!(out)?;
            writeln!(out, "{} {}/browse/{}", self.label("Link:"), base, ticket.key)?;
        }

        if let Some(comments) = comments {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                self.label(&format!("Comments ({}):", comments.len()))
            )?;
            if comments.is_empty() {
                writeln!(out, "  {}", self.muted("(No comments)"))?;
            }
            for comment in comments {
                let author = comment
                    .author
                    .as_ref()
                    .map(|a| a.display_name.as_str())
                    .unwrap_or("Unknown");
                writeln!(
                    out,
                    "  {} {}",
                    self.label(author),
                    self.muted(&format_timestamp(comment.created_at()))
                )?;
                for line in comment.body_text().lines() {
                    writeln!(out, "    {}", line)?;
                }
            }
        }

        Ok(out.trim_end().to_string())
    }

    fn format_transitions(&self, transitions: &[Transition]) -> Result<String> {
        let rows: Vec<TransitionRow> = transitions
            .iter()
            .map(|t| TransitionRow {
                id: t.id.clone(),
                name: t.name.clone(),
                target: self.format_status(t.target()),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_tickets(&self, tickets: &[Ticket]) -> Result<String> {
        self.render(tickets)
    }

    fn format_ticket(&self, ticket: &Ticket, comments: Option<&[Comment]>) -> Result<String> {
        match comments {
            Some(comments) => self.render(&serde_json::json!({
                "issue": ticket,
                "comments": comments,
            })),
            None => self.render(ticket),
        }
    }

    fn format_transitions(&self, transitions: &[Transition]) -> Result<String> {
        self.render(transitions)
    }
}
