// ABOUTME: CLI argument definitions for Jira CLI application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::limits::DEFAULT_LIST_LIMIT;

#[derive(Parser, Debug)]
#[command(name = "jira")]
#[command(about = "A CLI for Jira Cloud and Jira Server/Data Center", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Read configuration from this file (overrides the standard locations)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactively create a configuration file
    Init,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: crate::completions::Shell,
    },
    #[command(flatten)]
    Jira(JiraCommands),
}

/// Commands that talk to a Jira server and so need a valid configuration.
#[derive(Subcommand, Debug)]
pub enum JiraCommands {
    /// Check the connection and credentials
    Test,
    /// Show details for a single issue
    View {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Include comments
        #[arg(short, long)]
        comments: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List issues matching filters
    List {
        /// Project key (defaults to default_project from config)
        #[arg(short, long)]
        project: Option<String>,

        /// Filter by status name
        #[arg(short, long)]
        status: Option<String>,

        /// Filter by assignee (use "@me" for yourself)
        #[arg(short, long)]
        assignee: Option<String>,

        /// Maximum number of issues to fetch
        #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new issue (prompts for anything missing when run in a terminal)
    Create {
        /// Project key
        #[arg(long)]
        project: Option<String>,

        /// Issue summary
        #[arg(long)]
        summary: Option<String>,

        /// Issue description
        #[arg(long)]
        description: Option<String>,

        /// Issue type (Task, Bug, Story, Epic, Subtask)
        #[arg(long = "type", value_name = "TYPE")]
        issue_type: Option<String>,

        /// Priority (Highest, High, Medium, Low, Lowest)
        #[arg(long)]
        priority: Option<String>,

        /// Assign the new issue to yourself
        #[arg(long)]
        me: bool,
    },
    /// Add a comment to an issue
    Comment {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Comment text
        text: String,
    },
    /// Assign an issue ("@me" for yourself)
    Assign {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Assignee: "@me"/"me", an account id (Cloud) or user name (Server/DC)
        who: String,
    },
    /// Move an issue to a new status (accepts names and shortcuts like "ip", "done")
    Status {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Target status
        status: String,
    },
    /// List the transitions currently available for an issue
    Transitions {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assign an issue to yourself and move it to In Progress
    Start {
        /// Issue key (e.g., PROJ-123)
        key: String,
    },
    /// Move an issue to Done
    Done {
        /// Issue key (e.g., PROJ-123)
        key: String,
    },
    /// Move an issue to Blocked, optionally leaving a comment with the reason
    Block {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Why the issue is blocked
        #[arg(short, long)]
        reason: Option<String>,
    },
}
