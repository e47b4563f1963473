// ABOUTME: Main entry point for the Jira CLI application
// ABOUTME: Parses arguments, loads configuration, builds the client and dispatches commands

use anyhow::Result;
use clap::{CommandFactory, Parser};
use jira_cli::cli::{Cli, Commands, JiraCommands};
use jira_cli::cli_output::{CliOutput, should_use_color};
use jira_cli::commands::App;
use jira_cli::completions::generate_completions;
use jira_cli::config::Config;
use jira_cli::interactive::{CreateOptions, InteractivePrompter, run_init};
use jira_cli::jql::ListFilter;
use jira_sdk::{JiraClient, JiraError};
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_color = should_use_color(cli.no_color);
    let output = CliOutput::with_color(use_color);

    if let Err(err) = run(cli, use_color).await {
        output.error(&format!("{:#}", err));
        if let Some(help) = err
            .downcast_ref::<JiraError>()
            .and_then(JiraError::help_text)
        {
            output.hint(help);
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

async fn run(cli: Cli, use_color: bool) -> Result<()> {
    let Cli {
        verbose,
        config: config_path,
        command,
        ..
    } = cli;

    match command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(shell, &mut cmd, &mut std::io::stdout());
            Ok(())
        }
        Commands::Init => init(config_path.as_deref(), use_color),
        Commands::Jira(command) => {
            run_jira(command, config_path.as_deref(), verbose, use_color).await
        }
    }
}

fn init(config_path: Option<&Path>, use_color: bool) -> Result<()> {
    // A broken existing file should not block rewriting it.
    let existing = Config::load(config_path).unwrap_or_default();
    let path = run_init(&existing, config_path)?;

    let output = CliOutput::with_color(use_color);
    output.success(&format!("Configuration written to {}", path.display()));
    output.info("Run 'jira test' to check the connection");
    Ok(())
}

async fn run_jira(
    command: JiraCommands,
    config_path: Option<&Path>,
    verbose: bool,
    use_color: bool,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let client = JiraClient::from_config(config.client_config(verbose)?)?;
    let mut app = App::new(client, config, use_color, std::io::stdout());

    match command {
        JiraCommands::Test => app.test_connection().await,
        JiraCommands::View {
            key,
            comments,
            json,
        } => app.view(&key, comments, json).await,
        JiraCommands::List {
            project,
            status,
            assignee,
            limit,
            json,
        } => {
            let filter = ListFilter {
                project,
                status,
                assignee,
            };
            app.list(filter, limit, json).await
        }
        JiraCommands::Create {
            project,
            summary,
            description,
            issue_type,
            priority,
            me,
        } => {
            let options = CreateOptions {
                project,
                summary,
                description,
                issue_type,
                priority,
                assign_to_me: me,
            };
            let issue = InteractivePrompter::new()
                .collect_create_input(options, app.config().default_project.as_deref())?;
            app.create(issue).await
        }
        JiraCommands::Comment { key, text } => app.comment(&key, &text).await,
        JiraCommands::Assign { key, who } => app.assign(&key, &who).await,
        JiraCommands::Status { key, status } => app.set_status(&key, &status).await,
        JiraCommands::Transitions { key, json } => app.transitions(&key, json).await,
        JiraCommands::Start { key } => app.start(&key).await,
        JiraCommands::Done { key } => app.done(&key).await,
        JiraCommands::Block { key, reason } => app.block(&key, reason.as_deref()).await,
    }
}
