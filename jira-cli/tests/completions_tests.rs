// ABOUTME: Tests for shell completion generation functionality
// ABOUTME: Generates scripts from the real command tree for every supported shell

use clap::{CommandFactory, ValueEnum};
use jira_cli::cli::Cli;
use jira_cli::completions::{Shell, generate_completions};
use std::io::Cursor;

fn generate(shell: Shell) -> String {
    let mut output = Cursor::new(Vec::new());
    let mut cmd = Cli::command();
    generate_completions(shell, &mut cmd, &mut output);
    String::from_utf8(output.into_inner()).expect("Completion output should be UTF-8")
}

#[test]
fn test_every_shell_produces_a_script() {
    for &shell in Shell::value_variants() {
        let script = generate(shell);
        assert!(!script.is_empty(), "{:?} completions are empty", shell);
        assert!(script.contains("jira"), "{:?} completions lack the binary name", shell);
    }
}

#[test]
fn test_bash_completion_lists_subcommands() {
    let script = generate(Shell::Bash);

    assert!(script.contains("_jira"));
    for name in ["view", "list", "create", "transitions", "block"] {
        assert!(script.contains(name), "bash completions lack '{}'", name);
    }
}

#[test]
fn test_zsh_completion_has_compdef() {
    let script = generate(Shell::Zsh);
    assert!(script.contains("#compdef jira"));
    assert!(script.contains("--no-color"));
}

#[test]
fn test_fish_completion_uses_complete_builtin() {
    let script = generate(Shell::Fish);
    assert!(script.contains("complete -c jira"));
}

#[test]
fn test_powershell_completion_registers_completer() {
    let script = generate(Shell::PowerShell);
    assert!(script.contains("Register-ArgumentCompleter"));
}
