//! CLI argument parsing tests.

use clap::Parser;
use sonarapi::cli::{Cli, Command, ProjectsCommand};
use sonarapi::ProjectListOptions;

fn list_command(cli: Cli) -> ProjectsCommand {
    match cli.command {
        Command::Projects(command) => command,
    }
}

#[test]
fn test_cli_parses_projects_list() {
    let cli = Cli::parse_from(["sonarapi", "projects", "list"]);

    assert!(!cli.json);
    assert!(!cli.verbose);
    let command = list_command(cli);
    match &command {
        ProjectsCommand::List {
            page,
            page_size,
            projects,
        } => {
            assert_eq!(*page, 1);
            assert_eq!(*page_size, 10);
            assert!(projects.is_empty());
        }
        other => panic!("Expected List command, got {other:?}"),
    }
    assert_eq!(command.list_options().unwrap(), ProjectListOptions::default());
}

#[test]
fn test_project_alias() {
    let cli = Cli::parse_from(["sonarapi", "project", "list"]);
    assert!(matches!(list_command(cli), ProjectsCommand::List { .. }));
}

#[test]
fn test_cli_parses_projects_show() {
    let cli = Cli::parse_from(["sonarapi", "projects", "show", "my-project"]);

    let command = list_command(cli);
    match &command {
        ProjectsCommand::Show { key } => assert_eq!(key, "my-project"),
        other => panic!("Expected Show command, got {other:?}"),
    }
    assert!(command.list_options().is_none());
}

#[test]
fn test_global_json_flag() {
    // --json before subcommand
    let cli = Cli::parse_from(["sonarapi", "--json", "projects", "list"]);
    assert!(cli.json);

    // --json after subcommand (global flag)
    let cli = Cli::parse_from(["sonarapi", "projects", "list", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_list_pagination_and_filter_args() {
    let cli = Cli::parse_from([
        "sonarapi",
        "projects",
        "list",
        "--page",
        "2",
        "--page-size",
        "50",
        "--projects",
        "api,web",
    ]);

    let options = list_command(cli).list_options().unwrap();
    assert_eq!(options.page, 2);
    assert_eq!(options.page_size, 50);
    assert_eq!(options.projects, vec!["api", "web"]);
}

#[test]
fn test_zero_page_is_normalized() {
    let cli = Cli::parse_from(["sonarapi", "projects", "list", "--page", "0", "--page-size", "0"]);

    let options = list_command(cli).list_options().unwrap();
    assert_eq!(options.page, 1);
    assert_eq!(options.page_size, 10);
}

#[test]
fn test_connection_args() {
    let cli = Cli::parse_from([
        "sonarapi",
        "--url",
        "http://localhost:9000/api/",
        "--token",
        "squ_abc",
        "--timeout",
        "15",
        "projects",
        "list",
    ]);

    let config = cli.connection.to_config().unwrap();
    assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000/api/"));
    assert_eq!(config.token, "squ_abc");
    assert_eq!(config.timeout, Some(std::time::Duration::from_secs(15)));

    let client = config.build().unwrap();
    assert_eq!(client.base_url().as_str(), "http://localhost:9000/api/");
}

#[test]
fn test_empty_token_gives_no_config() {
    let cli = Cli::parse_from(["sonarapi", "--token", "", "projects", "list"]);
    assert!(cli.connection.to_config().is_none());
}
