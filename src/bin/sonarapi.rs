//! Sonar API CLI binary.
//!
//! A command-line interface for interacting with the Sonar API.

use clap::Parser;
use sonarapi::cli::{Cli, Command, ProjectsCommand};
use sonarapi::output::{project_table, to_json};
use sonarapi::{List, PrettyPrint, Project, SonarClient};
use std::process::ExitCode;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let client = match cli.connection.to_config().map(|c| c.build()) {
        Some(Ok(c)) => c,
        Some(Err(e)) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
        None => {
            eprintln!("Error: no API token given");
            eprintln!("Hint: Set SONAR_TOKEN or pass --token");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &SonarClient, cli: Cli) -> sonarapi::Result<()> {
    match cli.command {
        Command::Projects(command) => handle_projects(client, command, cli.json).await,
    }
}

async fn handle_projects(
    client: &SonarClient,
    command: ProjectsCommand,
    json: bool,
) -> sonarapi::Result<()> {
    match &command {
        ProjectsCommand::List { .. } => {
            let options = command.list_options().unwrap_or_default();
            let response = Project::list(client, Some(&options)).await?;
            if json {
                println!("{}", to_json(&response.data)?);
            } else {
                println!("{}", project_table(&response.data));
            }
        }
        ProjectsCommand::Show { key } => {
            let project = Project::find(client, key).await?;
            if json {
                println!("{}", to_json(&project)?);
            } else {
                println!("{}", project.pretty_print());
            }
        }
    }
    Ok(())
}
