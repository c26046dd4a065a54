//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the sonarapi binary.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{ClientConfig, PASSWORD_ENV, TIMEOUT_ENV, TOKEN_ENV, URL_ENV};
use crate::models::{ProjectListOptions, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Sonar API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "sonarapi", about = "Sonar API CLI", version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and responses to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to connect and how to authenticate.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// API base URL (defaults to the public SonarCloud API).
    #[arg(long, global = true, env = URL_ENV)]
    pub url: Option<String>,

    /// API token, sent as the Basic auth username.
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Password, for username/password logins.
    #[arg(long, global = true, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, env = TIMEOUT_ENV)]
    pub timeout: Option<u64>,
}

impl ConnectionArgs {
    /// Client configuration, or `None` when no token was given.
    pub fn to_config(&self) -> Option<ClientConfig> {
        let token = self.token.clone().filter(|t| !t.is_empty())?;
        Some(ClientConfig {
            base_url: self.url.clone(),
            token,
            password: self.password.clone(),
            timeout: self.timeout.map(Duration::from_secs),
        })
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Work with projects.
    #[command(subcommand, alias = "project")]
    Projects(ProjectsCommand),
}

/// Project operations.
#[derive(Subcommand, Debug)]
pub enum ProjectsCommand {
    /// List one page of projects.
    List {
        /// Page number (1-indexed).
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,

        /// Number of items per page.
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Only list these project keys (comma-separated).
        #[arg(long, value_delimiter = ',')]
        projects: Vec<String>,
    },

    /// Show a single project by key.
    Show {
        /// The project key.
        key: String,
    },
}

impl ProjectsCommand {
    /// Options for the list request, or `None` for commands that do not list.
    pub fn list_options(&self) -> Option<ProjectListOptions> {
        match self {
            Self::List {
                page,
                page_size,
                projects,
            } => Some(ProjectListOptions::new(
                *page,
                *page_size,
                projects.iter().cloned(),
            )),
            Self::Show { .. } => None,
        }
    }
}
