//! Prompts for a Sonar token and lists the first page of projects.
//!
//! Run with:
//! ```
//! SONAR_URL=http://localhost:9000/api/ cargo run --example simple
//! ```

use std::io::{self, BufRead, Write};

use sonarapi::{List, Project, ProjectListOptions, SonarClient};

#[tokio::main]
async fn main() -> sonarapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    print!("Sonar Token: ");
    io::stdout().flush().ok();

    let mut token = String::new();
    io::stdin()
        .lock()
        .read_line(&mut token)
        .map_err(|e| sonarapi::SonarError::ConfigMissing(format!("could not read token: {e}")))?;

    let base_url = std::env::var("SONAR_URL").unwrap_or_else(|_| "http://localhost:9000/api/".to_string());
    let client = SonarClient::with_token(token.trim(), Some(&base_url))?;
    println!("Connected to: {}", client.base_url());

    let options = ProjectListOptions::new(0, 0, Vec::<String>::new());
    let response = Project::list(&client, Some(&options)).await?;

    let paging = response.data.paging;
    println!(
        "Page {} of {} project(s), {} per page",
        paging.page_index, paging.total, paging.page_size
    );
    for project in &response.data {
        println!(
            "  - {} ({})",
            project.name.as_deref().unwrap_or("unnamed"),
            project.key.as_deref().unwrap_or("no key")
        );
    }

    Ok(())
}
