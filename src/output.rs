//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output of a single
//! entity and table rendering for pages, as alternatives to JSON
//! serialization.

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::{Page, Paging, Project, Result, SonarError};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let key = self.key.as_deref().unwrap_or("(no key)");
        let divider = "─".repeat(key.chars().count().max(30));

        let mut lines = vec![format!("Project: {}", key), divider];

        let fields = [
            ("Name", &self.name),
            ("Organization", &self.organization),
            ("ID", &self.id),
            ("Qualifier", &self.qualifier),
            ("Visibility", &self.visibility),
            ("Revision", &self.revision),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                lines.push(format!("{:<16}{}", format!("{label}:"), value));
            }
        }

        match self.last_analyzed_at() {
            Some(at) => lines.push(format!("Last Analysis:  {}", at.format("%Y-%m-%d %H:%M:%S %z"))),
            None => {
                if let Some(ref raw) = self.last_analysis_date {
                    lines.push(format!("Last Analysis:  {}", raw));
                }
            }
        }

        lines.join("\n")
    }
}

/// Table row for a project listing.
#[derive(Tabled)]
struct ProjectRow {
    key: String,
    name: String,
    qualifier: String,
    visibility: String,
    #[tabled(rename = "last analysis")]
    last_analysis: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            key: p.key.clone().unwrap_or_default(),
            name: p.name.clone().unwrap_or_default(),
            qualifier: p.qualifier.clone().unwrap_or_default(),
            visibility: p.visibility.clone().unwrap_or_default(),
            last_analysis: p
                .last_analyzed_at()
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .or_else(|| p.last_analysis_date.clone())
                .unwrap_or_default(),
        }
    }
}

/// Render a page of projects as a table followed by a paging footer.
pub fn project_table(page: &Page<Project>) -> String {
    let rows: Vec<ProjectRow> = page.iter().map(ProjectRow::from).collect();
    format!("{}\n\n{}", Table::new(rows), page_footer(&page.paging))
}

/// Describe where a page sits in the full result set.
pub fn page_footer(paging: &Paging) -> String {
    format!(
        "Page {}/{} ({} total items)",
        paging.page_index,
        paging.total_pages(),
        paging.total
    )
}

/// Render `value` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SonarError::Encode`] if `value` cannot be represented as JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(SonarError::Encode)
}
