//! Command implementations.

pub mod bookmarks;
pub mod completions;
pub mod configure;
pub mod export;
pub mod import;
pub mod restore;
pub mod version;

use std::io::Write;

use colored::Colorize;

use crate::api::LinkdingClient;
use crate::config;
use crate::error::Result;
use crate::interchange::ImportReport;

/// Build a client from flag/env/file credentials.
pub(crate) fn client(server: Option<&str>, token: Option<&str>) -> Result<LinkdingClient> {
    let config = config::resolve_credentials(server, token)?;
    LinkdingClient::new(&config.server, &config.token)
}

/// Ask a y/N question on stdout and read the answer from stdin.
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Print the human-readable import summary: the four counters plus every
/// per-record error with its line number.
pub(crate) fn print_report(report: &ImportReport, dry_run: bool) {
    if dry_run {
        println!("  Would add:    {}", report.added);
        println!("  Would update: {}", report.updated);
        println!("  Would skip:   {}", report.skipped);
    } else {
        println!("  Added:   {}", report.added.to_string().green());
        println!("  Updated: {}", report.updated.to_string().cyan());
        println!("  Skipped: {}", report.skipped);
    }
    let failed = report.failed.to_string();
    println!(
        "  Failed:  {}",
        if report.failed > 0 {
            failed.red().to_string()
        } else {
            failed
        }
    );

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Errors:".red().bold());
        for err in &report.errors {
            println!("  line {}: {}", err.line, err.message);
        }
    }
}
