//! Restore command: wipe the remote collection, then import a file.

use std::fs;

use crate::api::BookmarkStore;
use crate::cli::RestoreArgs;
use crate::error::{Error, Result};
use crate::interchange::{self, engine, ImportOptions, Reconciler};

pub fn execute(
    args: &RestoreArgs,
    server: Option<&str>,
    token: Option<&str>,
    json: bool,
) -> Result<()> {
    let format = args.format.resolve(&args.file)?;
    let text = fs::read_to_string(&args.file)?;
    let parsed = interchange::parse(format, &text)?;

    // No interactive prompt exists in JSON mode, so the destructive path
    // demands an explicit --yes instead of proceeding silently.
    if json && !args.dry_run && !args.yes {
        return Err(Error::InvalidArgument(
            "restore deletes every remote bookmark; pass --yes to confirm".to_string(),
        ));
    }

    let client = super::client(server, token)?;
    let existing = client.fetch_all(None, true)?;

    if args.dry_run {
        // Counts only, zero remote mutations.
        let would_delete = existing.len();
        let would_create = parsed
            .records
            .iter()
            .filter(|r| !r.bookmark.url.is_empty())
            .count();

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "success": true,
                    "dry_run": true,
                    "would_delete": would_delete,
                    "would_create": would_create,
                })
            );
        } else {
            println!("Dry run for restore from {}:", args.file.display());
            println!();
            println!("  Would delete: {would_delete}");
            println!("  Would create: {would_create}");
        }
        return Ok(());
    }

    // An empty collection has nothing to confirm and nothing to delete.
    let deleted = if existing.is_empty() {
        0
    } else {
        if !args.yes
            && !super::confirm(&format!(
                "Delete all {} bookmarks from the server?",
                existing.len()
            ))?
        {
            println!("Aborted.");
            return Ok(());
        }
        engine::wipe(&client)?
    };
    tracing::info!(deleted, "wiped remote collection");

    let report = Reconciler::new(&client, ImportOptions::default()).run(parsed)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "file": args.file.display().to_string(),
                "deleted": deleted,
                "report": report,
            })
        );
    } else {
        println!("Restore complete for {}:", args.file.display());
        println!();
        println!("  Deleted: {deleted}");
        super::print_report(&report, false);
    }
    Ok(())
}
