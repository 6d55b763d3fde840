//! Import command: parse an interchange file and reconcile it into the
//! remote collection.

use std::fs;

use crate::cli::ImportArgs;
use crate::error::Result;
use crate::interchange::{self, ImportOptions, Reconciler};

pub fn execute(
    args: &ImportArgs,
    server: Option<&str>,
    token: Option<&str>,
    json: bool,
) -> Result<()> {
    // Format detection and file parsing happen before any network setup;
    // all three can only fail at file level.
    let format = args.format.resolve(&args.file)?;
    let text = fs::read_to_string(&args.file)?;
    let parsed = interchange::parse(format, &text)?;

    tracing::info!(
        file = %args.file.display(),
        format = format.name(),
        records = parsed.records.len(),
        "parsed import file"
    );

    let client = super::client(server, token)?;
    let options = ImportOptions {
        dry_run: args.dry_run,
        skip_duplicates: args.skip_duplicates,
        additional_tags: args.tags.clone(),
    };
    let report = Reconciler::new(&client, options).run(parsed)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "file": args.file.display().to_string(),
                "format": format.name(),
                "dry_run": args.dry_run,
                "report": report,
            })
        );
    } else {
        if args.dry_run {
            println!("Dry run for {} ({}):", args.file.display(), format.name());
        } else {
            println!("Import complete for {} ({}):", args.file.display(), format.name());
        }
        println!();
        super::print_report(&report, args.dry_run);
    }
    Ok(())
}
