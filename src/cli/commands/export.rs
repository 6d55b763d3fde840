//! Export command: serialize the remote collection to a file.

use std::fs;

use chrono::Utc;

use crate::api::BookmarkStore;
use crate::cli::ExportArgs;
use crate::error::Result;
use crate::interchange::{self, Bookmark};

pub fn execute(
    args: &ExportArgs,
    server: Option<&str>,
    token: Option<&str>,
    json: bool,
) -> Result<()> {
    let format = args.format.resolve(&args.file)?;

    let client = super::client(server, token)?;
    let remote = client.fetch_all(args.tag.as_deref(), args.include_archived)?;
    let records: Vec<Bookmark> = remote.into_iter().map(Into::into).collect();
    let count = records.len();

    let text = interchange::serialize(format, &records, Utc::now())?;
    fs::write(&args.file, text)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "file": args.file.display().to_string(),
                "format": format.name(),
                "exported": count,
            })
        );
    } else {
        println!(
            "Exported {count} bookmarks to {} ({})",
            args.file.display(),
            format.name()
        );
    }
    Ok(())
}
