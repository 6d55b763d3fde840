//! Single-bookmark CRUD commands: add, list, show, update, delete.

use colored::Colorize;

use crate::api::types::RemoteBookmark;
use crate::api::{BookmarkPatch, BookmarkStore, FetchQuery};
use crate::cli::{AddArgs, ListArgs, UpdateArgs};
use crate::error::{Error, Result};
use crate::interchange::Bookmark;

pub fn add(args: &AddArgs, server: Option<&str>, token: Option<&str>, json: bool) -> Result<()> {
    if args.url.trim().is_empty() {
        return Err(Error::RequiredField("url"));
    }

    let client = super::client(server, token)?;

    let bookmark = Bookmark {
        url: args.url.clone(),
        title: args.title.clone().unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        notes: args.notes.clone().unwrap_or_default(),
        tags: args.tags.clone(),
        unread: args.unread,
        shared: args.shared,
        ..Bookmark::default()
    };

    let created = client.create(&bookmark)?;
    if json {
        println!("{}", serde_json::to_string(&created)?);
    } else {
        println!("Added bookmark {}: {}", created.id, created.url);
    }
    Ok(())
}

pub fn list(args: &ListArgs, server: Option<&str>, token: Option<&str>, json: bool) -> Result<()> {
    let client = super::client(server, token)?;

    let page = client.fetch_page(&FetchQuery {
        search: args.query.clone(),
        tag: args.tag.clone(),
        archived: args.archived,
        limit: args.limit,
        offset: args.offset,
    })?;
    print_listing(&page.items, page.has_more, json)
}

fn print_listing(items: &[RemoteBookmark], has_more: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No bookmarks found.");
        return Ok(());
    }

    for b in items {
        let title = if b.title.is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            b.title.bold().to_string()
        };
        let tags = if b.tag_names.is_empty() {
            String::new()
        } else {
            format!("  #{}", b.tag_names.join(" #")).cyan().to_string()
        };
        println!("{:>6}  {title}{tags}", b.id.to_string().dimmed());
        println!("        {}", b.url);
    }
    if has_more {
        println!();
        println!("{}", "More results available; use --offset.".dimmed());
    }
    Ok(())
}

pub fn show(id: i64, server: Option<&str>, token: Option<&str>, json: bool) -> Result<()> {
    let client = super::client(server, token)?;
    let b = client.get(id)?;

    if json {
        println!("{}", serde_json::to_string(&b)?);
        return Ok(());
    }

    println!("{}  {}", b.id.to_string().dimmed(), b.title.bold());
    println!("URL:         {}", b.url);
    if !b.description.is_empty() {
        println!("Description: {}", b.description);
    }
    if !b.notes.is_empty() {
        println!("Notes:       {}", b.notes);
    }
    if !b.tag_names.is_empty() {
        println!("Tags:        {}", b.tag_names.join(", "));
    }
    if let Some(added) = b.date_added {
        println!("Added:       {added}");
    }
    println!(
        "Flags:       unread={} shared={} archived={}",
        b.unread, b.shared, b.is_archived
    );
    Ok(())
}

pub fn update(
    args: &UpdateArgs,
    server: Option<&str>,
    token: Option<&str>,
    json: bool,
) -> Result<()> {
    let patch = BookmarkPatch {
        url: args.url.clone(),
        title: args.title.clone(),
        description: args.description.clone(),
        notes: args.notes.clone(),
        // A single empty --tag clears the list.
        tag_names: if args.tags.is_empty() {
            None
        } else {
            Some(
                args.tags
                    .iter()
                    .filter(|t| !t.is_empty())
                    .cloned()
                    .collect(),
            )
        },
        unread: args.unread,
        shared: args.shared,
        is_archived: args.archived,
    };

    if patch.is_empty() {
        return Err(Error::InvalidArgument(
            "nothing to update: pass at least one field".to_string(),
        ));
    }

    let client = super::client(server, token)?;
    let updated = client.update(args.id, &patch)?;

    if json {
        println!("{}", serde_json::to_string(&updated)?);
    } else {
        println!("Updated bookmark {}: {}", updated.id, updated.url);
    }
    Ok(())
}

pub fn delete(
    id: i64,
    yes: bool,
    server: Option<&str>,
    token: Option<&str>,
    json: bool,
) -> Result<()> {
    if !yes {
        if json {
            return Err(Error::InvalidArgument(
                "pass --yes to delete without a prompt".to_string(),
            ));
        }
        if !super::confirm(&format!("Delete bookmark {id}?"))? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let client = super::client(server, token)?;

    if !client.delete(id)? {
        return Err(Error::BookmarkNotFound { id });
    }

    if json {
        println!("{}", serde_json::json!({ "success": true, "deleted": id }));
    } else {
        println!("Deleted bookmark {id}.");
    }
    Ok(())
}
