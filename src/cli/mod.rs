//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::interchange::FormatSelector;

pub mod commands;

/// ldg - manage linkding bookmarks from the command line
#[derive(Parser, Debug)]
#[command(name = "ldg", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// linkding server URL (overrides the config file)
    #[arg(long, global = true, env = "LINKDING_URL")]
    pub server: Option<String>,

    /// API token (overrides the config file)
    #[arg(long, global = true, env = "LINKDING_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store server credentials in the config file
    Configure {
        /// linkding server URL
        url: String,

        /// REST API token
        token: String,
    },

    /// Add a bookmark
    Add(AddArgs),

    /// List bookmarks
    List(ListArgs),

    /// Show one bookmark
    Show {
        /// Bookmark ID
        id: i64,
    },

    /// Update fields of a bookmark
    Update(UpdateArgs),

    /// Delete a bookmark
    Delete {
        /// Bookmark ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Import bookmarks from a file (JSON, HTML, or CSV)
    Import(ImportArgs),

    /// Export bookmarks to a file (JSON, HTML, or CSV)
    Export(ExportArgs),

    /// Delete every remote bookmark, then import a file
    Restore(RestoreArgs),

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Bookmark Commands
// ============================================================================

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Bookmark URL
    pub url: String,

    /// Title (the server scrapes one if omitted)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Private notes
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Mark as unread
    #[arg(long)]
    pub unread: bool,

    /// Share publicly
    #[arg(long)]
    pub shared: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Full-text search query
    #[arg(long)]
    pub query: Option<String>,

    /// Restrict to bookmarks carrying this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Maximum bookmarks to return
    #[arg(short, long, default_value = "25")]
    pub limit: usize,

    /// Pagination offset
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// List the archived partition instead of the main one
    #[arg(long)]
    pub archived: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Bookmark ID
    pub id: i64,

    /// New URL
    #[arg(long)]
    pub url: Option<String>,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New private notes
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Replace tags (repeatable; pass once with an empty value to clear)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Set or clear the unread flag
    #[arg(long)]
    pub unread: Option<bool>,

    /// Set or clear the shared flag
    #[arg(long)]
    pub shared: Option<bool>,

    /// Move into or out of the archive
    #[arg(long)]
    pub archived: Option<bool>,
}

// ============================================================================
// Interchange Commands
// ============================================================================

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// File to import
    pub file: PathBuf,

    /// Interchange format (detected from the extension by default)
    #[arg(short, long, value_enum, default_value_t)]
    pub format: FormatSelector,

    /// Classify and count without touching the server
    #[arg(long)]
    pub dry_run: bool,

    /// Skip records whose URL already exists instead of overwriting
    #[arg(long)]
    pub skip_duplicates: bool,

    /// Tag appended to every imported bookmark (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// File to write
    pub file: PathBuf,

    /// Interchange format (detected from the extension by default)
    #[arg(short, long, value_enum, default_value_t)]
    pub format: FormatSelector,

    /// Export only bookmarks carrying this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Include the archived partition
    #[arg(long)]
    pub include_archived: bool,
}

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// File to restore from
    pub file: PathBuf,

    /// Interchange format (detected from the extension by default)
    #[arg(short, long, value_enum, default_value_t)]
    pub format: FormatSelector,

    /// Report what would be deleted and created, change nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
