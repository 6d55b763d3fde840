//! Configure command: validate and persist server credentials.

use crate::api::{BookmarkStore, FetchQuery, LinkdingClient};
use crate::config::{self, Config};
use crate::error::Result;

/// Validate the credentials against the server, then write the config
/// file. A bad URL or token fails here instead of on the first real
/// command.
pub fn execute(url: &str, token: &str, json: bool) -> Result<()> {
    let client = LinkdingClient::new(url, token)?;

    // Probe with the smallest possible request.
    let page = client.fetch_page(&FetchQuery {
        limit: 1,
        ..FetchQuery::default()
    })?;
    tracing::debug!(has_more = page.has_more, "credential probe succeeded");

    let path = config::save(&Config {
        server: url.to_string(),
        token: token.to_string(),
    })?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "server": url,
                "config_path": path.display().to_string(),
            })
        );
    } else {
        println!("Connected to {url}");
        println!("Configuration saved to {}", path.display());
    }
    Ok(())
}
