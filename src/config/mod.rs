//! Configuration management.
//!
//! Credentials live in a JSON file at `~/.ldg/config.json`. Resolution
//! priority for both the server URL and the token:
//!
//! 1. Explicit CLI flag (`--server` / `--token`)
//! 2. Environment (`LINKDING_URL` / `LINKDING_TOKEN`)
//! 3. The config file
//!
//! `LDG_CONFIG_DIR` overrides the config directory, which keeps tests and
//! scripted setups away from the real file.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Persisted credentials for one linkding server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server base URL, e.g. `https://linkding.example.com`.
    pub server: String,
    /// REST API token from the server's integration settings.
    pub token: String,
}

/// The config directory, honoring the `LDG_CONFIG_DIR` override.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("LDG_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    directories::BaseDirs::new().map(|b| b.home_dir().join(".ldg"))
}

/// Path of the config file.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Load the config file, if one exists.
///
/// # Errors
///
/// Returns a config error when the file exists but cannot be read or
/// parsed.
pub fn load() -> Result<Option<Config>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }

    let text = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    let config = serde_json::from_str(&text)
        .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;
    Ok(Some(config))
}

/// Write the config file, creating the directory as needed.
///
/// On unix the file is chmodded to 0600: it holds a live API token.
///
/// # Errors
///
/// Returns an error when the directory or file cannot be written.
pub fn save(config: &Config) -> Result<PathBuf> {
    let path = config_path()
        .ok_or_else(|| Error::Config("cannot determine home directory".to_string()))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut text = serde_json::to_string_pretty(config)?;
    text.push('\n');
    fs::write(&path, text)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(path)
}

/// Resolve effective credentials from flags, environment, and the file.
///
/// # Errors
///
/// Returns [`Error::NotConfigured`] when either half is missing from every
/// source.
pub fn resolve_credentials(
    server_flag: Option<&str>,
    token_flag: Option<&str>,
) -> Result<Config> {
    let mut server = server_flag
        .map(str::to_string)
        .or_else(|| non_empty_env("LINKDING_URL"));
    let mut token = token_flag
        .map(str::to_string)
        .or_else(|| non_empty_env("LINKDING_TOKEN"));

    // The file is only consulted for halves the flags and environment did
    // not supply, so a broken config file cannot block flag-only calls.
    if server.is_none() || token.is_none() {
        if let Some(file) = load()? {
            server = server.or(Some(file.server));
            token = token.or(Some(file.token));
        }
    }

    match (server, token) {
        (Some(server), Some(token)) => Ok(Config { server, token }),
        _ => Err(Error::NotConfigured),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_win_over_everything() {
        let config = resolve_credentials(Some("https://flag.example.com"), Some("flag-token"))
            .unwrap();
        assert_eq!(config.server, "https://flag.example.com");
        assert_eq!(config.token, "flag-token");
    }

    // Env mutation is process-global, so everything touching
    // LDG_CONFIG_DIR lives in this one test.
    #[test]
    fn test_config_file_round_trip_and_resolution() {
        let dir = tempfile::TempDir::new().unwrap();
        std::env::set_var("LDG_CONFIG_DIR", dir.path());

        // Empty dir: nothing resolvable.
        let err = resolve_credentials(None, Some("token-only")).unwrap_err();
        assert!(matches!(err, Error::NotConfigured));

        let config = Config {
            server: "https://linkding.example.com".into(),
            token: "secret".into(),
        };
        let path = save(&config).unwrap();
        assert!(path.starts_with(dir.path()));

        let loaded = load().unwrap().unwrap();
        assert_eq!(loaded.server, config.server);
        assert_eq!(loaded.token, config.token);

        // File supplies both halves; a flag still overrides its half.
        let resolved = resolve_credentials(None, Some("override")).unwrap();
        assert_eq!(resolved.server, config.server);
        assert_eq!(resolved.token, "override");

        // A corrupt file blocks resolution only when a half is missing.
        fs::write(config_path().unwrap(), "{not json").unwrap();
        let resolved =
            resolve_credentials(Some("https://flag.example.com"), Some("flag-token")).unwrap();
        assert_eq!(resolved.token, "flag-token");
        let err = resolve_credentials(Some("https://flag.example.com"), None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        std::env::remove_var("LDG_CONFIG_DIR");
    }
}
