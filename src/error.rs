//! Error types for the ldg CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=config, 3=not_found, 4=validation, etc.)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ldg operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config (exit 2)
    NotConfigured,
    ConfigError,

    // Not Found (exit 3)
    BookmarkNotFound,

    // Validation (exit 4)
    InvalidArgument,
    RequiredField,

    // Remote API (exit 5)
    ApiError,
    Unauthorized,
    HttpError,

    // Interchange (exit 6)
    UnknownFormat,
    MalformedFile,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::BookmarkNotFound => "BOOKMARK_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::RequiredField => "REQUIRED_FIELD",
            Self::ApiError => "API_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::HttpError => "HTTP_ERROR",
            Self::UnknownFormat => "UNKNOWN_FORMAT",
            Self::MalformedFile => "MALFORMED_FILE",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::NotConfigured | Self::ConfigError => 2,
            Self::BookmarkNotFound => 3,
            Self::InvalidArgument | Self::RequiredField => 4,
            Self::ApiError | Self::Unauthorized | Self::HttpError => 5,
            Self::UnknownFormat | Self::MalformedFile => 6,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether a scripted caller should retry with corrected input.
    ///
    /// True for validation errors and unknown formats (fixable by the
    /// caller). False for connectivity, not-found, or internal errors.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument | Self::RequiredField | Self::UnknownFormat
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in ldg CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not configured: run `ldg configure <url> <token>` first")]
    NotConfigured,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bookmark not found: {id}")]
    BookmarkNotFound { id: i64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Required field missing: {0}")]
    RequiredField(&'static str),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: the server rejected the token")]
    Unauthorized,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cannot determine format of {}", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("Malformed {format} file: {message}")]
    MalformedFile {
        format: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotConfigured => ErrorCode::NotConfigured,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::BookmarkNotFound { .. } => ErrorCode::BookmarkNotFound,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::RequiredField(_) => ErrorCode::RequiredField,
            Self::Api { .. } => ErrorCode::ApiError,
            Self::Unauthorized => ErrorCode::Unauthorized,
            Self::Http(_) => ErrorCode::HttpError,
            Self::UnknownFormat { .. } => ErrorCode::UnknownFormat,
            Self::MalformedFile { .. } => ErrorCode::MalformedFile,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for scripts and humans.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotConfigured => Some(
                "Run `ldg configure https://linkding.example.com <token>` or set \
                 LINKDING_URL and LINKDING_TOKEN"
                    .to_string(),
            ),

            Self::Unauthorized => Some(
                "Check the API token under Settings > Integrations on your linkding server"
                    .to_string(),
            ),

            Self::BookmarkNotFound { id } => Some(format!(
                "No bookmark with ID {id}. Use `ldg list` to see available bookmarks."
            )),

            Self::UnknownFormat { .. } => Some(
                "Use a .json, .html, or .csv file name, or pass --format explicitly".to_string(),
            ),

            Self::MalformedFile { format, .. } => Some(format!(
                "The file could not be read as {format}. Pass --format if the extension is wrong."
            )),

            Self::Config(_)
            | Self::InvalidArgument(_)
            | Self::RequiredField(_)
            | Self::Api { .. }
            | Self::Http(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint. Scripts parse this instead of stderr text.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::NotConfigured.exit_code(), 2);
        assert_eq!(Error::BookmarkNotFound { id: 7 }.exit_code(), 3);
        assert_eq!(Error::RequiredField("url").exit_code(), 4);
        assert_eq!(
            Error::Api {
                status: 500,
                message: "boom".into()
            }
            .exit_code(),
            5
        );
        assert_eq!(
            Error::UnknownFormat {
                path: PathBuf::from("x.txt")
            }
            .exit_code(),
            6
        );
        assert_eq!(Error::Other("?".into()).exit_code(), 1);
    }

    #[test]
    fn test_structured_json_shape() {
        let err = Error::UnknownFormat {
            path: PathBuf::from("bookmarks.txt"),
        };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "UNKNOWN_FORMAT");
        assert_eq!(json["error"]["exit_code"], 6);
        assert_eq!(json["error"]["retryable"], true);
        assert!(json["error"]["hint"].is_string());
    }

    #[test]
    fn test_hint_for_not_configured() {
        let hint = Error::NotConfigured.hint().unwrap();
        assert!(hint.contains("ldg configure"));
    }
}
