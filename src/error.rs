//! Error types for the auth settings console
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

use crate::domain::Category;

/// Main error type for the application
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations, terminal, etc.)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Transport-level HTTP failure (connect, timeout, body decode)
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    /// Backend answered with a non-success status
    #[snafu(display("Backend returned {status}: {message}"))]
    Status { status: u16, message: String },

    /// The session was opened without edit permission
    #[snafu(display("Session is read-only"))]
    ReadOnly,

    /// The fixed trailing form configuration cannot be moved or removed
    #[snafu(display("Configuration {configuration} is pinned to the end of the {} list", category.key()))]
    Pinned { configuration: i64, category: Category },

    /// Index outside the bounds of a category list
    #[snafu(display("Index {index} is out of range for {} (length {len})", category.key()))]
    OutOfRange {
        category: Category,
        index: usize,
        len: usize,
    },

    /// Operation requires a loaded session
    #[snafu(display("Session has not been loaded"))]
    NotLoaded,
}

impl Error {
    /// Whether the error came back from the backend rather than local validation
    pub fn is_backend(&self) -> bool {
        matches!(self, Error::Http { .. } | Error::Status { .. })
    }

    /// Map an HTTP status and response text to an error
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let message = match status.as_u16() {
            401 => format!("Unauthorized: {body}"),
            403 => format!("Forbidden: {body}"),
            404 => format!("Not found: {body}"),
            500..=599 => format!("Server error: {body}"),
            _ => body,
        };
        Error::Status {
            status: status.as_u16(),
            message,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Http { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_keeps_code_and_body() {
        let err = Error::from_status(reqwest::StatusCode::FORBIDDEN, "no admin".to_string());
        match err {
            Error::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden: no admin");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pinned_display_names_category() {
        let err = Error::Pinned {
            configuration: 0,
            category: Category::Form,
        };
        assert_eq!(
            err.to_string(),
            "Configuration 0 is pinned to the end of the formConfigurations list"
        );
        assert!(!err.is_backend());
    }
}
