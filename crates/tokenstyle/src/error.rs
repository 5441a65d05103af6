//! Error types for token loading and style registration.
//!
//! Two error families exist:
//!
//! - [`TokenSetError`]: loading a [`TokenSet`](crate::TokenSet) from YAML, JSON
//!   or a file failed.
//! - [`StyleError`]: the registration primitive could not complete a
//!   registration.
//!
//! A style function that panics is a programming error and is not represented
//! here; the panic reaches the caller unchanged.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a token set from text or files.
#[derive(Debug, Error)]
pub enum TokenSetError {
    /// The content could not be parsed as a token document.
    #[error("failed to parse token set{}: {message}", location(.path))]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Error message from the underlying parser.
        message: String,
    },

    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not one of [`TOKEN_SET_EXTENSIONS`](crate::token::TOKEN_SET_EXTENSIONS).
    #[error("unsupported token file extension for {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Errors raised by style and variable registration.
#[derive(Debug, Error)]
pub enum StyleError {
    /// A shared lock was poisoned by a panic in another registration.
    #[error("{what} lock poisoned")]
    Poisoned { what: &'static str },

    /// A custom registration primitive refused the registration.
    #[error("style registration failed for {key}: {message}")]
    Registration { key: String, message: String },
}

impl StyleError {
    pub(crate) fn poisoned(what: &'static str) -> Self {
        StyleError::Poisoned { what }
    }
}

/// Result type for registration operations.
pub type Result<T> = std::result::Result<T, StyleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_with_path() {
        let err = TokenSetError::Parse {
            path: Some(PathBuf::from("tokens/dark.yaml")),
            message: "bad indent".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("tokens/dark.yaml"));
        assert!(msg.contains("bad indent"));
    }

    #[test]
    fn test_parse_error_display_without_path() {
        let err = TokenSetError::Parse {
            path: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse token set: bad indent");
    }

    #[test]
    fn test_poisoned_display() {
        let err = StyleError::poisoned("style cache");
        assert_eq!(err.to_string(), "style cache lock poisoned");
    }
}
