//! The global design-token set.
//!
//! A [`TokenSet`] holds the global tokens (`colorPrimary`, `fontSize`, ...) and,
//! per component, the overrides a theme author declared for that component.
//! It is immutable once built; a different theme is a different set with a
//! different [`identity`](TokenSet::identity).
//!
//! # Construction
//!
//! Programmatic:
//!
//! ```rust
//! use tokenstyle::TokenSet;
//!
//! let tokens = TokenSet::new()
//!     .with("colorPrimary", "#1677ff")
//!     .with("fontSize", 14)
//!     .with_component("Button", [("paddingInline", 15.into())]);
//!
//! assert_eq!(tokens.get("fontSize").and_then(|v| v.as_number()), Some(14.0));
//! ```
//!
//! From YAML:
//!
//! ```rust
//! use tokenstyle::TokenSet;
//!
//! let tokens = TokenSet::from_yaml(r##"
//! token:
//!   colorPrimary: "#1677ff"
//!   fontSize: 14
//! components:
//!   Button:
//!     paddingInline: 15
//! "##).unwrap();
//!
//! assert!(tokens.component("Button").is_some());
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::value::{TokenMap, TokenValue};
use crate::error::TokenSetError;
use crate::hash::murmur2;

/// Recognized token file extensions.
pub const TOKEN_SET_EXTENSIONS: &[&str] = &[".yaml", ".yml", ".json"];

/// An immutable set of global tokens plus per-component overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Global tokens.
    #[serde(default)]
    token: TokenMap,
    /// Component overrides keyed by component identifier.
    #[serde(default)]
    components: BTreeMap<String, TokenMap>,
}

impl TokenSet {
    /// Creates an empty token set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a global token, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.token.insert(key.into(), value.into());
        self
    }

    /// Adds (or extends) the override map of a component.
    pub fn with_component<I, K>(mut self, component: impl Into<String>, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, TokenValue)>,
        K: Into<String>,
    {
        let entry = self.components.entry(component.into()).or_default();
        for (key, value) in overrides {
            entry.insert(key.into(), value);
        }
        self
    }

    /// Parses a token set from YAML.
    ///
    /// The document has two optional top-level maps: `token` for global tokens
    /// and `components` for per-component overrides.
    pub fn from_yaml(yaml: &str) -> Result<Self, TokenSetError> {
        serde_yaml::from_str(yaml).map_err(|e| TokenSetError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Parses a token set from JSON, same layout as [`from_yaml`](Self::from_yaml).
    pub fn from_json(json: &str) -> Result<Self, TokenSetError> {
        serde_json::from_str(json).map_err(|e| TokenSetError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Loads a token set from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`TokenSetError::UnsupportedFormat`] for other extensions,
    /// [`TokenSetError::Io`] when the file can't be read and
    /// [`TokenSetError::Parse`] when its content is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TokenSetError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();
        if !TOKEN_SET_EXTENSIONS.contains(&ext.as_str()) {
            return Err(TokenSetError::UnsupportedFormat(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| TokenSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = if ext == ".json" {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };
        parsed.map_err(|e| match e {
            TokenSetError::Parse { message, .. } => TokenSetError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Looks up a global token.
    pub fn get(&self, key: &str) -> Option<&TokenValue> {
        self.token.get(key)
    }

    /// Returns the global tokens.
    pub fn global(&self) -> &TokenMap {
        &self.token
    }

    /// Returns the override map declared for `component`, if any.
    pub fn component(&self, component: &str) -> Option<&TokenMap> {
        self.components.get(component)
    }

    /// Global tokens overlaid by the overrides of `component`.
    pub fn merged_for(&self, component: &str) -> TokenMap {
        let mut merged = self.token.clone();
        if let Some(overrides) = self.components.get(component) {
            merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Content-derived identity of this set.
    ///
    /// Equal sets have equal identities in every process; this feeds the
    /// `hash_id` of a [`TokenContext`](crate::TokenContext).
    pub fn identity(&self) -> String {
        let canonical = serde_json::to_string(self).unwrap_or_default();
        murmur2(&canonical)
    }
}
