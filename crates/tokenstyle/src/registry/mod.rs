//! The registration primitive.
//!
//! Style derivation is expensive; injecting the same rules twice is wrong. The
//! [`RegisterStyle`] trait is the "register once per key" contract the
//! pipeline builds on:
//!
//! - [`register`](RegisterStyle::register) runs its producer only when the key
//!   is new, and returns the stored [`StyleEntry`] otherwise.
//! - [`register_css_var`](RegisterStyle::register_css_var) does the same for a
//!   component's variable mapping.
//!
//! [`StyleCache`] is the in-memory implementation. Hosts with their own sheet
//! management implement the trait instead.

mod cache;
mod css_var;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

pub use cache::StyleCache;
pub use css_var::{serialize_css_var, transform_token, CssVarDescriptor, CssVarEntry};

use crate::calc::TokenMode;
use crate::error::Result;
use crate::style::StyleList;
use crate::token::TokenMap;

/// Identity of a registered style: the token context hash, the theme it was
/// derived from, and the path `[component pair, instance prefix, icon prefix]`.
///
/// `hash_id` can be overridden (or emptied) by the host, so the theme is kept
/// as its own component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StyleKey {
    pub hash_id: String,
    pub theme: String,
    pub path: Vec<String>,
}

impl StyleKey {
    pub fn new<I, S>(hash_id: impl Into<String>, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hash_id: hash_id.into(),
            theme: String::new(),
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the theme component, usually [`TokenContext::theme_key`].
    ///
    /// [`TokenContext::theme_key`]: crate::context::TokenContext::theme_key
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.hash_id, self.theme, self.path.join("|"))
    }
}

/// Configuration forwarded with every registration.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterConfig {
    /// Identity hash of the token context.
    pub hash_id: String,
    /// CSP nonce, forwarded verbatim.
    pub nonce: Option<String>,
    /// Skip this style when extracting for server rendering.
    pub client_only: bool,
    /// Cascade layer name.
    pub layer: Option<String>,
    /// Lower orders come first.
    pub order: i32,
    pub mode: TokenMode,
    /// Variable scope class, in variable mode.
    pub css_var_key: Option<String>,
}

/// A registered style artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleEntry {
    pub key: StyleKey,
    pub styles: StyleList,
    pub hash_id: String,
    #[serde(skip)]
    pub mode: TokenMode,
    pub css_var_key: Option<String>,
    pub order: i32,
    pub layer: Option<String>,
    pub nonce: Option<String>,
    pub client_only: bool,
    /// Registration sequence number, for stable ordering.
    pub seq: u64,
}

impl StyleEntry {
    /// Serialized CSS of all styles in list order.
    pub fn css(&self) -> String {
        self.styles
            .iter()
            .flatten()
            .map(|interpolation| interpolation.to_css())
            .collect()
    }

    /// Whether the producer returned no styles (injection disabled).
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// The "register once per key" primitive.
pub trait RegisterStyle: Send + Sync {
    /// Registers `key`, running `producer` only if the key is new.
    fn register(
        &self,
        key: StyleKey,
        config: &RegisterConfig,
        producer: &mut dyn FnMut() -> StyleList,
    ) -> Result<Arc<StyleEntry>>;

    /// Registers a variable mapping, running `producer` only if the
    /// descriptor's key is new.
    fn register_css_var(
        &self,
        descriptor: &CssVarDescriptor,
        producer: &mut dyn FnMut() -> TokenMap,
    ) -> Result<Arc<CssVarEntry>>;
}
