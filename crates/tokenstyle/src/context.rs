//! The token context and the collaborators the pipeline consults per call.
//!
//! A [`TokenContext`] is what a theme provider hands out: the concrete
//! [`TokenSet`], the global tokens as style functions see them, the identity
//! hash, and the variable configuration when variable mode is on.
//!
//! ```rust
//! use tokenstyle::{CssVarConfig, TokenContext, TokenSet, TokenValue};
//!
//! let tokens = TokenSet::new().with("colorPrimary", "#1677ff");
//!
//! let direct = TokenContext::new(tokens.clone());
//! assert_eq!(direct.token()["colorPrimary"], TokenValue::from("#1677ff"));
//!
//! let vars = TokenContext::new(tokens).with_css_var(CssVarConfig::new("css-var-r0").prefix("ant"));
//! assert_eq!(vars.token()["colorPrimary"], TokenValue::from("var(--ant-color-primary)"));
//! assert_ne!(direct.hash_id(), vars.hash_id());
//! ```

use std::sync::Arc;

use crate::calc::TokenMode;
use crate::error::Result;
use crate::hash::murmur2;
use crate::registry::{RegisterConfig, RegisterStyle};
use crate::token::{token_to_css_var, TokenMap, TokenSet, TokenValue};

/// Variable mode configuration: variable prefix and scope class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVarConfig {
    pub prefix: Option<String>,
    pub key: String,
}

impl CssVarConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            prefix: None,
            key: key.into(),
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// One snapshot of the theme as seen by the style pipeline.
#[derive(Debug, Clone)]
pub struct TokenContext {
    real_token: Arc<TokenSet>,
    token: Arc<TokenMap>,
    identity: String,
    hash_id: String,
    css_var: Option<CssVarConfig>,
}

impl TokenContext {
    /// A direct-mode context over `tokens`.
    pub fn new(tokens: TokenSet) -> Self {
        let identity = tokens.identity();
        let token = Arc::new(tokens.global().clone());
        Self {
            hash_id: format!("css-{}", identity),
            real_token: Arc::new(tokens),
            token,
            identity,
            css_var: None,
        }
    }

    /// Switches to variable mode.
    ///
    /// Global tokens become `var(--...)` references and the hash changes, so
    /// styles derived in the two modes never share a cache key.
    pub fn with_css_var(mut self, config: CssVarConfig) -> Self {
        let prefix = config.prefix.as_deref();
        self.token = Arc::new(
            self.real_token
                .global()
                .keys()
                .map(|key| {
                    let reference = format!("var({})", token_to_css_var(key, prefix));
                    (key.clone(), TokenValue::Str(reference))
                })
                .collect(),
        );
        self.hash_id = format!(
            "css-{}",
            murmur2(&format!("{}|{}|{}", self.identity, prefix.unwrap_or_default(), config.key))
        );
        self.css_var = Some(config);
        self
    }

    /// Replaces the identity hash; an empty hash disables hashed selectors.
    pub fn with_hash_id(mut self, hash_id: impl Into<String>) -> Self {
        self.hash_id = hash_id.into();
        self
    }

    pub fn mode(&self) -> TokenMode {
        if self.css_var.is_some() {
            TokenMode::CssVar
        } else {
            TokenMode::Direct
        }
    }

    /// The concrete token set.
    pub fn real_token(&self) -> &TokenSet {
        &self.real_token
    }

    /// Global tokens as style functions see them.
    pub fn token(&self) -> &TokenMap {
        &self.token
    }

    /// Content identity of the concrete token set.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn hash_id(&self) -> &str {
        &self.hash_id
    }

    /// Registry identity of the theme: the content identity, plus the
    /// variable prefix and scope key in variable mode.
    ///
    /// Unlike [`hash_id`](Self::hash_id) this cannot be overridden.
    pub fn theme_key(&self) -> String {
        match &self.css_var {
            Some(css_var) => format!(
                "{}|{}|{}",
                self.identity,
                css_var.prefix.as_deref().unwrap_or_default(),
                css_var.key
            ),
            None => self.identity.clone(),
        }
    }

    pub fn css_var(&self) -> Option<&CssVarConfig> {
        self.css_var.as_ref()
    }
}

/// Supplies the current token context.
pub trait TokenProvider: Send + Sync {
    fn token_context(&self) -> TokenContext;
}

impl TokenProvider for TokenContext {
    fn token_context(&self) -> TokenContext {
        self.clone()
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> TokenContext + Send + Sync,
{
    fn token_context(&self) -> TokenContext {
        self()
    }
}

/// Root and icon class prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixConfig {
    pub root_prefix_cls: String,
    pub icon_prefix_cls: String,
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            root_prefix_cls: "ant".to_string(),
            icon_prefix_cls: "anticon".to_string(),
        }
    }
}

impl PrefixConfig {
    pub fn new(root_prefix_cls: impl Into<String>, icon_prefix_cls: impl Into<String>) -> Self {
        Self {
            root_prefix_cls: root_prefix_cls.into(),
            icon_prefix_cls: icon_prefix_cls.into(),
        }
    }
}

/// Registers the shared reset styles. Invoked once per `use_style` call,
/// before the component style is registered.
pub trait ResetStyle: Send + Sync {
    fn reset(&self, registry: &dyn RegisterStyle, config: &RegisterConfig, prefix: &PrefixConfig) -> Result<()>;
}

impl<F> ResetStyle for F
where
    F: Fn(&dyn RegisterStyle, &RegisterConfig, &PrefixConfig) -> Result<()> + Send + Sync,
{
    fn reset(&self, registry: &dyn RegisterStyle, config: &RegisterConfig, prefix: &PrefixConfig) -> Result<()> {
        self(registry, config, prefix)
    }
}
