//! The per-component entry points.
//!
//! [`StyleUtils`] holds the collaborators every component shares: the token
//! provider, class prefixes, the CSP nonce, the reset style, the common style
//! generator and the registration primitive. Each component then asks it for
//! hooks:
//!
//! - [`gen_style_hooks`](StyleUtils::gen_style_hooks): the full entry point,
//!   registering the component style and, in variable mode, its variables.
//! - [`gen_component_style_hook`](StyleUtils::gen_component_style_hook): the
//!   style registration alone.
//! - [`gen_sub_style_component`](StyleUtils::gen_sub_style_component): a
//!   style-only sub component registered after its parent.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tokenstyle::prelude::*;
//!
//! let cache = Arc::new(StyleCache::new());
//! let tokens = TokenSet::new().with("colorPrimary", "#1677ff");
//! let utils = StyleUtils::new(StyleUtilsConfig::new(TokenContext::new(tokens), cache.clone()));
//!
//! let hooks = utils.gen_style_hooks(
//!     "Button",
//!     |token: &FullToken, _: &StyleInfo| {
//!         Interpolation::from(CssObject::new().nest(
//!             &token.component_cls,
//!             CssObject::new().prop("color", token.get("colorPrimary")),
//!         ))
//!     },
//!     DefaultToken::None,
//!     StyleOptions::new(),
//! );
//!
//! let (wrap, hash_id, css_var_key) = hooks.use_style("ant-btn", None).unwrap();
//! assert!(hash_id.starts_with("css-"));
//! assert!(css_var_key.is_none());
//! assert_eq!(wrap.wrap("node").unwrap(), "node");
//! assert_eq!(cache.extract_css(false), ".ant-btn{color:#1677ff;}");
//! ```

mod component;
mod css_var;
mod sub_style;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

pub use component::{ComponentStyleHook, StyleHandle};
pub use css_var::{CssVarHook, CssVarWrap};
pub use sub_style::{SubStyleComponent, SubStyleProps};

use crate::context::{PrefixConfig, ResetStyle, TokenProvider};
use crate::error::Result;
use crate::registry::RegisterStyle;
use crate::style::Interpolation;
use crate::token::{component_unitless, DefaultToken, DeprecatedToken, FullToken, Statistics, TokenStatistic};

/// Order of component styles unless configured.
pub const DEFAULT_ORDER: i32 = -999;
/// Order of sub-component styles unless configured.
pub const SUB_STYLE_ORDER: i32 = -998;

/// Per-call information passed to style functions alongside the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleInfo {
    pub hash_id: String,
    pub prefix_cls: String,
    pub root_prefix_cls: String,
    pub icon_prefix_cls: String,
}

/// A component style function.
pub type StyleFn = Arc<dyn Fn(&FullToken, &StyleInfo) -> Interpolation + Send + Sync>;

/// The shared common-style generator: `(token, prefix_cls, root_cls, reset_font)`.
pub type CommonStyleFn = Arc<dyn Fn(&FullToken, &str, &str, bool) -> Interpolation + Send + Sync>;

/// A component identifier, optionally paired with a style alias.
///
/// The pair form registers a second style set under the same component token:
/// `("Button", "Group")` resolves `Button` tokens but registers under
/// `Button-Group`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentName {
    Single(String),
    Pair(String, String),
}

impl ComponentName {
    /// The component whose tokens are resolved.
    pub fn component(&self) -> &str {
        match self {
            ComponentName::Single(name) | ComponentName::Pair(name, _) => name,
        }
    }

    /// Path segment of the cache key: both cells joined with `-`. A single
    /// name counts as the pair `(name, name)`.
    pub fn concat(&self) -> String {
        match self {
            ComponentName::Single(name) => format!("{}-{}", name, name),
            ComponentName::Pair(name, alias) => format!("{}-{}", name, alias),
        }
    }

    /// Human-readable name: `Button` or `Button.Group`.
    pub fn display(&self) -> String {
        match self {
            ComponentName::Single(name) => name.clone(),
            ComponentName::Pair(name, alias) => format!("{}.{}", name, alias),
        }
    }
}

impl From<&str> for ComponentName {
    fn from(name: &str) -> Self {
        ComponentName::Single(name.to_string())
    }
}

impl From<String> for ComponentName {
    fn from(name: String) -> Self {
        ComponentName::Single(name)
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for ComponentName {
    fn from((name, alias): (A, B)) -> Self {
        ComponentName::Pair(name.into(), alias.into())
    }
}

/// Per-component options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOptions {
    /// Prepend the common style; on unless set to `false`.
    pub reset_style: Option<bool>,
    /// Forwarded to the common style generator.
    pub reset_font: bool,
    pub deprecated_tokens: Vec<DeprecatedToken>,
    /// Component token keys whose numbers never take a unit.
    pub unitless: BTreeMap<String, bool>,
    /// Token keys that never become variables.
    pub ignore: BTreeSet<String>,
    /// Leave the style out of server extraction.
    pub client_only: bool,
    /// Registration order; [`DEFAULT_ORDER`] when unset.
    pub order: Option<i32>,
    /// Produce styles at all; on unless set to `false`.
    pub inject_style: Option<bool>,
}

impl StyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_style(mut self, reset_style: bool) -> Self {
        self.reset_style = Some(reset_style);
        self
    }

    pub fn reset_font(mut self, reset_font: bool) -> Self {
        self.reset_font = reset_font;
        self
    }

    /// Adds an `(old, new)` deprecated key pair.
    pub fn deprecated(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.deprecated_tokens.push(DeprecatedToken::new(old, new));
        self
    }

    pub fn unitless(mut self, key: impl Into<String>, unitless: bool) -> Self {
        self.unitless.insert(key.into(), unitless);
        self
    }

    pub fn ignore(mut self, key: impl Into<String>) -> Self {
        self.ignore.insert(key.into());
        self
    }

    pub fn client_only(mut self, client_only: bool) -> Self {
        self.client_only = client_only;
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn inject_style(mut self, inject_style: bool) -> Self {
        self.inject_style = Some(inject_style);
        self
    }

    pub(crate) fn resolved_order(&self) -> i32 {
        self.order.unwrap_or(DEFAULT_ORDER)
    }

    pub(crate) fn resets(&self) -> bool {
        self.reset_style != Some(false)
    }

    pub(crate) fn injects(&self) -> bool {
        self.inject_style != Some(false)
    }
}

/// The collaborators shared by every component.
#[derive(Clone)]
pub struct StyleUtilsConfig {
    pub tokens: Arc<dyn TokenProvider>,
    pub prefix: PrefixConfig,
    /// CSP nonce, forwarded verbatim.
    pub nonce: Option<String>,
    pub reset_style: Option<Arc<dyn ResetStyle>>,
    pub common_style: Option<CommonStyleFn>,
    pub registry: Arc<dyn RegisterStyle>,
    /// Cascade layer for every component style.
    pub layer: Option<String>,
}

impl StyleUtilsConfig {
    pub fn new<T>(tokens: T, registry: Arc<dyn RegisterStyle>) -> Self
    where
        T: TokenProvider + 'static,
    {
        Self {
            tokens: Arc::new(tokens),
            prefix: PrefixConfig::default(),
            nonce: None,
            reset_style: None,
            common_style: None,
            registry,
            layer: None,
        }
    }

    pub fn prefix(mut self, prefix: PrefixConfig) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn reset_style<R>(mut self, reset: R) -> Self
    where
        R: ResetStyle + 'static,
    {
        self.reset_style = Some(Arc::new(reset));
        self
    }

    pub fn common_style<F>(mut self, f: F) -> Self
    where
        F: Fn(&FullToken, &str, &str, bool) -> Interpolation + Send + Sync + 'static,
    {
        self.common_style = Some(Arc::new(f));
        self
    }

    pub fn layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }
}

impl fmt::Debug for StyleUtilsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleUtilsConfig")
            .field("prefix", &self.prefix)
            .field("nonce", &self.nonce)
            .field("reset_style", &self.reset_style.is_some())
            .field("common_style", &self.common_style.is_some())
            .field("layer", &self.layer)
            .finish_non_exhaustive()
    }
}

pub(crate) struct Shared {
    pub(crate) config: StyleUtilsConfig,
    pub(crate) statistics: Statistics,
}

/// Builds style hooks over a shared configuration.
#[derive(Clone)]
pub struct StyleUtils {
    shared: Arc<Shared>,
}

impl StyleUtils {
    pub fn new(config: StyleUtilsConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                statistics: Statistics::new(),
            }),
        }
    }

    pub fn config(&self) -> &StyleUtilsConfig {
        &self.shared.config
    }

    /// The full entry point for a component.
    ///
    /// The declared unit-less keys are expanded with their mangled forms and
    /// the mangled `zIndexPopup` key before both hooks see them.
    pub fn gen_style_hooks<F>(
        &self,
        component: impl Into<ComponentName>,
        style_fn: F,
        default_token: DefaultToken,
        options: StyleOptions,
    ) -> StyleHooks
    where
        F: Fn(&FullToken, &StyleInfo) -> Interpolation + Send + Sync + 'static,
    {
        let name = component.into();
        let mut options = options;
        options.unitless = component_unitless(name.component(), &options.unitless);

        let css_var = CssVarHook::new(
            Arc::clone(&self.shared),
            name.component().to_string(),
            default_token.clone(),
            options.clone(),
        );
        let style = ComponentStyleHook::new(Arc::clone(&self.shared), name, Arc::new(style_fn), default_token, options);
        StyleHooks { style, css_var }
    }

    /// The style registration hook alone.
    pub fn gen_component_style_hook<F>(
        &self,
        component: impl Into<ComponentName>,
        style_fn: F,
        default_token: DefaultToken,
        options: StyleOptions,
    ) -> ComponentStyleHook
    where
        F: Fn(&FullToken, &StyleInfo) -> Interpolation + Send + Sync + 'static,
    {
        ComponentStyleHook::new(
            Arc::clone(&self.shared),
            component.into(),
            Arc::new(style_fn),
            default_token,
            options,
        )
    }

    /// A style-only sub component. Unless configured, it skips the common
    /// style and registers at [`SUB_STYLE_ORDER`].
    pub fn gen_sub_style_component<F>(
        &self,
        component: impl Into<ComponentName>,
        style_fn: F,
        default_token: DefaultToken,
        options: StyleOptions,
    ) -> SubStyleComponent
    where
        F: Fn(&FullToken, &StyleInfo) -> Interpolation + Send + Sync + 'static,
    {
        let name = component.into();
        let display_name = format!("SubStyle_{}", name.display());
        let options = StyleOptions {
            reset_style: options.reset_style.or(Some(false)),
            order: options.order.or(Some(SUB_STYLE_ORDER)),
            ..options
        };
        let hook = self.gen_component_style_hook(name, style_fn, default_token, options);
        SubStyleComponent::new(hook, display_name)
    }

    /// Usage record of `component`: global tokens read and the resolved
    /// component token.
    pub fn statistic(&self, component: &str) -> Option<TokenStatistic> {
        self.shared.statistics.get(component)
    }

    /// Every usage record.
    pub fn statistics(&self) -> BTreeMap<String, TokenStatistic> {
        self.shared.statistics.snapshot()
    }
}

impl fmt::Debug for StyleUtils {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleUtils")
            .field("config", &self.shared.config)
            .finish()
    }
}

/// The hooks returned by [`StyleUtils::gen_style_hooks`].
pub struct StyleHooks {
    style: ComponentStyleHook,
    css_var: CssVarHook,
}

impl StyleHooks {
    /// Registers the component style and prepares the variable wrapper.
    ///
    /// `root_cls` defaults to `prefix_cls`. Returns the wrapper, the identity
    /// hash and the variable scope key (variable mode only). Both hooks see
    /// the same token context snapshot.
    pub fn use_style(&self, prefix_cls: &str, root_cls: Option<&str>) -> Result<(CssVarWrap, String, Option<String>)> {
        let ctx = self.style.shared.config.tokens.token_context();
        let handle = self.style.use_style_in(&ctx, prefix_cls, root_cls)?;
        let (wrap, css_var_key) = self.css_var.use_css_var_in(ctx, root_cls.unwrap_or(prefix_cls));
        Ok((wrap, handle.hash_id, css_var_key))
    }

    pub fn style_hook(&self) -> &ComponentStyleHook {
        &self.style
    }

    pub fn css_var_hook(&self) -> &CssVarHook {
        &self.css_var
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_forms() {
        let single = ComponentName::from("Button");
        assert_eq!(single.component(), "Button");
        assert_eq!(single.concat(), "Button-Button");
        assert_eq!(single.display(), "Button");

        let pair = ComponentName::from(("Button", "Group"));
        assert_eq!(pair.component(), "Button");
        assert_eq!(pair.concat(), "Button-Group");
        assert_eq!(pair.display(), "Button.Group");
    }

    #[test]
    fn test_style_options_defaults() {
        let options = StyleOptions::new();
        assert_eq!(options.resolved_order(), DEFAULT_ORDER);
        assert!(options.resets());
        assert!(options.injects());
        assert!(!options.client_only);
    }

    #[test]
    fn test_style_options_builder() {
        let options = StyleOptions::new()
            .reset_style(false)
            .inject_style(false)
            .order(3)
            .deprecated("old", "new")
            .unitless("lineHeight", true)
            .ignore("motion");
        assert!(!options.resets());
        assert!(!options.injects());
        assert_eq!(options.resolved_order(), 3);
        assert_eq!(options.deprecated_tokens, vec![DeprecatedToken::new("old", "new")]);
        assert_eq!(options.unitless.get("lineHeight"), Some(&true));
        assert!(options.ignore.contains("motion"));
    }
}
