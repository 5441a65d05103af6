//! # tokenstyle - Token-Driven Component Style Registration
//!
//! `tokenstyle` derives per-component style artifacts from a shared design-token
//! set and registers each unique (token context, component, prefix) combination
//! exactly once.
//!
//! ## Core Concepts
//!
//! - [`TokenSet`]: global design tokens plus per-component overrides
//! - [`DefaultToken`]: how a component computes its default tokens
//! - [`TokenContext`]: a theme snapshot, in direct or variable mode
//! - [`FullToken`]: the merged token a style function reads
//! - [`StyleUtils`]: builds per-component hooks over shared collaborators
//! - [`StyleCache`]: the in-memory "register once per key" registry
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tokenstyle::prelude::*;
//!
//! let tokens = TokenSet::new()
//!     .with("colorPrimary", "#1677ff")
//!     .with_component("Button", [("paddingInline", 20.into())]);
//!
//! let cache = Arc::new(StyleCache::new());
//! let utils = StyleUtils::new(StyleUtilsConfig::new(TokenContext::new(tokens), cache.clone()));
//!
//! let defaults: TokenMap = [
//!     ("paddingInline".to_string(), TokenValue::from(15)),
//!     ("zIndexPopup".to_string(), TokenValue::from(1000)),
//! ]
//! .into();
//!
//! let button = utils.gen_style_hooks(
//!     "Button",
//!     |token: &FullToken, _: &StyleInfo| {
//!         Interpolation::from(CssObject::new().nest(
//!             &token.component_cls,
//!             CssObject::new()
//!                 .prop("color", token.get("colorPrimary"))
//!                 .prop("paddingInline", token.get("paddingInline"))
//!                 .prop("zIndex", token.get("zIndexPopup")),
//!         ))
//!     },
//!     DefaultToken::Fixed(defaults),
//!     StyleOptions::new(),
//! );
//!
//! button.use_style("ant-btn", None).unwrap();
//! button.use_style("ant-btn", None).unwrap();
//!
//! assert_eq!(cache.len(), 1);
//! assert_eq!(
//!     cache.extract_css(false),
//!     ".ant-btn{color:#1677ff;padding-inline:20px;z-index:1000;}"
//! );
//! ```
//!
//! ## Variable Mode
//!
//! With a [`CssVarConfig`], component defaults reach the style function as
//! `var(--...)` references and the values are registered once as a variable
//! block scoped to the root class:
//!
//! ```rust
//! use std::sync::Arc;
//! use tokenstyle::prelude::*;
//!
//! let ctx = TokenContext::new(TokenSet::new())
//!     .with_css_var(CssVarConfig::new("css-var-r0").prefix("ant"));
//! let cache = Arc::new(StyleCache::new());
//! let utils = StyleUtils::new(StyleUtilsConfig::new(ctx, cache.clone()));
//!
//! let hooks = utils.gen_style_hooks(
//!     "Space",
//!     |token: &FullToken, _: &StyleInfo| {
//!         Interpolation::from(CssObject::new().nest(
//!             &token.component_cls,
//!             CssObject::new().prop("gap", token.get("gap")),
//!         ))
//!     },
//!     DefaultToken::Fixed([("gap".to_string(), TokenValue::from(8))].into()),
//!     StyleOptions::new().reset_style(false),
//! );
//!
//! let (wrap, _hash_id, key) = hooks.use_style("ant-space", None).unwrap();
//! wrap.wrap(()).unwrap();
//!
//! assert_eq!(key.as_deref(), Some("css-var-r0"));
//! assert_eq!(
//!     cache.extract_css(false),
//!     ".css-var-r0.ant-space{--ant-space-gap:8px;}.ant-space{gap:var(--ant-space-gap);}"
//! );
//! ```
//!
//! ## Logging
//!
//! Registration emits `tracing` events: `debug` on cache misses and variable
//! registration, `trace` on hits. The crate never installs a subscriber.

pub mod calc;
pub mod context;
mod error;
pub mod hash;
pub mod hooks;
pub mod prelude;
pub mod registry;
pub mod style;
pub mod token;

// Error types
pub use error::{Result, StyleError, TokenSetError};

// Token exports
pub use token::{DefaultToken, DeprecatedToken, FullToken, TokenMap, TokenSet, TokenStatistic, TokenValue};

// Context exports
pub use context::{CssVarConfig, PrefixConfig, ResetStyle, TokenContext, TokenProvider};

// Hook exports
pub use hooks::{
    ComponentName, ComponentStyleHook, CssVarHook, CssVarWrap, StyleHandle, StyleHooks, StyleInfo, StyleOptions,
    StyleUtils, StyleUtilsConfig, SubStyleComponent, SubStyleProps,
};

// Registry exports
pub use registry::{RegisterConfig, RegisterStyle, StyleCache, StyleEntry, StyleKey};

// Style exports
pub use style::{CssObject, Interpolation};
