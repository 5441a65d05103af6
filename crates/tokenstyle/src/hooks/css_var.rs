//! The variable registration hook.

use std::sync::Arc;

use super::{Shared, StyleOptions};
use crate::context::TokenContext;
use crate::error::Result;
use crate::registry::{CssVarDescriptor, CssVarEntry};
use crate::token::{component_token, default_component_token, mangle_default_keys, DefaultToken};

/// Registers a component's variable mapping in variable mode.
pub struct CssVarHook {
    shared: Arc<Shared>,
    component: String,
    default_token: DefaultToken,
    options: StyleOptions,
}

impl CssVarHook {
    pub(crate) fn new(shared: Arc<Shared>, component: String, default_token: DefaultToken, options: StyleOptions) -> Self {
        Self {
            shared,
            component,
            default_token,
            options,
        }
    }

    /// Prepares the variable wrapper for a subtree rooted at `root_cls`.
    ///
    /// Returns the wrapper and the variable scope key; the key is `None` in
    /// direct mode.
    pub fn use_css_var(&self, root_cls: &str) -> (CssVarWrap, Option<String>) {
        self.use_css_var_in(self.shared.config.tokens.token_context(), root_cls)
    }

    pub(crate) fn use_css_var_in(&self, ctx: TokenContext, root_cls: &str) -> (CssVarWrap, Option<String>) {
        let css_var_key = ctx.css_var().map(|css_var| css_var.key.clone());

        let registration = match ctx.css_var() {
            Some(css_var) if self.options.injects() => {
                let descriptor = CssVarDescriptor {
                    path: vec![self.component.clone()],
                    prefix: css_var.prefix.clone(),
                    key: css_var.key.clone(),
                    unitless: self.options.unitless.clone(),
                    ignore: self.options.ignore.clone(),
                    token_identity: ctx.identity().to_string(),
                    scope: root_cls.to_string(),
                };
                Some(Registration {
                    shared: Arc::clone(&self.shared),
                    component: self.component.clone(),
                    default_token: self.default_token.clone(),
                    options: self.options.clone(),
                    descriptor,
                    ctx,
                })
            }
            _ => None,
        };

        (CssVarWrap { registration }, css_var_key)
    }
}

struct Registration {
    shared: Arc<Shared>,
    component: String,
    default_token: DefaultToken,
    options: StyleOptions,
    descriptor: CssVarDescriptor,
    ctx: TokenContext,
}

impl Registration {
    fn register(&self) -> Result<Arc<CssVarEntry>> {
        let real_token = self.ctx.real_token();
        self.shared
            .config
            .registry
            .register_css_var(&self.descriptor, &mut || {
                let default = default_component_token(&self.component, real_token, &self.default_token);
                let token = component_token(
                    &self.component,
                    real_token,
                    &default,
                    &self.options.deprecated_tokens,
                );
                mangle_default_keys(&self.component, &token, &default)
            })
    }
}

/// Wraps rendered output with the component's variable registration.
///
/// Inactive outside variable mode or when injection is disabled; wrapping is
/// then the identity.
pub struct CssVarWrap {
    registration: Option<Registration>,
}

impl CssVarWrap {
    /// Whether wrapping registers anything.
    pub fn is_active(&self) -> bool {
        self.registration.is_some()
    }

    /// Registers the variable mapping (once per key), returning the entry.
    pub fn register(&self) -> Result<Option<Arc<CssVarEntry>>> {
        self.registration
            .as_ref()
            .map(Registration::register)
            .transpose()
    }

    /// Registers the variable mapping, then returns `node` unchanged.
    pub fn wrap<T>(&self, node: T) -> Result<T> {
        self.register()?;
        Ok(node)
    }
}

impl std::fmt::Debug for CssVarWrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CssVarWrap")
            .field("descriptor", &self.registration.as_ref().map(|r| &r.descriptor))
            .finish()
    }
}
