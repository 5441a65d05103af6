//! The style registration hook.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{ComponentName, Shared, StyleFn, StyleInfo, StyleOptions};
use crate::calc::{calc_strategy, CalcStrategy, TokenMode};
use crate::context::TokenContext;
use crate::error::Result;
use crate::registry::{RegisterConfig, StyleEntry, StyleKey};
use crate::style::{CssObject, Interpolation, StyleList};
use crate::token::{
    class_selector, component_token, component_var_prefix, default_component_token, prefix_token,
    token_to_css_var, unitless_css_vars, DefaultToken, FullToken, Selectors, TokenMap, TokenValue,
};

/// Result of [`ComponentStyleHook::use_style`].
#[derive(Debug, Clone)]
pub struct StyleHandle {
    /// The registered entry, shared by every call with the same key.
    pub entry: Arc<StyleEntry>,
    pub hash_id: String,
}

/// Registers one component's style per (token context, prefix, icon prefix).
pub struct ComponentStyleHook {
    pub(super) shared: Arc<Shared>,
    name: ComponentName,
    style_fn: StyleFn,
    default_token: DefaultToken,
    options: StyleOptions,
}

impl ComponentStyleHook {
    pub(crate) fn new(
        shared: Arc<Shared>,
        name: ComponentName,
        style_fn: StyleFn,
        default_token: DefaultToken,
        options: StyleOptions,
    ) -> Self {
        Self {
            shared,
            name,
            style_fn,
            default_token,
            options,
        }
    }

    pub fn name(&self) -> &ComponentName {
        &self.name
    }

    pub fn options(&self) -> &StyleOptions {
        &self.options
    }

    /// Registers the component style for `prefix_cls`.
    ///
    /// The style function only runs the first time a key is seen. `root_cls`
    /// defaults to `prefix_cls` and is only forwarded to the common style.
    pub fn use_style(&self, prefix_cls: &str, root_cls: Option<&str>) -> Result<StyleHandle> {
        let ctx = self.shared.config.tokens.token_context();
        self.use_style_in(&ctx, prefix_cls, root_cls)
    }

    /// [`use_style`](Self::use_style) against an already fetched context.
    pub(crate) fn use_style_in(&self, ctx: &TokenContext, prefix_cls: &str, root_cls: Option<&str>) -> Result<StyleHandle> {
        let config = &self.shared.config;
        let mode = ctx.mode();
        let component = self.name.component();
        let var_prefix = ctx.css_var().and_then(|css_var| css_var.prefix.as_deref());

        let calc = calc_strategy(mode, component, var_prefix, || match mode {
            TokenMode::CssVar => unitless_css_vars(&self.options.unitless, var_prefix, component),
            TokenMode::Direct => BTreeSet::new(),
        })?;

        let register_config = RegisterConfig {
            hash_id: ctx.hash_id().to_string(),
            nonce: config.nonce.clone(),
            client_only: self.options.client_only,
            layer: config.layer.clone(),
            order: self.options.resolved_order(),
            mode,
            css_var_key: ctx.css_var().map(|css_var| css_var.key.clone()),
        };

        if let Some(reset) = &config.reset_style {
            reset.reset(config.registry.as_ref(), &register_config, &config.prefix)?;
        }

        let key = StyleKey::new(
            ctx.hash_id(),
            [
                self.name.concat(),
                prefix_cls.to_string(),
                config.prefix.icon_prefix_cls.clone(),
            ],
        )
        .theme(ctx.theme_key());
        let root_cls = root_cls.unwrap_or(prefix_cls);
        let inject = self.options.injects();

        let entry = config.registry.register(key, &register_config, &mut || {
            if !inject {
                return Vec::new();
            }
            self.derive(ctx, &calc, prefix_cls, root_cls)
        })?;

        Ok(StyleHandle {
            entry,
            hash_id: ctx.hash_id().to_string(),
        })
    }

    fn derive(&self, ctx: &TokenContext, calc: &Arc<CalcStrategy>, prefix_cls: &str, root_cls: &str) -> StyleList {
        let component = self.name.component();
        let prefix = &self.shared.config.prefix;

        let default = default_component_token(component, ctx.real_token(), &self.default_token);
        let resolved = component_token(
            component,
            ctx.real_token(),
            &default,
            &self.options.deprecated_tokens,
        );

        // Variable mode only exposes default keys, as references.
        let realized: TokenMap = match ctx.css_var() {
            Some(css_var) => {
                let scoped = component_var_prefix(component, css_var.prefix.as_deref());
                default
                    .keys()
                    .map(|key| {
                        let reference = format!("var({})", token_to_css_var(key, Some(scoped.as_str())));
                        (key.clone(), TokenValue::Str(reference))
                    })
                    .collect()
            }
            None => resolved.clone(),
        };
        let mut layer = realized.clone();
        for (key, value) in realized {
            layer.insert(prefix_token(component, &key), value);
        }

        let selectors = Selectors {
            component_cls: format!(".{}", prefix_cls),
            prefix_cls: prefix_cls.to_string(),
            icon_cls: class_selector(&prefix.icon_prefix_cls),
            namespace_cls: class_selector(&prefix.root_prefix_cls),
        };
        let token = FullToken::merge(ctx.token(), layer, selectors, Arc::clone(calc));
        let info = StyleInfo {
            hash_id: ctx.hash_id().to_string(),
            prefix_cls: prefix_cls.to_string(),
            root_prefix_cls: prefix.root_prefix_cls.clone(),
            icon_prefix_cls: prefix.icon_prefix_cls.clone(),
        };

        tracing::debug!(component, prefix_cls, mode = ?token.mode(), "deriving component style");
        let style = (self.style_fn)(&token, &info);

        if let Err(err) = self
            .shared
            .statistics
            .flush(component, token.global_reads(), &resolved)
        {
            tracing::warn!(component, error = %err, "failed to record token statistics");
        }

        let common = if self.options.resets() {
            Some(match &self.shared.config.common_style {
                Some(common_style) => common_style(&token, prefix_cls, root_cls, self.options.reset_font),
                None => Interpolation::from(CssObject::new()),
            })
        } else {
            None
        };

        vec![common, Some(style)]
    }
}

impl std::fmt::Debug for ComponentStyleHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentStyleHook")
            .field("name", &self.name)
            .field("default_token", &self.default_token)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
