//! Component token resolution.
//!
//! A component's token record is built from three layers, lowest first:
//!
//! 1. The default token, computed from the [`DefaultToken`] definition.
//! 2. The overrides the token set declares for the component.
//! 3. Deprecated-key aliasing applied to those overrides, so a theme that still
//!    sets an old key feeds the new one.
//!
//! Keys that are not known to the component pass through unchanged.

use std::fmt;
use std::sync::Arc;

use super::set::TokenSet;
use super::value::TokenMap;

/// Function computing a component's default tokens.
pub type DefaultTokenFn = Arc<dyn Fn(&TokenMap) -> TokenMap + Send + Sync>;

/// How a component's default tokens are obtained.
#[derive(Clone, Default)]
pub enum DefaultToken {
    /// No defaults; equivalent to an empty record.
    #[default]
    None,
    /// A fixed record returned as-is.
    Fixed(TokenMap),
    /// Computed from the global tokens overlaid by the component overrides.
    Derive(DefaultTokenFn),
}

impl DefaultToken {
    /// Wraps a function as a [`DefaultToken::Derive`] definition.
    pub fn derive<F>(f: F) -> Self
    where
        F: Fn(&TokenMap) -> TokenMap + Send + Sync + 'static,
    {
        DefaultToken::Derive(Arc::new(f))
    }
}

impl fmt::Debug for DefaultToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultToken::None => f.write_str("None"),
            DefaultToken::Fixed(map) => f.debug_tuple("Fixed").field(map).finish(),
            DefaultToken::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

impl From<TokenMap> for DefaultToken {
    fn from(map: TokenMap) -> Self {
        DefaultToken::Fixed(map)
    }
}

/// An `(old, new)` deprecated token key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecatedToken {
    pub old: String,
    pub new: String,
}

impl DeprecatedToken {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for DeprecatedToken {
    fn from((old, new): (A, B)) -> Self {
        DeprecatedToken::new(old, new)
    }
}

/// Mangles a component-scoped key into the global namespace.
///
/// ```rust
/// use tokenstyle::token::prefix_token;
///
/// assert_eq!(prefix_token("Button", "zIndexPopup"), "ButtonZIndexPopup");
/// assert_eq!(prefix_token("Foo", "colorText"), "FooColorText");
/// ```
pub fn prefix_token(component: &str, key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", component, first.to_uppercase(), chars.as_str()),
        None => component.to_string(),
    }
}

/// Computes the default token record of `component`.
pub fn default_component_token(component: &str, tokens: &TokenSet, default_token: &DefaultToken) -> TokenMap {
    match default_token {
        DefaultToken::None => TokenMap::new(),
        DefaultToken::Fixed(map) => map.clone(),
        DefaultToken::Derive(f) => f(&tokens.merged_for(component)),
    }
}

/// Computes the component token: `default` overlaid by the component's
/// overrides, after deprecated-key aliasing.
///
/// For each `(old, new)` pair, when the overrides set `old` but not `new`, the
/// value of `old` is copied to `new`. Both keys stay readable. When several
/// pairs target the same `new` key the last applicable pair wins; an explicit
/// override of `new` always wins over any alias.
pub fn component_token(
    component: &str,
    tokens: &TokenSet,
    default: &TokenMap,
    deprecated: &[DeprecatedToken],
) -> TokenMap {
    let declared = tokens.component(component).cloned().unwrap_or_default();
    let mut custom = declared.clone();

    for pair in deprecated {
        if declared.contains_key(&pair.new) {
            continue;
        }
        if let Some(value) = declared.get(&pair.old) {
            custom.insert(pair.new.clone(), value.clone());
        }
    }

    let mut merged = default.clone();
    merged.extend(custom);
    merged
}

/// Resolves the full component token of `component` in one step.
pub fn resolve(
    component: &str,
    tokens: &TokenSet,
    default_token: &DefaultToken,
    deprecated: &[DeprecatedToken],
) -> TokenMap {
    let default = default_component_token(component, tokens, default_token);
    component_token(component, tokens, &default, deprecated)
}

/// Renames every key of `default` present in `token` to its mangled form.
///
/// Returns a new record; keys not listed in `default` are kept as they are.
pub fn mangle_default_keys(component: &str, token: &TokenMap, default: &TokenMap) -> TokenMap {
    token
        .iter()
        .map(|(key, value)| {
            let name = if default.contains_key(key) {
                prefix_token(component, key)
            } else {
                key.clone()
            };
            (name, value.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenValue;

    fn map(entries: &[(&str, TokenValue)]) -> TokenMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_prefix_token() {
        assert_eq!(prefix_token("Foo", "zIndexPopup"), "FooZIndexPopup");
        assert_eq!(prefix_token("Foo", "colorText"), "FooColorText");
        assert_eq!(prefix_token("Foo", ""), "Foo");
    }

    #[test]
    fn test_default_none_is_empty() {
        let tokens = TokenSet::new().with("fontSize", 14);
        assert!(default_component_token("Button", &tokens, &DefaultToken::None).is_empty());
    }

    #[test]
    fn test_default_fixed_is_returned_as_is() {
        let fixed = map(&[("paddingInline", 15.into())]);
        let tokens = TokenSet::new();
        let result = default_component_token("Button", &tokens, &DefaultToken::Fixed(fixed.clone()));
        assert_eq!(result, fixed);
    }

    #[test]
    fn test_default_derive_sees_component_overrides() {
        let tokens = TokenSet::new()
            .with("controlHeight", 32)
            .with_component("Button", [("controlHeight", TokenValue::from(40))]);
        let default_token = DefaultToken::derive(|t| {
            let mut out = TokenMap::new();
            if let Some(v) = t.get("controlHeight") {
                out.insert("buttonHeight".into(), v.clone());
            }
            out
        });

        let result = default_component_token("Button", &tokens, &default_token);
        assert_eq!(result["buttonHeight"], TokenValue::from(40));
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let tokens = TokenSet::new().with_component("Button", [("paddingInline", TokenValue::from(20))]);
        let default = map(&[("paddingInline", 15.into()), ("zIndexPopup", 1000.into())]);

        let result = component_token("Button", &tokens, &default, &[]);
        assert_eq!(result["paddingInline"], TokenValue::from(20));
        assert_eq!(result["zIndexPopup"], TokenValue::from(1000));
    }

    #[test]
    fn test_unknown_override_keys_pass_through() {
        let tokens = TokenSet::new().with_component("Button", [("madeUp", TokenValue::from("x"))]);
        let result = component_token("Button", &tokens, &TokenMap::new(), &[]);
        assert_eq!(result["madeUp"], TokenValue::from("x"));
    }

    #[test]
    fn test_deprecated_old_key_feeds_new_key() {
        let tokens = TokenSet::new().with_component("Modal", [("zIndexBase", TokenValue::from(900))]);
        let default = map(&[("zIndexPopup", 1000.into())]);
        let deprecated = [DeprecatedToken::new("zIndexBase", "zIndexPopup")];

        let result = component_token("Modal", &tokens, &default, &deprecated);
        assert_eq!(result["zIndexPopup"], TokenValue::from(900));
        assert_eq!(result["zIndexBase"], TokenValue::from(900));
    }

    #[test]
    fn test_deprecated_existing_new_key_wins() {
        let tokens = TokenSet::new().with_component(
            "Modal",
            [
                ("zIndexBase", TokenValue::from(900)),
                ("zIndexPopup", TokenValue::from(1200)),
            ],
        );
        let deprecated = [DeprecatedToken::new("zIndexBase", "zIndexPopup")];

        let result = component_token("Modal", &tokens, &TokenMap::new(), &deprecated);
        assert_eq!(result["zIndexPopup"], TokenValue::from(1200));
    }

    #[test]
    fn test_deprecated_last_pair_wins() {
        let tokens = TokenSet::new().with_component(
            "Modal",
            [("a", TokenValue::from(1)), ("b", TokenValue::from(2))],
        );
        let deprecated = [DeprecatedToken::new("a", "n"), DeprecatedToken::new("b", "n")];

        let result = component_token("Modal", &tokens, &TokenMap::new(), &deprecated);
        assert_eq!(result["n"], TokenValue::from(2));
    }

    #[test]
    fn test_deprecated_equivalence() {
        let default = map(&[("newKey", 1.into())]);
        let deprecated = [DeprecatedToken::from(("oldKey", "newKey"))];
        let with_old = TokenSet::new().with_component("X", [("oldKey", TokenValue::from(7))]);
        let with_new = TokenSet::new().with_component("X", [("newKey", TokenValue::from(7))]);

        let a = component_token("X", &with_old, &default, &deprecated);
        let b = component_token("X", &with_new, &default, &deprecated);
        assert_eq!(a["newKey"], b["newKey"]);
    }

    #[test]
    fn test_mangle_default_keys() {
        let default = map(&[("zIndexPopup", 1000.into())]);
        let token = map(&[("zIndexPopup", 1000.into()), ("extra", "x".into())]);

        let mangled = mangle_default_keys("Button", &token, &default);
        assert_eq!(mangled["ButtonZIndexPopup"], TokenValue::from(1000));
        assert!(!mangled.contains_key("zIndexPopup"));
        assert_eq!(mangled["extra"], TokenValue::from("x"));
    }

    #[test]
    fn test_resolve_combines_steps() {
        let tokens = TokenSet::new().with_component("Button", [("old", TokenValue::from(3))]);
        let default_token = DefaultToken::Fixed(map(&[("new", 1.into())]));
        let result = resolve("Button", &tokens, &default_token, &[DeprecatedToken::new("old", "new")]);
        assert_eq!(result["new"], TokenValue::from(3));
    }
}
