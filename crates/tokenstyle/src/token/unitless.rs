//! Unit classification and CSS variable naming.
//!
//! Numeric token values are unit-less. Whether a unit is appended when such a
//! value reaches a declaration depends on the token key: `zIndexPopup` stays
//! bare, `paddingInline` becomes `15px`.
//!
//! In variable mode the same question is asked about variable names, because
//! a `calc()` expression only sees `var(--ant-button-z-index-popup)`, not the
//! key that produced it. [`unitless_css_vars`] builds that second set.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::resolve::prefix_token;
use super::value::TokenValue;

/// Component token key that is always unit-less.
pub const Z_INDEX_POPUP: &str = "zIndexPopup";

static LOWER_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static UPPER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z0-9]+)").unwrap());
static LOWER_UPPER_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z0-9])").unwrap());

/// Kebab-cases a camel-case identifier.
///
/// ```rust
/// use tokenstyle::token::kebab_case;
///
/// assert_eq!(kebab_case("zIndexPopup"), "z-index-popup");
/// assert_eq!(kebab_case("colorBg2"), "color-bg-2");
/// assert_eq!(kebab_case("HTMLButton"), "html-button");
/// ```
pub fn kebab_case(input: &str) -> String {
    let step = LOWER_UPPER.replace_all(input, "$1-$2");
    let step = UPPER_RUN.replace_all(&step, "$1-$2");
    let step = LOWER_UPPER_DIGIT.replace_all(&step, "$1-$2");
    step.to_lowercase()
}

/// Converts a token key to a CSS custom property name.
///
/// ```rust
/// use tokenstyle::token::token_to_css_var;
///
/// assert_eq!(token_to_css_var("zIndexPopup", Some("ant-button")), "--ant-button-z-index-popup");
/// assert_eq!(token_to_css_var("colorPrimary", None), "--color-primary");
/// ```
pub fn token_to_css_var(key: &str, prefix: Option<&str>) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => kebab_case(&format!("--{}-{}", prefix, key)),
        None => kebab_case(&format!("--{}", key)),
    }
}

/// The component-scoped variable prefix: `ant` + `Button` gives `ant-button`.
///
/// The component segment is kebab-cased like a mangled key, so
/// `QRCode` gives `ant-qr-code` on both variable paths.
pub fn component_var_prefix(component: &str, prefix: Option<&str>) -> String {
    let component = kebab_case(component);
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}-{}", prefix, component),
        None => component,
    }
}

/// Expands a component's declared unit-less keys.
///
/// The result holds every declared key, the mangled form of every declared
/// key, and the mangled `zIndexPopup` key.
pub fn component_unitless(component: &str, declared: &BTreeMap<String, bool>) -> BTreeMap<String, bool> {
    let mut unitless = declared.clone();
    unitless.insert(prefix_token(component, Z_INDEX_POPUP), true);
    for (key, flag) in declared {
        unitless.insert(prefix_token(component, key), *flag);
    }
    unitless
}

/// Builds the variable-name unit-less set used by `calc()` in variable mode.
///
/// Every key flagged `true` is registered twice: under the base variable
/// prefix and under the component-scoped prefix. Some components proxy the
/// global token namespace and some don't, so a reference may come from either
/// convention.
pub fn unitless_css_vars(
    unitless: &BTreeMap<String, bool>,
    var_prefix: Option<&str>,
    component: &str,
) -> BTreeSet<String> {
    let scoped = component_var_prefix(component, var_prefix);
    unitless
        .iter()
        .filter(|(_, flag)| **flag)
        .flat_map(|(key, _)| {
            [
                token_to_css_var(key, var_prefix),
                token_to_css_var(key, Some(scoped.as_str())),
            ]
        })
        .collect()
}

/// The set of token keys whose numeric values never receive a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitlessSet {
    keys: BTreeSet<String>,
}

impl UnitlessSet {
    /// Builds the set from a key → flag map; only `true` flags count.
    pub fn from_flags(flags: &BTreeMap<String, bool>) -> Self {
        Self {
            keys: flags
                .iter()
                .filter(|(_, flag)| **flag)
                .map(|(key, _)| key.clone())
                .collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Renders `value` for a declaration of `key`.
    ///
    /// Numbers get `px` unless `key` is unit-less; strings are verbatim.
    pub fn format(&self, key: &str, value: &TokenValue) -> String {
        match value {
            TokenValue::Number(n) if !self.contains(key) => format!("{}px", n),
            other => other.to_string(),
        }
    }
}
