//! CSS variable registration: turning a token record into declarations.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::token::{token_to_css_var, TokenMap, TokenValue, UnitlessSet};

/// Everything needed to register one component's variable mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVarDescriptor {
    /// Registration path, e.g. `["Button", "ant-btn", "anticon"]`.
    pub path: Vec<String>,
    /// Variable name prefix (`ant`).
    pub prefix: Option<String>,
    /// Variable scope class of the token context.
    pub key: String,
    /// Keys whose numeric values never take `px`.
    pub unitless: BTreeMap<String, bool>,
    /// Keys that never become variables.
    pub ignore: BTreeSet<String>,
    /// Identity of the token context the mapping was derived from.
    pub token_identity: String,
    /// Extra scope class, usually the root class of a rendered subtree.
    pub scope: String,
}

impl CssVarDescriptor {
    /// Registry key: path, scope key, scope class and token identity.
    pub fn cache_key(&self) -> Vec<String> {
        let mut key = self.path.clone();
        key.push(self.key.clone());
        key.push(self.scope.clone());
        key.push(self.token_identity.clone());
        key
    }
}

/// A registered variable mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssVarEntry {
    pub key: String,
    pub scope: String,
    /// `(--name, value)` declarations in key order.
    pub declarations: Vec<(String, String)>,
    /// Token key → `var(--name)` reference.
    pub refs: TokenMap,
    /// Serialized variable block, empty when there are no declarations.
    pub css: String,
    pub seq: u64,
}

/// Converts a token record into variable declarations and references.
///
/// Ignored keys are dropped from both outputs.
pub fn transform_token(
    token: &TokenMap,
    prefix: Option<&str>,
    unitless: &BTreeMap<String, bool>,
    ignore: &BTreeSet<String>,
) -> (TokenMap, Vec<(String, String)>) {
    let unitless = UnitlessSet::from_flags(unitless);
    let mut refs = TokenMap::new();
    let mut declarations = Vec::new();
    for (key, value) in token.iter().filter(|(key, _)| !ignore.contains(*key)) {
        let name = token_to_css_var(key, prefix);
        refs.insert(key.clone(), TokenValue::Str(format!("var({})", name)));
        declarations.push((name, unitless.format(key, value)));
    }
    (refs, declarations)
}

/// Serializes declarations as `.key.scope{--a:1px;}`.
pub fn serialize_css_var(declarations: &[(String, String)], key: &str, scope: &str) -> String {
    if declarations.is_empty() {
        return String::new();
    }
    let selector = if scope.is_empty() {
        format!(".{}", key)
    } else {
        format!(".{}.{}", key, scope)
    };
    let body: String = declarations
        .iter()
        .map(|(name, value)| format!("{}:{};", name, value))
        .collect();
    format!("{}{{{}}}", selector, body)
}
