//! The merged token handed to style functions.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::value::{TokenMap, TokenValue};
use crate::calc::{CalcOperand, CalcStrategy, Calculator, TokenMode};

/// Everything a style function may read: global tokens, the component's
/// realized tokens, selector helpers and the calc strategy.
///
/// Reads of global tokens are tracked so that the statistics recorded after a
/// derivation only list the global tokens the style function actually used.
///
/// # Example
///
/// ```rust,ignore
/// let style_fn = |token: &FullToken, _info: &StyleInfo| {
///     let padding = token.calc(token.get("paddingInline")).mul(2).equal();
///     Interpolation::from(CssObject::new().nest(
///         &token.component_cls,
///         CssObject::new()
///             .prop("color", token.get("colorPrimary"))
///             .prop("paddingInline", padding),
///     ))
/// };
/// ```
#[derive(Debug)]
pub struct FullToken {
    tokens: TokenMap,
    /// Keys whose merged value came from the global snapshot.
    global_keys: BTreeSet<String>,
    reads: RefCell<BTreeSet<String>>,
    calc: Arc<CalcStrategy>,
    /// Component class selector, `.` + prefix.
    pub component_cls: String,
    /// Raw instance prefix, without `.`.
    pub prefix_cls: String,
    /// Icon class selector, empty when there is no icon namespace.
    pub icon_cls: String,
    /// Root namespace class selector, empty when there is no root namespace.
    pub namespace_cls: String,
}

/// Selector helpers merged on top of the global tokens.
#[derive(Debug, Clone, Default)]
pub(crate) struct Selectors {
    pub component_cls: String,
    pub prefix_cls: String,
    pub icon_cls: String,
    pub namespace_cls: String,
}

/// `.name`, or nothing for an empty name.
pub(crate) fn class_selector(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!(".{}", name)
    }
}

impl FullToken {
    /// Merges `global` ⊕ `component`; later layers win.
    pub(crate) fn merge(global: &TokenMap, component: TokenMap, selectors: Selectors, calc: Arc<CalcStrategy>) -> Self {
        let mut tokens = global.clone();
        let mut global_keys: BTreeSet<String> = global.keys().cloned().collect();
        for (key, value) in component {
            global_keys.remove(&key);
            tokens.insert(key, value);
        }
        Self {
            tokens,
            global_keys,
            reads: RefCell::new(BTreeSet::new()),
            calc,
            component_cls: selectors.component_cls,
            prefix_cls: selectors.prefix_cls,
            icon_cls: selectors.icon_cls,
            namespace_cls: selectors.namespace_cls,
        }
    }

    /// Reads a token.
    pub fn get(&self, key: &str) -> Option<&TokenValue> {
        let value = self.tokens.get(key);
        if value.is_some() && self.global_keys.contains(key) {
            self.reads.borrow_mut().insert(key.to_string());
        }
        value
    }

    /// Reads a numeric token.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(TokenValue::as_number)
    }

    /// Whether `key` is present, without counting as a read.
    pub fn contains(&self, key: &str) -> bool {
        self.tokens.contains_key(key)
    }

    /// All token keys, without counting as reads.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(|k| k.as_str())
    }

    pub fn mode(&self) -> TokenMode {
        self.calc.mode()
    }

    pub fn calc(&self, seed: impl Into<CalcOperand>) -> Calculator {
        self.calc.calc(seed)
    }

    pub fn max<I, V>(&self, values: I) -> TokenValue
    where
        I: IntoIterator<Item = V>,
        V: Into<TokenValue>,
    {
        self.calc.max(values)
    }

    pub fn min<I, V>(&self, values: I) -> TokenValue
    where
        I: IntoIterator<Item = V>,
        V: Into<TokenValue>,
    {
        self.calc.min(values)
    }

    /// Global keys read so far.
    pub(crate) fn global_reads(&self) -> BTreeSet<String> {
        self.reads.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(global: &[(&str, TokenValue)], component: &[(&str, TokenValue)]) -> FullToken {
        let global: TokenMap = global.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        let component: TokenMap = component.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        FullToken::merge(
            &global,
            component,
            Selectors::default(),
            Arc::new(CalcStrategy::new(TokenMode::Direct, BTreeSet::new())),
        )
    }

    #[test]
    fn test_component_layer_wins() {
        let token = full(&[("colorText", "#000".into())], &[("colorText", "#111".into())]);
        assert_eq!(token.get("colorText"), Some(&TokenValue::from("#111")));
    }

    #[test]
    fn test_only_global_reads_are_tracked() {
        let token = full(
            &[("colorText", "#000".into()), ("fontSize", 14.into()), ("lineWidth", 1.into())],
            &[("fontSize", 16.into())],
        );
        token.get("colorText");
        token.get("fontSize");
        token.get("missing");
        assert!(token.contains("lineWidth"));

        let reads: Vec<String> = token.global_reads().into_iter().collect();
        assert_eq!(reads, vec!["colorText".to_string()]);
    }

    #[test]
    fn test_class_selector() {
        assert_eq!(class_selector("ant"), ".ant");
        assert_eq!(class_selector(""), "");
    }

    #[test]
    fn test_calc_helpers_delegate() {
        let token = full(&[("padding", 8.into())], &[]);
        assert_eq!(token.calc(token.get("padding")).mul(2).equal(), TokenValue::from(16));
        assert_eq!(token.max([1, 2]), TokenValue::from(2));
        assert_eq!(token.mode(), TokenMode::Direct);
    }
}
