//! Calc strategies: `calc`, `max` and `min` for style functions.
//!
//! A style function never knows whether it runs in direct mode (tokens are
//! concrete values) or in variable mode (tokens are `var(--...)` references).
//! It receives a [`CalcStrategy`] through the merged token and writes the same
//! arithmetic either way:
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use tokenstyle::calc::{CalcStrategy, TokenMode};
//! use tokenstyle::TokenValue;
//!
//! let direct = CalcStrategy::new(TokenMode::Direct, BTreeSet::new());
//! assert_eq!(direct.max([4, 12, 8]), TokenValue::from(12));
//!
//! let vars = CalcStrategy::new(TokenMode::CssVar, BTreeSet::new());
//! assert_eq!(vars.max([TokenValue::from(4), "var(--gap)".into()]), TokenValue::from("max(4px,var(--gap))"));
//! ```
//!
//! Strategies are memoized process-wide by [`calc_strategy`], one instance per
//! (mode, component, variable prefix).

mod calculator;

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

pub use calculator::{CalcOperand, Calculator, CssCalculator, NumCalculator};

use crate::error::StyleError;
use crate::token::TokenValue;

/// How token values are realized in a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenMode {
    /// Concrete values are baked into the style.
    Direct,
    /// Component tokens are `var(--...)` references resolved by a variable scope.
    CssVar,
}

/// Arithmetic helpers for one realization mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcStrategy {
    mode: TokenMode,
    unitless: Arc<BTreeSet<String>>,
}

impl CalcStrategy {
    /// Creates a strategy; `unitless` lists variable names that never take a unit.
    pub fn new(mode: TokenMode, unitless: BTreeSet<String>) -> Self {
        Self {
            mode,
            unitless: Arc::new(unitless),
        }
    }

    pub fn mode(&self) -> TokenMode {
        self.mode
    }

    /// Variable names treated as unit-less by `calc()` expressions.
    pub fn unitless_vars(&self) -> &BTreeSet<String> {
        &self.unitless
    }

    /// Starts a calculation from `seed`.
    pub fn calc(&self, seed: impl Into<CalcOperand>) -> Calculator {
        match self.mode {
            TokenMode::Direct => Calculator::Num(NumCalculator::new(seed.into())),
            TokenMode::CssVar => Calculator::Css(CssCalculator::new(seed.into(), Arc::clone(&self.unitless))),
        }
    }

    /// The largest of `values`.
    pub fn max<I, V>(&self, values: I) -> TokenValue
    where
        I: IntoIterator<Item = V>,
        V: Into<TokenValue>,
    {
        self.extreme("max", values, f64::NEG_INFINITY, f64::max)
    }

    /// The smallest of `values`.
    pub fn min<I, V>(&self, values: I) -> TokenValue
    where
        I: IntoIterator<Item = V>,
        V: Into<TokenValue>,
    {
        self.extreme("min", values, f64::INFINITY, f64::min)
    }

    fn extreme<I, V>(&self, name: &str, values: I, init: f64, pick: fn(f64, f64) -> f64) -> TokenValue
    where
        I: IntoIterator<Item = V>,
        V: Into<TokenValue>,
    {
        let values = values.into_iter().map(Into::into);
        match self.mode {
            TokenMode::Direct => {
                let mut acc = init;
                for value in values {
                    let n = match value {
                        TokenValue::Number(n) => n,
                        TokenValue::Str(s) => s.trim().parse().unwrap_or(f64::NAN),
                    };
                    if n.is_nan() {
                        return TokenValue::Number(f64::NAN);
                    }
                    acc = pick(acc, n);
                }
                TokenValue::Number(acc)
            }
            TokenMode::CssVar => {
                let args: Vec<String> = values
                    .map(|value| match value {
                        TokenValue::Number(n) => format!("{}px", n),
                        TokenValue::Str(s) => s,
                    })
                    .collect();
                TokenValue::Str(format!("{}({})", name, args.join(",")))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CalcKey {
    mode: TokenMode,
    component: String,
    var_prefix: Option<String>,
}

static STRATEGIES: Lazy<Mutex<HashMap<CalcKey, Arc<CalcStrategy>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Returns the shared strategy for (mode, component, variable prefix).
///
/// `unitless` is only evaluated the first time a triple is seen; later calls
/// get the same `Arc`. Entries are never evicted.
pub fn calc_strategy<F>(
    mode: TokenMode,
    component: &str,
    var_prefix: Option<&str>,
    unitless: F,
) -> Result<Arc<CalcStrategy>, StyleError>
where
    F: FnOnce() -> BTreeSet<String>,
{
    let key = CalcKey {
        mode,
        component: component.to_string(),
        var_prefix: var_prefix.map(str::to_string),
    };
    let mut strategies = STRATEGIES
        .lock()
        .map_err(|_| StyleError::poisoned("calc strategy"))?;
    let strategy = strategies
        .entry(key)
        .or_insert_with(|| {
            tracing::trace!(component, ?mode, "building calc strategy");
            Arc::new(CalcStrategy::new(mode, unitless()))
        })
        .clone();
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_max_min() {
        let s = CalcStrategy::new(TokenMode::Direct, BTreeSet::new());
        assert_eq!(s.max([1, 5, 3]), TokenValue::from(5));
        assert_eq!(s.min([1, 5, 3]), TokenValue::from(1));
        assert_eq!(s.max([TokenValue::from("7"), TokenValue::from(2)]), TokenValue::from(7));
    }

    #[test]
    fn test_direct_max_of_non_numeric_is_nan() {
        let s = CalcStrategy::new(TokenMode::Direct, BTreeSet::new());
        let result = s.max([TokenValue::from("var(--x)"), TokenValue::from(2)]);
        assert!(result.as_number().is_some_and(f64::is_nan));
    }

    #[test]
    fn test_css_min() {
        let s = CalcStrategy::new(TokenMode::CssVar, BTreeSet::new());
        assert_eq!(s.min([TokenValue::from(2), "var(--a)".into()]), TokenValue::from("min(2px,var(--a))"));
    }

    #[test]
    fn test_strategy_calc_follows_mode() {
        let direct = CalcStrategy::new(TokenMode::Direct, BTreeSet::new());
        let css = CalcStrategy::new(TokenMode::CssVar, BTreeSet::new());
        assert!(matches!(direct.calc(1), Calculator::Num(_)));
        assert!(matches!(css.calc(1), Calculator::Css(_)));
    }

    #[test]
    fn test_memo_returns_same_instance() {
        let a = calc_strategy(TokenMode::CssVar, "Memoized", Some("ant"), BTreeSet::new).unwrap();
        let b = calc_strategy(TokenMode::CssVar, "Memoized", Some("ant"), || {
            panic!("unitless builder must not run twice")
        })
        .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_memo_distinguishes_triples() {
        let a = calc_strategy(TokenMode::CssVar, "MemoTriple", Some("ant"), BTreeSet::new).unwrap();
        let b = calc_strategy(TokenMode::CssVar, "MemoTriple", Some("app"), BTreeSet::new).unwrap();
        let c = calc_strategy(TokenMode::Direct, "MemoTriple", None, BTreeSet::new).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(c.mode(), TokenMode::Direct);
    }
}
