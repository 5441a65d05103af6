//! Chainable arithmetic over token values.
//!
//! Two calculators share one API:
//!
//! - [`NumCalculator`] works on concrete numbers (direct mode).
//! - [`CssCalculator`] builds a CSS `calc()` expression (variable mode), where
//!   operands may be `var(--...)` references whose value is unknown here.
//!
//! Numeric operands in a CSS expression carry a unit placeholder until
//! [`Calculator::equal`] decides whether the final expression is measured in
//! `px` or is unit-less.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::token::TokenValue;

const CALC_UNIT: &str = "CALC_UNIT";

/// Operand accepted by calculator operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcOperand {
    Value(TokenValue),
    Calc(Calculator),
    /// An absent token; every operation ignores it.
    Missing,
}

impl From<TokenValue> for CalcOperand {
    fn from(v: TokenValue) -> Self {
        CalcOperand::Value(v)
    }
}

impl From<&TokenValue> for CalcOperand {
    fn from(v: &TokenValue) -> Self {
        CalcOperand::Value(v.clone())
    }
}

impl From<Option<&TokenValue>> for CalcOperand {
    fn from(v: Option<&TokenValue>) -> Self {
        v.map(CalcOperand::from).unwrap_or(CalcOperand::Missing)
    }
}

impl From<f64> for CalcOperand {
    fn from(n: f64) -> Self {
        CalcOperand::Value(TokenValue::Number(n))
    }
}

impl From<i32> for CalcOperand {
    fn from(n: i32) -> Self {
        CalcOperand::Value(TokenValue::from(n))
    }
}

impl From<&str> for CalcOperand {
    fn from(s: &str) -> Self {
        CalcOperand::Value(TokenValue::from(s))
    }
}

impl From<String> for CalcOperand {
    fn from(s: String) -> Self {
        CalcOperand::Value(TokenValue::Str(s))
    }
}

impl From<Calculator> for CalcOperand {
    fn from(c: Calculator) -> Self {
        CalcOperand::Calc(c)
    }
}

/// Direct-mode calculator over a concrete number.
///
/// String operands cannot take part in concrete arithmetic and are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct NumCalculator {
    result: f64,
}

impl NumCalculator {
    pub fn new(seed: CalcOperand) -> Self {
        Self {
            result: Self::number(&seed).unwrap_or(0.0),
        }
    }

    fn number(op: &CalcOperand) -> Option<f64> {
        match op {
            CalcOperand::Value(TokenValue::Number(n)) => Some(*n),
            CalcOperand::Calc(Calculator::Num(c)) => Some(c.result),
            _ => None,
        }
    }

    fn apply(mut self, op: CalcOperand, f: impl Fn(f64, f64) -> f64) -> Self {
        if let Some(n) = Self::number(&op) {
            self.result = f(self.result, n);
        }
        self
    }

    pub fn result(&self) -> f64 {
        self.result
    }
}

/// Variable-mode calculator building a `calc()` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CssCalculator {
    result: String,
    unitless: Arc<BTreeSet<String>>,
    /// `None` until the first operation; `Some(true)` after `+`/`-`.
    low_priority: Option<bool>,
}

fn with_unit(value: &TokenValue) -> String {
    match value {
        TokenValue::Number(n) => format!("{}{}", n, CALC_UNIT),
        TokenValue::Str(s) => s.clone(),
    }
}

impl CssCalculator {
    pub fn new(seed: CalcOperand, unitless: Arc<BTreeSet<String>>) -> Self {
        let result = match seed {
            CalcOperand::Calc(Calculator::Css(c)) => format!("({})", c.result),
            CalcOperand::Calc(Calculator::Num(c)) => with_unit(&TokenValue::Number(c.result)),
            CalcOperand::Value(v) => with_unit(&v),
            CalcOperand::Missing => String::new(),
        };
        Self {
            result,
            unitless,
            low_priority: None,
        }
    }

    fn additive(mut self, op: CalcOperand, sign: &str) -> Self {
        let rhs = match op {
            CalcOperand::Calc(Calculator::Css(c)) => Some(c.wrapped(false)),
            CalcOperand::Calc(Calculator::Num(c)) => Some(with_unit(&TokenValue::Number(c.result))),
            CalcOperand::Value(v) => Some(with_unit(&v)),
            CalcOperand::Missing => None,
        };
        if let Some(rhs) = rhs {
            self.result = format!("{} {} {}", self.result, sign, rhs);
        }
        self.low_priority = Some(true);
        self
    }

    fn multiplicative(mut self, op: CalcOperand, sign: &str) -> Self {
        if self.low_priority == Some(true) {
            self.result = format!("({})", self.result);
        }
        let rhs = match op {
            CalcOperand::Calc(Calculator::Css(c)) => Some(c.wrapped(true)),
            CalcOperand::Calc(Calculator::Num(c)) => Some(c.result.to_string()),
            CalcOperand::Value(v) => Some(v.to_string()),
            CalcOperand::Missing => None,
        };
        if let Some(rhs) = rhs {
            self.result = format!("{} {} {}", self.result, sign, rhs);
        }
        self.low_priority = Some(false);
        self
    }

    fn wrapped(&self, force: bool) -> String {
        if self.low_priority == Some(true) || force {
            format!("({})", self.result)
        } else {
            self.result.clone()
        }
    }

    /// Resolves unit placeholders and wraps the expression in `calc()` once
    /// any operation was applied.
    ///
    /// With `unit == None` the unit is `px` unless the expression references a
    /// unit-less variable.
    pub fn equal(&self, unit: Option<bool>) -> String {
        let px = unit.unwrap_or_else(|| !self.unitless.iter().any(|var| self.result.contains(var.as_str())));
        let resolved = self.result.replace(CALC_UNIT, if px { "px" } else { "" });
        if self.low_priority.is_some() {
            format!("calc({})", resolved)
        } else {
            resolved
        }
    }
}

/// A calculator in either realization mode.
///
/// ```rust
/// use std::collections::BTreeSet;
/// use std::sync::Arc;
/// use tokenstyle::calc::{CalcStrategy, TokenMode};
/// use tokenstyle::TokenValue;
///
/// let direct = CalcStrategy::new(TokenMode::Direct, BTreeSet::new());
/// assert_eq!(direct.calc(8).add(4).mul(2).equal(), TokenValue::from(24));
///
/// let vars = CalcStrategy::new(TokenMode::CssVar, BTreeSet::new());
/// let expr = vars.calc("var(--ant-padding)").add(4).mul(2).equal();
/// assert_eq!(expr, TokenValue::from("calc((var(--ant-padding) + 4px) * 2)"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Calculator {
    Num(NumCalculator),
    Css(CssCalculator),
}

impl Calculator {
    pub fn add(self, op: impl Into<CalcOperand>) -> Self {
        match self {
            Calculator::Num(c) => Calculator::Num(c.apply(op.into(), |a, b| a + b)),
            Calculator::Css(c) => Calculator::Css(c.additive(op.into(), "+")),
        }
    }

    pub fn sub(self, op: impl Into<CalcOperand>) -> Self {
        match self {
            Calculator::Num(c) => Calculator::Num(c.apply(op.into(), |a, b| a - b)),
            Calculator::Css(c) => Calculator::Css(c.additive(op.into(), "-")),
        }
    }

    pub fn mul(self, op: impl Into<CalcOperand>) -> Self {
        match self {
            Calculator::Num(c) => Calculator::Num(c.apply(op.into(), |a, b| a * b)),
            Calculator::Css(c) => Calculator::Css(c.multiplicative(op.into(), "*")),
        }
    }

    pub fn div(self, op: impl Into<CalcOperand>) -> Self {
        match self {
            Calculator::Num(c) => Calculator::Num(c.apply(op.into(), |a, b| a / b)),
            Calculator::Css(c) => Calculator::Css(c.multiplicative(op.into(), "/")),
        }
    }

    /// Final value: a number in direct mode, an expression string otherwise.
    pub fn equal(&self) -> TokenValue {
        match self {
            Calculator::Num(c) => TokenValue::Number(c.result),
            Calculator::Css(c) => TokenValue::Str(c.equal(None)),
        }
    }

    /// Like [`equal`](Self::equal) but forces (or suppresses) the `px` unit of
    /// numeric operands in variable mode. Direct mode ignores `unit`.
    pub fn equal_with_unit(&self, unit: bool) -> TokenValue {
        match self {
            Calculator::Num(c) => TokenValue::Number(c.result),
            Calculator::Css(c) => TokenValue::Str(c.equal(Some(unit))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(seed: impl Into<CalcOperand>) -> Calculator {
        Calculator::Num(NumCalculator::new(seed.into()))
    }

    fn css(seed: impl Into<CalcOperand>) -> Calculator {
        Calculator::Css(CssCalculator::new(seed.into(), Arc::new(BTreeSet::new())))
    }

    fn css_unitless(seed: impl Into<CalcOperand>, vars: &[&str]) -> Calculator {
        let set = vars.iter().map(|s| s.to_string()).collect();
        Calculator::Css(CssCalculator::new(seed.into(), Arc::new(set)))
    }

    #[test]
    fn test_num_chain() {
        assert_eq!(num(10).add(5).sub(3).mul(2).div(4).equal(), TokenValue::from(6));
    }

    #[test]
    fn test_num_ignores_strings_and_missing() {
        assert_eq!(num(10).add("4px").add(CalcOperand::Missing).equal(), TokenValue::from(10));
        assert_eq!(num("abc").equal(), TokenValue::from(0));
    }

    #[test]
    fn test_num_nested_calculator() {
        let inner = num(3).mul(2);
        assert_eq!(num(inner).add(num(1)).equal(), TokenValue::from(7));
    }

    #[test]
    fn test_css_plain_number_has_unit_but_no_calc() {
        assert_eq!(css(12).equal(), TokenValue::from("12px"));
    }

    #[test]
    fn test_css_addition_wraps_in_calc() {
        let expr = css("var(--ant-padding)").add(4).equal();
        assert_eq!(expr, TokenValue::from("calc(var(--ant-padding) + 4px)"));
    }

    #[test]
    fn test_css_multiply_after_add_parenthesises() {
        let expr = css(10).add("var(--x)").mul(2).equal();
        assert_eq!(expr, TokenValue::from("calc((10px + var(--x)) * 2)"));
    }

    #[test]
    fn test_css_multiply_operand_calculator_is_forced_wrapped() {
        let rhs = css("var(--b)");
        let expr = css("var(--a)").mul(rhs).equal();
        assert_eq!(expr, TokenValue::from("calc(var(--a) * (var(--b)))"));
    }

    #[test]
    fn test_css_add_low_priority_operand_is_wrapped() {
        let rhs = css("var(--b)").sub(2);
        let expr = css("var(--a)").add(rhs).equal();
        assert_eq!(expr, TokenValue::from("calc(var(--a) + (var(--b) - 2px))"));
    }

    #[test]
    fn test_css_unitless_reference_drops_unit() {
        let expr = css_unitless("var(--ant-button-z-index-popup)", &["--ant-button-z-index-popup"])
            .add(1)
            .equal();
        assert_eq!(expr, TokenValue::from("calc(var(--ant-button-z-index-popup) + 1)"));
    }

    #[test]
    fn test_css_forced_unit() {
        let calc = css_unitless("var(--z)", &["--z"]).add(1);
        assert_eq!(calc.equal_with_unit(true), TokenValue::from("calc(var(--z) + 1px)"));
        assert_eq!(css(3).add(1).equal_with_unit(false), TokenValue::from("calc(3 + 1)"));
    }

    #[test]
    fn test_css_nested_seed_is_parenthesised() {
        let inner = css(2).add(3);
        let expr = css(inner).mul(2).equal();
        assert_eq!(expr, TokenValue::from("calc((2px + 3px) * 2)"));
    }
}
