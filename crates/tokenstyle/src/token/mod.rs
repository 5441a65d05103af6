//! Design tokens: values, sets, resolution and naming.
//!
//! - [`TokenValue`] / [`TokenMap`]: a single value and an ordered record.
//! - [`TokenSet`]: the global tokens plus per-component overrides.
//! - [`resolve`](resolve()) and friends: merge defaults, overrides and
//!   deprecated-key aliases into a component token.
//! - [`prefix_token`], [`token_to_css_var`], [`component_unitless`]: naming
//!   and unit classification.
//! - [`FullToken`]: the merged token handed to style functions.

mod full;
mod resolve;
mod set;
mod statistic;
mod unitless;
mod value;

pub use full::FullToken;
pub(crate) use full::{class_selector, Selectors};
pub use resolve::{
    component_token, default_component_token, mangle_default_keys, prefix_token, resolve, DefaultToken,
    DefaultTokenFn, DeprecatedToken,
};
pub use set::{TokenSet, TOKEN_SET_EXTENSIONS};
pub use statistic::{Statistics, TokenStatistic};
pub use unitless::{
    component_unitless, component_var_prefix, kebab_case, token_to_css_var, unitless_css_vars, UnitlessSet,
    Z_INDEX_POPUP,
};
pub use value::{TokenMap, TokenValue};
