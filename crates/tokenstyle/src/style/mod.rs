//! Style interpolations produced by style functions.
//!
//! An [`Interpolation`] is the value a style function returns. To the
//! registration pipeline it is opaque: it is stored, ordered and finally
//! serialized by [`to_css`](Interpolation::to_css).
//!
//! The object model is a small CSS-in-Rust tree:
//!
//! ```rust
//! use tokenstyle::style::{CssObject, Interpolation};
//!
//! let style = CssObject::new().nest(
//!     ".ant-btn",
//!     CssObject::new()
//!         .prop("color", "#1677ff")
//!         .prop("paddingInline", 15)
//!         .nest("&:hover", CssObject::new().prop("opacity", 0.8)),
//! );
//!
//! assert_eq!(
//!     Interpolation::from(style).to_css(),
//!     ".ant-btn{color:#1677ff;padding-inline:15px;}.ant-btn:hover{opacity:0.8;}"
//! );
//! ```

mod serialize;

use serde::Serialize;

use crate::token::TokenValue;

pub use serialize::UNITLESS_PROPERTIES;

/// A node of a [`CssObject`]: a declaration value or a nested block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CssNode {
    Value(TokenValue),
    Block(CssObject),
}

/// An ordered list of declarations and nested blocks.
///
/// Keys of nested blocks are selectors (`&` refers to the parent selector) or
/// at-rules (`@media ...`). Insertion order is kept, since it is cascade order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CssObject {
    entries: Vec<(String, CssNode)>,
}

impl CssObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration. `None` values are skipped, so optional tokens can be
    /// passed straight through.
    pub fn prop<V: IntoCssValue>(mut self, name: impl Into<String>, value: V) -> Self {
        if let Some(value) = value.into_css_value() {
            self.entries.push((name.into(), CssNode::Value(value)));
        }
        self
    }

    /// Adds a nested block.
    pub fn nest(mut self, selector: impl Into<String>, block: CssObject) -> Self {
        self.entries.push((selector.into(), CssNode::Block(block)));
        self
    }

    pub fn entries(&self) -> &[(String, CssNode)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Values accepted by [`CssObject::prop`].
pub trait IntoCssValue {
    fn into_css_value(self) -> Option<TokenValue>;
}

macro_rules! into_css_value {
    ($($ty:ty),*) => {
        $(
            impl IntoCssValue for $ty {
                fn into_css_value(self) -> Option<TokenValue> {
                    Some(TokenValue::from(self))
                }
            }
        )*
    };
}

into_css_value!(TokenValue, &TokenValue, f64, i32, u32, &str, String);

impl IntoCssValue for Option<&TokenValue> {
    fn into_css_value(self) -> Option<TokenValue> {
        self.cloned()
    }
}

impl IntoCssValue for Option<TokenValue> {
    fn into_css_value(self) -> Option<TokenValue> {
        self
    }
}

/// The output of a style function.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Interpolation {
    #[default]
    Empty,
    Object(CssObject),
    List(Vec<Interpolation>),
    /// Pre-serialized CSS emitted verbatim.
    Raw(String),
}

impl Interpolation {
    /// Serializes to CSS text. Output is deterministic for equal inputs.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        serialize::write_interpolation(self, &mut out);
        out
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Interpolation::Empty => true,
            Interpolation::Object(obj) => obj.is_empty(),
            Interpolation::List(items) => items.iter().all(Interpolation::is_empty),
            Interpolation::Raw(raw) => raw.is_empty(),
        }
    }
}

impl From<CssObject> for Interpolation {
    fn from(obj: CssObject) -> Self {
        Interpolation::Object(obj)
    }
}

impl From<Vec<Interpolation>> for Interpolation {
    fn from(items: Vec<Interpolation>) -> Self {
        Interpolation::List(items)
    }
}

/// The ordered style list registered for one component: the common style (or
/// `None` when reset styles are off) followed by the component style.
pub type StyleList = Vec<Option<Interpolation>>;
