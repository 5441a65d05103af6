//! Common imports for writing component styles.
//!
//! ```rust
//! use tokenstyle::prelude::*;
//!
//! let style = |token: &FullToken, _: &StyleInfo| {
//!     Interpolation::from(CssObject::new().nest(&token.component_cls, CssObject::new()))
//! };
//! # let _ = style;
//! ```

pub use crate::calc::{Calculator, TokenMode};
pub use crate::context::{CssVarConfig, PrefixConfig, TokenContext, TokenProvider};
pub use crate::hooks::{ComponentName, StyleHooks, StyleInfo, StyleOptions, StyleUtils, StyleUtilsConfig};
pub use crate::registry::{RegisterStyle, StyleCache};
pub use crate::style::{CssObject, Interpolation};
pub use crate::token::{DefaultToken, FullToken, TokenMap, TokenSet, TokenValue};
