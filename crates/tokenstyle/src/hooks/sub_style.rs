//! Style-only sub components.

use super::component::ComponentStyleHook;
use crate::error::Result;

/// Props of a [`SubStyleComponent`] render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubStyleProps {
    pub prefix_cls: String,
    /// Defaults to `prefix_cls`.
    pub root_cls: Option<String>,
}

impl SubStyleProps {
    pub fn new(prefix_cls: impl Into<String>) -> Self {
        Self {
            prefix_cls: prefix_cls.into(),
            root_cls: None,
        }
    }

    pub fn root_cls(mut self, root_cls: impl Into<String>) -> Self {
        self.root_cls = Some(root_cls.into());
        self
    }
}

/// A component that renders nothing and only registers its style.
#[derive(Debug)]
pub struct SubStyleComponent {
    hook: ComponentStyleHook,
    display_name: String,
}

impl SubStyleComponent {
    pub(crate) fn new(hook: ComponentStyleHook, display_name: String) -> Self {
        Self { hook, display_name }
    }

    /// `SubStyle_Button` or `SubStyle_Button.Group`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn hook(&self) -> &ComponentStyleHook {
        &self.hook
    }

    /// Registers the style for `props`.
    pub fn render(&self, props: &SubStyleProps) -> Result<()> {
        self.hook.use_style(&props.prefix_cls, props.root_cls.as_deref())?;
        Ok(())
    }
}
