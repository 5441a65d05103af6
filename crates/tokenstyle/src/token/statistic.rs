//! Token usage statistics.
//!
//! After each derivation the pipeline records, per component, which global
//! tokens the style function read and the component token it resolved. Tools
//! use this to ship only the tokens a set of components actually needs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use super::value::TokenMap;
use crate::error::StyleError;

/// Usage record of one component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStatistic {
    /// Global token keys read by the style function.
    pub global: BTreeSet<String>,
    /// The resolved component token.
    pub component: TokenMap,
}

/// Accumulates [`TokenStatistic`]s across derivations.
#[derive(Debug, Default)]
pub struct Statistics {
    inner: Mutex<BTreeMap<String, TokenStatistic>>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a derivation's reads and component token into the record of
    /// `component`.
    pub fn flush(&self, component: &str, global: BTreeSet<String>, token: &TokenMap) -> Result<(), StyleError> {
        let mut inner = self.inner.lock().map_err(|_| StyleError::poisoned("statistics"))?;
        let entry = inner.entry(component.to_string()).or_default();
        entry.global.extend(global);
        entry
            .component
            .extend(token.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    /// The record of `component`, if it was ever derived.
    pub fn get(&self, component: &str) -> Option<TokenStatistic> {
        self.inner.lock().ok()?.get(component).cloned()
    }

    /// Snapshot of every record.
    pub fn snapshot(&self) -> BTreeMap<String, TokenStatistic> {
        self.inner
            .lock()
            .map(|inner| inner.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenValue;

    #[test]
    fn test_flush_accumulates() {
        let stats = Statistics::new();
        let mut token = TokenMap::new();
        token.insert("paddingInline".into(), TokenValue::from(15));
        stats
            .flush("Button", ["colorPrimary".to_string()].into(), &token)
            .unwrap();

        let mut more = TokenMap::new();
        more.insert("zIndexPopup".into(), TokenValue::from(1000));
        stats.flush("Button", ["fontSize".to_string()].into(), &more).unwrap();

        let record = stats.get("Button").unwrap();
        assert_eq!(record.global.len(), 2);
        assert_eq!(record.component.len(), 2);
        assert!(stats.get("Modal").is_none());
        assert_eq!(stats.snapshot().len(), 1);
    }
}
