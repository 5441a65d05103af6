//! In-memory [`RegisterStyle`] implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;

use super::css_var::{serialize_css_var, transform_token};
use super::{CssVarDescriptor, CssVarEntry, RegisterConfig, RegisterStyle, StyleEntry, StyleKey};
use crate::error::{Result, StyleError};
use crate::style::StyleList;
use crate::token::TokenMap;

type Slot<T> = Arc<OnceCell<Arc<T>>>;

/// Registers each style key at most once and keeps every artifact for
/// extraction.
///
/// The map lock only guards slot lookup. Producers run outside it, inside the
/// slot's `OnceCell`, so concurrent registrations of the same key block on
/// that key alone and observe one producer run.
///
/// ```rust
/// use tokenstyle::registry::{RegisterConfig, RegisterStyle, StyleCache, StyleKey};
/// use tokenstyle::calc::TokenMode;
/// use tokenstyle::style::Interpolation;
///
/// let cache = StyleCache::new();
/// let config = RegisterConfig {
///     hash_id: "css-1".into(),
///     nonce: None,
///     client_only: false,
///     layer: None,
///     order: -999,
///     mode: TokenMode::Direct,
///     css_var_key: None,
/// };
/// let key = StyleKey::new("css-1", ["Button-Button", "ant-btn", "anticon"]);
///
/// let mut runs = 0;
/// for _ in 0..3 {
///     cache
///         .register(key.clone(), &config, &mut || {
///             runs += 1;
///             vec![Some(Interpolation::Raw(".ant-btn{}".into()))]
///         })
///         .unwrap();
/// }
/// assert_eq!(runs, 1);
/// assert_eq!(cache.extract_css(false), ".ant-btn{}");
/// ```
#[derive(Debug, Default)]
pub struct StyleCache {
    styles: Mutex<HashMap<StyleKey, Slot<StyleEntry>>>,
    vars: Mutex<HashMap<Vec<String>, Slot<CssVarEntry>>>,
    seq: AtomicU64,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.style_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The entry registered under `key`.
    pub fn get(&self, key: &StyleKey) -> Option<Arc<StyleEntry>> {
        let slot = read(&self.styles).get(key).cloned()?;
        slot.get().cloned()
    }

    /// The variable mapping registered for `descriptor`.
    pub fn css_var(&self, descriptor: &CssVarDescriptor) -> Option<Arc<CssVarEntry>> {
        let slot = read(&self.vars).get(&descriptor.cache_key()).cloned()?;
        slot.get().cloned()
    }

    /// Registered styles, sorted by order then registration sequence.
    pub fn style_entries(&self) -> Vec<Arc<StyleEntry>> {
        let mut entries: Vec<Arc<StyleEntry>> = read(&self.styles)
            .values()
            .filter_map(|slot| slot.get().cloned())
            .collect();
        entries.sort_by_key(|entry| (entry.order, entry.seq));
        entries
    }

    /// Registered variable mappings in registration order.
    pub fn css_var_entries(&self) -> Vec<Arc<CssVarEntry>> {
        let mut entries: Vec<Arc<CssVarEntry>> = read(&self.vars)
            .values()
            .filter_map(|slot| slot.get().cloned())
            .collect();
        entries.sort_by_key(|entry| entry.seq);
        entries
    }

    /// Serializes everything registered so far into one stylesheet.
    ///
    /// Variable blocks come first, then styles by order. With `for_server`
    /// set, client-only styles are left out. Layered styles are wrapped in
    /// `@layer name{...}`.
    pub fn extract_css(&self, for_server: bool) -> String {
        let mut out: String = self
            .css_var_entries()
            .iter()
            .map(|entry| entry.css.as_str())
            .collect();

        for entry in self.style_entries() {
            if for_server && entry.client_only {
                continue;
            }
            let css = entry.css();
            match &entry.layer {
                Some(layer) if !css.is_empty() => out.push_str(&format!("@layer {}{{{}}}", layer, css)),
                _ => out.push_str(&css),
            }
        }
        out
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

/// Read access for lookups and extraction.
///
/// Slots are only inserted under the lock and filled outside it, so a poisoned
/// map is still complete.
fn read<K, T>(map: &Mutex<HashMap<K, Slot<T>>>) -> MutexGuard<'_, HashMap<K, Slot<T>>> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

fn slot<K, T>(map: &Mutex<HashMap<K, Slot<T>>>, key: K, what: &'static str) -> Result<Slot<T>>
where
    K: std::hash::Hash + Eq,
{
    let mut map = map.lock().map_err(|_| StyleError::poisoned(what))?;
    Ok(Arc::clone(map.entry(key).or_default()))
}

impl RegisterStyle for StyleCache {
    fn register(
        &self,
        key: StyleKey,
        config: &RegisterConfig,
        producer: &mut dyn FnMut() -> StyleList,
    ) -> Result<Arc<StyleEntry>> {
        let cell = slot(&self.styles, key.clone(), "style cache")?;
        let mut produced = false;
        let entry = cell.get_or_init(|| {
            produced = true;
            tracing::debug!(key = %key, order = config.order, "registering style");
            Arc::new(StyleEntry {
                styles: producer(),
                hash_id: config.hash_id.clone(),
                mode: config.mode,
                css_var_key: config.css_var_key.clone(),
                order: config.order,
                layer: config.layer.clone(),
                nonce: config.nonce.clone(),
                client_only: config.client_only,
                seq: self.next_seq(),
                key: key.clone(),
            })
        });
        if !produced {
            tracing::trace!(key = %key, "style cache hit");
        }
        Ok(Arc::clone(entry))
    }

    fn register_css_var(
        &self,
        descriptor: &CssVarDescriptor,
        producer: &mut dyn FnMut() -> TokenMap,
    ) -> Result<Arc<CssVarEntry>> {
        let cell = slot(&self.vars, descriptor.cache_key(), "css var cache")?;
        let entry = cell.get_or_init(|| {
            tracing::debug!(path = ?descriptor.path, key = %descriptor.key, "registering css vars");
            let token = producer();
            let (refs, declarations) = transform_token(
                &token,
                descriptor.prefix.as_deref(),
                &descriptor.unitless,
                &descriptor.ignore,
            );
            let css = serialize_css_var(&declarations, &descriptor.key, &descriptor.scope);
            Arc::new(CssVarEntry {
                key: descriptor.key.clone(),
                scope: descriptor.scope.clone(),
                declarations,
                refs,
                css,
                seq: self.next_seq(),
            })
        });
        Ok(Arc::clone(entry))
    }
}
