//! Translation resolution with default-locale fallback.

use std::sync::Arc;

use serde_json::Value;

use crate::error::TrimmerResult;
use crate::i18n::catalog::{select, TranslationStore};
use crate::i18n::keys::{effective_keys, AllowedKeys};

/// Produces the translations payload for one locale.
#[derive(Debug, Clone)]
pub struct TranslationResolver {
    store: Arc<dyn TranslationStore>,
}

impl TranslationResolver {
    pub fn new(store: Arc<dyn TranslationStore>) -> Self {
        Self { store }
    }

    /// Default-locale keys with the requested locale's keys laid over them.
    ///
    /// Without a locale only the default-locale keys are returned. `only` is
    /// applied to both sides before merging.
    pub fn resolve(&self, locale: Option<&str>, only: &AllowedKeys) -> TrimmerResult<Value> {
        let mut merged = Value::Object(self.store.subtree(self.store.default_locale(), only)?);

        if let Some(locale) = locale.filter(|l| !l.is_empty()) {
            let overlay = self.store.subtree(locale, only)?;
            deep_merge(&mut merged, Value::Object(overlay));
        }

        Ok(merged)
    }

    /// `resolve` for a client request filter, bounded by the configured keys.
    ///
    /// Request entries are admitted by plain prefix against `allowed`, then the
    /// result is cut back to `allowed` so an entry like `date_secret` admitted
    /// under `date` exports nothing.
    pub fn resolve_request(
        &self,
        locale: Option<&str>,
        allowed: &AllowedKeys,
        requested: Option<&str>,
    ) -> TrimmerResult<Value> {
        let only = effective_keys(allowed, requested);
        match self.resolve(locale, &only)? {
            Value::Object(tree) => Ok(Value::Object(select(&tree, allowed))),
            other => Ok(other),
        }
    }

    /// `resolve_request` wrapped in the `I18n.translations` JavaScript snippet.
    pub fn to_js(
        &self,
        locale: Option<&str>,
        allowed: &AllowedKeys,
        requested: Option<&str>,
    ) -> TrimmerResult<String> {
        let translations = self.resolve_request(locale, allowed, requested)?;
        Ok(format!(
            "if(typeof(I18n) == 'undefined') {{ I18n = {{}}; }};\nI18n.translations = ({translations});"
        ))
    }
}

/// Recursively overlay `overlay` onto `base`.
///
/// Objects are merged key by key; for anything else the overlay value wins.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
