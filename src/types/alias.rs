use std::collections::HashMap;

/// Maps an internal page identifier to the public path it is served at.
///
/// Implemented for any `Fn(&str) -> Option<String>`, so a closure over the
/// host application's alias storage is usually enough. [`AliasMap`] covers
/// the in-memory case.
pub trait AliasResolver {
    /// Resolve `page_id` to a renderable path, or `None` if it cannot be resolved.
    fn resolve_alias(&self, page_id: &str) -> Option<String>;
}

impl<F> AliasResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve_alias(&self, page_id: &str) -> Option<String> {
        self(page_id)
    }
}

const DEFAULT_SYSTEM_PREFIX: &str = "/node/";

/// An in-memory alias table.
///
/// Page ids without an alias resolve to their system path (`/node/{id}` by
/// default) unless the fallback is turned off with
/// [`without_system_fallback()`](Self::without_system_fallback).
///
/// ```
/// use notfound::{AliasMap, AliasResolver};
///
/// let aliases = AliasMap::new().alias("20", "/es/no-encontrado");
/// assert_eq!(aliases.resolve_alias("20").as_deref(), Some("/es/no-encontrado"));
/// assert_eq!(aliases.resolve_alias("7").as_deref(), Some("/node/7"));
/// ```
#[derive(Debug, Clone)]
pub struct AliasMap {
    aliases: HashMap<String, String>,
    system_prefix: Option<String>,
}

impl Default for AliasMap {
    fn default() -> Self {
        Self {
            aliases: HashMap::new(),
            system_prefix: Some(DEFAULT_SYSTEM_PREFIX.to_owned()),
        }
    }
}

impl AliasMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` as the alias of `page_id`, replacing any previous alias.
    #[must_use]
    pub fn alias(mut self, page_id: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(page_id, path);
        self
    }

    pub fn insert(&mut self, page_id: impl Into<String>, path: impl Into<String>) {
        self.aliases.insert(page_id.into(), path.into());
    }

    /// Use `prefix` to build the system path of unaliased pages.
    #[must_use]
    pub fn system_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.system_prefix = Some(prefix.into());
        self
    }

    /// Unaliased pages resolve to `None`.
    #[must_use]
    pub fn without_system_fallback(mut self) -> Self {
        self.system_prefix = None;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl AliasResolver for AliasMap {
    fn resolve_alias(&self, page_id: &str) -> Option<String> {
        if page_id.trim().is_empty() {
            return None;
        }
        self.aliases.get(page_id).cloned().or_else(|| {
            self.system_prefix
                .as_ref()
                .map(|prefix| format!("{prefix}{page_id}"))
        })
    }
}

impl<K, V> FromIterator<(K, V)> for AliasMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (page_id, path) in iter {
            map.insert(page_id, path);
        }
        map
    }
}
