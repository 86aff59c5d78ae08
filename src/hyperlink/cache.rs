use crate::url::Url;
use core::cell::RefCell;

/// Observable state of a [`UrlCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No record: never parsed, invalidated, or the attribute did not parse
    Uncached,
    /// Hierarchical record, re-derived from the attribute on every access
    Live,
    /// Opaque-path record, kept as parsed
    Frozen,
}

/// The URL record associated with one hyperlink element.
///
/// Getters take `&self`, so the record sits behind a `RefCell`. Borrows
/// never escape this type.
#[derive(Debug, Default)]
pub struct UrlCache {
    url: RefCell<Option<Url>>,
}

impl UrlCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CacheState {
        match &*self.url.borrow() {
            None => CacheState::Uncached,
            Some(url) if url.is_hierarchical() => CacheState::Live,
            Some(_) => CacheState::Frozen,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.state() == CacheState::Frozen
    }

    /// Drop the record so the next access re-reads the attribute
    pub fn invalidate(&self) {
        self.url.replace(None);
    }

    /// Copy of the cached record
    pub fn get(&self) -> Option<Url> {
        self.url.borrow().clone()
    }

    pub(crate) fn replace(&self, url: Option<Url>) {
        self.url.replace(url);
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(Option<&Url>) -> R) -> R {
        f(self.url.borrow().as_ref())
    }
}
