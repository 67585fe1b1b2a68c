//! Content store collaborators that hand out taxonomy snapshots.

use std::sync::{Arc, PoisonError, RwLock};

use crate::model::{SiteContent, TaxonomySnapshot};

/// Read accessor for the current site content.
///
/// Called once per query. Implementations must hand out a whole `Arc` and
/// never mutate content behind an `Arc` they already gave away, so a single
/// lookup always sees one consistent snapshot.
pub trait ContentStore: Send + Sync {
    fn site_content(&self) -> Arc<SiteContent>;
}

impl<S: ContentStore + ?Sized> ContentStore for Arc<S> {
    fn site_content(&self) -> Arc<SiteContent> {
        (**self).site_content()
    }
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn site_content(&self) -> Arc<SiteContent> {
        (**self).site_content()
    }
}

/// Adapts a host getter function into a store.
pub struct FnStore<F>(pub F);

impl<F> ContentStore for FnStore<F>
where
    F: Fn() -> Arc<SiteContent> + Send + Sync,
{
    fn site_content(&self) -> Arc<SiteContent> {
        (self.0)()
    }
}

/// Store over a single immutable document.
#[derive(Debug, Clone, Default)]
pub struct StaticStore {
    content: Arc<SiteContent>,
}

impl StaticStore {
    pub fn new(content: impl Into<SiteContent>) -> Self {
        Self { content: Arc::new(content.into()) }
    }

    pub fn from_snapshot(snapshot: TaxonomySnapshot) -> Self {
        Self::new(SiteContent::new(snapshot))
    }
}

impl ContentStore for StaticStore {
    fn site_content(&self) -> Arc<SiteContent> {
        Arc::clone(&self.content)
    }
}

/// Store whose content can be replaced while readers are active.
///
/// `replace` swaps the reference; readers holding the previous `Arc` finish
/// against the content they started with.
#[derive(Debug, Default)]
pub struct SharedStore {
    current: RwLock<Arc<SiteContent>>,
}

impl SharedStore {
    pub fn new(content: impl Into<SiteContent>) -> Self {
        Self { current: RwLock::new(Arc::new(content.into())) }
    }

    /// Install new content, returning the previous one.
    pub fn replace(&self, content: impl Into<SiteContent>) -> Arc<SiteContent> {
        let next = Arc::new(content.into());
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let categories = next.taxonomy().categories.len();
        let previous = std::mem::replace(&mut *guard, next);
        tracing::debug!(categories, "taxonomy content replaced");
        previous
    }
}

impl ContentStore for SharedStore {
    fn site_content(&self) -> Arc<SiteContent> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn content(slug: &str) -> SiteContent {
        SiteContent::new(TaxonomySnapshot::new(vec![Category::new(slug, slug)]))
    }

    #[test]
    fn shared_store_replace_keeps_old_readers_consistent() {
        let store = SharedStore::new(content("blog"));
        let before = store.site_content();
        let previous = store.replace(content("news"));

        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.taxonomy().categories[0].slug, "blog");
        assert_eq!(store.site_content().taxonomy().categories[0].slug, "news");
    }

    #[test]
    fn getter_functions_act_as_stores() {
        let shared = Arc::new(content("blog"));
        let store = FnStore(move || Arc::clone(&shared));
        assert_eq!(store.site_content().taxonomy().categories[0].slug, "blog");
    }
}
