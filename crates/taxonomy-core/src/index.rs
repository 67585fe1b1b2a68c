//! Slug resolution over taxonomy snapshots.
//!
//! Unresolved slugs are an expected outcome, not an error: every public
//! query maps a miss to a fixed fallback (`false`, empty record, `""` or an
//! empty slice). Duplicate slugs resolve to the first match in sequence order.

use std::borrow::Cow;

use crate::model::{Category, Tag, TaxonomySnapshot, EMPTY_CATEGORY, EMPTY_TAG};
use crate::store::ContentStore;

/// First category in `snapshot` whose slug equals `category_slug`.
pub fn resolve_category<'a>(
    snapshot: &'a TaxonomySnapshot,
    category_slug: &str,
) -> Option<&'a Category> {
    snapshot.categories.iter().find(|c| c.slug == category_slug)
}

/// First tag named `tag_slug` inside the first category named `category_slug`.
pub fn resolve_tag<'a>(
    snapshot: &'a TaxonomySnapshot,
    category_slug: &str,
    tag_slug: &str,
) -> Option<&'a Tag> {
    resolve_category(snapshot, category_slug)?
        .tags
        .iter()
        .find(|t| t.slug == tag_slug)
}

/// Borrowing query surface over one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyView<'a> {
    snapshot: &'a TaxonomySnapshot,
}

impl<'a> TaxonomyView<'a> {
    pub fn new(snapshot: &'a TaxonomySnapshot) -> Self {
        Self { snapshot }
    }

    fn category(&self, category_slug: &str) -> Option<&'a Category> {
        let found = resolve_category(self.snapshot, category_slug);
        if found.is_none() {
            tracing::debug!(category = category_slug, "taxonomy category not found");
        }
        found
    }

    fn tag(&self, category_slug: &str, tag_slug: &str) -> Option<&'a Tag> {
        let found = resolve_tag(self.snapshot, category_slug, tag_slug);
        if found.is_none() {
            tracing::debug!(category = category_slug, tag = tag_slug, "taxonomy tag not found");
        }
        found
    }

    pub fn category_exists(&self, category_slug: &str) -> bool {
        self.category(category_slug).is_some()
    }

    /// The category, or the shared empty record (`is_empty()` is true).
    pub fn get_category(&self, category_slug: &str) -> &'a Category {
        self.category(category_slug).unwrap_or(&EMPTY_CATEGORY)
    }

    pub fn get_category_label(&self, category_slug: &str) -> &'a str {
        self.category(category_slug).map_or("", |c| c.label.as_str())
    }

    pub fn get_tags_by_category(&self, category_slug: &str) -> &'a [Tag] {
        self.category(category_slug).map_or(&[] as &[Tag], |c| c.tags.as_slice())
    }

    pub fn tag_exists(&self, category_slug: &str, tag_slug: &str) -> bool {
        self.tag(category_slug, tag_slug).is_some()
    }

    /// The tag, or the shared empty record (`is_empty()` is true).
    pub fn get_tag(&self, category_slug: &str, tag_slug: &str) -> &'a Tag {
        self.tag(category_slug, tag_slug).unwrap_or(&EMPTY_TAG)
    }

    pub fn get_tag_label(&self, category_slug: &str, tag_slug: &str) -> &'a str {
        self.tag(category_slug, tag_slug).map_or("", |t| t.label.as_str())
    }
}

/// Query surface bound to a content store.
///
/// Each call fetches the current content once and returns owned values, so
/// the store is free to swap content between calls. Record lookups return
/// `Cow::Borrowed` of the shared empty record on a miss and `Cow::Owned` on
/// a hit, so `is_empty()` stays meaningful on the result.
pub struct TaxonomyIndex<S> {
    store: S,
}

impl<S: ContentStore> TaxonomyIndex<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn with_view<T>(&self, f: impl FnOnce(TaxonomyView<'_>) -> T) -> T {
        let content = self.store.site_content();
        f(TaxonomyView::new(content.taxonomy()))
    }

    pub fn category_exists(&self, category_slug: &str) -> bool {
        self.with_view(|v| v.category_exists(category_slug))
    }

    pub fn get_category(&self, category_slug: &str) -> Cow<'static, Category> {
        self.with_view(|v| match v.category(category_slug) {
            Some(found) => Cow::Owned(found.clone()),
            None => Cow::Borrowed(&EMPTY_CATEGORY),
        })
    }

    pub fn get_category_label(&self, category_slug: &str) -> String {
        self.with_view(|v| v.get_category_label(category_slug).to_owned())
    }

    pub fn get_tags_by_category(&self, category_slug: &str) -> Vec<Tag> {
        self.with_view(|v| v.get_tags_by_category(category_slug).to_vec())
    }

    pub fn tag_exists(&self, category_slug: &str, tag_slug: &str) -> bool {
        self.with_view(|v| v.tag_exists(category_slug, tag_slug))
    }

    pub fn get_tag(&self, category_slug: &str, tag_slug: &str) -> Cow<'static, Tag> {
        self.with_view(|v| match v.tag(category_slug, tag_slug) {
            Some(found) => Cow::Owned(found.clone()),
            None => Cow::Borrowed(&EMPTY_TAG),
        })
    }

    pub fn get_tag_label(&self, category_slug: &str, tag_slug: &str) -> String {
        self.with_view(|v| v.get_tag_label(category_slug, tag_slug).to_owned())
    }
}
