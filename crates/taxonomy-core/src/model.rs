//! Taxonomy data model: categories owning ordered tags.
//!
//! Absent or `null` collections decode as empty, and absent `slug`/`label`
//! strings decode as `""`. A field present with the wrong shape is a decode
//! error reported by the loader, never a query-time failure.

use serde::{Deserialize, Deserializer, Serialize};

pub(crate) static EMPTY_TAG: Tag = Tag { slug: String::new(), label: String::new() };

pub(crate) static EMPTY_CATEGORY: Category = Category {
    slug: String::new(),
    label: String::new(),
    tags: Vec::new(),
};

static EMPTY_SNAPSHOT: TaxonomySnapshot = TaxonomySnapshot { categories: Vec::new() };

/// A leaf of the taxonomy. Identified globally by `(category slug, tag slug)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
}

impl Tag {
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self { slug: slug.into(), label: label.into() }
    }

    /// True only for the shared fallback returned when a tag lookup misses.
    ///
    /// A real tag whose fields are all blank is not empty.
    pub fn is_empty(&self) -> bool {
        std::ptr::eq(self, &EMPTY_TAG)
    }
}

/// A top-level grouping. `tags` keeps display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

impl Category {
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self { slug: slug.into(), label: label.into(), tags: Vec::new() }
    }

    pub fn with_tag(mut self, slug: impl Into<String>, label: impl Into<String>) -> Self {
        self.tags.push(Tag::new(slug, label));
        self
    }

    /// True only for the shared fallback returned when a category lookup misses.
    ///
    /// A real category whose fields are all blank is not empty.
    pub fn is_empty(&self) -> bool {
        std::ptr::eq(self, &EMPTY_CATEGORY)
    }
}

/// Point-in-time view of the whole taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomySnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
}

impl TaxonomySnapshot {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// The content store's root document; the taxonomy lives under `taxonomy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub taxonomy: Option<TaxonomySnapshot>,
}

impl SiteContent {
    pub fn new(taxonomy: TaxonomySnapshot) -> Self {
        Self { taxonomy: Some(taxonomy) }
    }

    /// The taxonomy, or a shared empty snapshot when the field is missing.
    pub fn taxonomy(&self) -> &TaxonomySnapshot {
        self.taxonomy.as_ref().unwrap_or(&EMPTY_SNAPSHOT)
    }
}

impl From<TaxonomySnapshot> for SiteContent {
    fn from(taxonomy: TaxonomySnapshot) -> Self {
        Self::new(taxonomy)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_collections_decode_empty() {
        let json = r#"{ "categories": [
            { "slug": "blog", "label": "Blog", "tags": null },
            { "slug": "news" }
        ] }"#;
        let snapshot: TaxonomySnapshot = serde_json::from_str(json).expect("decode");
        assert_eq!(snapshot.categories.len(), 2);
        assert!(snapshot.categories[0].tags.is_empty());
        assert_eq!(snapshot.categories[1].label, "");
        assert!(snapshot.categories[1].tags.is_empty());

        let snapshot: TaxonomySnapshot =
            serde_json::from_str(r#"{ "categories": null }"#).expect("decode");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let res = serde_json::from_str::<TaxonomySnapshot>(r#"{ "categories": "blog" }"#);
        assert!(res.is_err());
    }

    #[test]
    fn missing_taxonomy_field_yields_empty_snapshot() {
        let content: SiteContent = serde_json::from_str(r#"{ "title": "Site" }"#).expect("decode");
        assert!(content.taxonomy.is_none());
        assert!(content.taxonomy().is_empty());
    }

    #[test]
    fn only_shared_fallbacks_are_empty() {
        assert!(EMPTY_CATEGORY.is_empty());
        assert!(EMPTY_TAG.is_empty());
        assert!(!Category::default().is_empty());
        assert!(!Tag::default().is_empty());
        assert!(!Category::new("blog", "Blog").is_empty());
    }
}
