//! Decoding taxonomy documents from JSON or TOML.
//!
//! Accepts either a site content document (`{ "taxonomy": { "categories": [...] } }`)
//! or a bare snapshot (`{ "categories": [...] }`). Records must be objects and
//! collections must be arrays; `null` or a missing field counts as empty.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::Config;
use crate::error::{LoadError, Result};
use crate::model::{SiteContent, TaxonomySnapshot};

type LoadResult<T> = std::result::Result<T, LoadError>;

fn shape_error(msg: impl Display) -> LoadError {
    LoadError::Shape(serde::de::Error::custom(msg))
}

fn check_records(value: Option<&Value>, what: &str) -> LoadResult<()> {
    match value {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                let Some(record) = item.as_object() else {
                    return Err(shape_error(format!("`{what}[{i}]` must be an object")));
                };
                if what == "categories" {
                    check_records(record.get("tags"), "tags")?;
                }
            }
            Ok(())
        }
        Some(_) => Err(shape_error(format!("`{what}` must be an array"))),
    }
}

fn check_shape(value: &Value) -> LoadResult<bool> {
    let Some(root) = value.as_object() else {
        return Err(shape_error("document root must be an object"));
    };
    if root.contains_key("categories") {
        check_records(root.get("categories"), "categories")?;
        return Ok(true);
    }
    match root.get("taxonomy") {
        None | Some(Value::Null) => {}
        Some(Value::Object(taxonomy)) => check_records(taxonomy.get("categories"), "categories")?,
        Some(_) => return Err(shape_error("`taxonomy` must be an object")),
    }
    Ok(false)
}

fn from_value(value: Value) -> LoadResult<SiteContent> {
    if check_shape(&value)? {
        let snapshot: TaxonomySnapshot = serde_json::from_value(value).map_err(LoadError::Shape)?;
        Ok(SiteContent::new(snapshot))
    } else {
        serde_json::from_value(value).map_err(LoadError::Shape)
    }
}

pub fn parse_site_content_json(input: &str) -> LoadResult<SiteContent> {
    from_value(serde_json::from_str(input).map_err(LoadError::Json)?)
}

pub fn parse_site_content_toml(input: &str) -> LoadResult<SiteContent> {
    from_value(toml::from_str(input)?)
}

/// Load a site content document, choosing the decoder from the file extension.
pub fn load_site_content(path: &Path) -> LoadResult<SiteContent> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or_default().to_ascii_lowercase();
    let parse: fn(&str) -> LoadResult<SiteContent> = match ext.as_str() {
        "json" => parse_site_content_json,
        "toml" => parse_site_content_toml,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };
    let raw = fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.display().to_string(), source })?;
    let content = parse(&raw)?;
    tracing::info!(
        path = %path.display(),
        categories = content.taxonomy().categories.len(),
        "loaded taxonomy"
    );
    Ok(content)
}

/// Load the document named by `source.path`, resolved against `base`.
pub fn load_configured(config: &Config, base: &Path) -> Result<SiteContent> {
    let path = config.source_path(base)?;
    Ok(load_site_content(&path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_shape_error(input: &str) -> bool {
        matches!(parse_site_content_json(input), Err(LoadError::Shape(_)))
    }

    #[test]
    fn bare_and_wrapped_documents_decode_alike() {
        let bare = parse_site_content_json(r#"{ "categories": [ { "slug": "blog" } ] }"#)
            .expect("bare");
        let wrapped =
            parse_site_content_json(r#"{ "taxonomy": { "categories": [ { "slug": "blog" } ] } }"#)
                .expect("wrapped");
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn syntax_and_shape_errors_are_distinct() {
        assert!(matches!(parse_site_content_json("{"), Err(LoadError::Json(_))));
        assert!(is_shape_error(r#"{ "categories": 3 }"#));
        assert!(matches!(parse_site_content_toml("categories = ["), Err(LoadError::Toml(_))));
    }

    #[test]
    fn sequence_shaped_records_are_rejected() {
        assert!(is_shape_error("[]"));
        assert!(is_shape_error(r#"{ "taxonomy": [] }"#));
        assert!(is_shape_error(r#"{ "taxonomy": "x" }"#));
        assert!(is_shape_error(r#"{ "taxonomy": [[["blog", "Blog", []]]] }"#));
        assert!(is_shape_error(r#"{ "categories": [["blog", "Blog", []]] }"#));
        assert!(is_shape_error(r#"{ "categories": [ { "slug": "b", "tags": [["a", "A"]] } ] }"#));
        assert!(is_shape_error(r#"{ "categories": [ { "slug": "blog", "tags": "a" } ] }"#));
    }

    #[test]
    fn null_collections_still_decode_empty() {
        let content = parse_site_content_json(r#"{ "taxonomy": null }"#).expect("null taxonomy");
        assert!(content.taxonomy().is_empty());
        let content =
            parse_site_content_json(r#"{ "categories": [ { "slug": "blog", "tags": null } ] }"#)
                .expect("null tags");
        assert!(content.taxonomy().categories[0].tags.is_empty());
    }
}
