#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod model;
pub mod store;

pub use index::{resolve_category, resolve_tag, TaxonomyIndex, TaxonomyView};
pub use model::{Category, SiteContent, Tag, TaxonomySnapshot};
pub use store::{ContentStore, FnStore, SharedStore, StaticStore};
