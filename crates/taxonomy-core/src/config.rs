//! Layered configuration and path helpers.
//!
//! Uses Figment to merge built-in defaults, `taxonomy.toml`,
//! `taxonomy.<env>.toml` and `TAXONOMY_*` env vars (`__` separates nesting,
//! e.g. `TAXONOMY_SOURCE__PATH`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Serialize)]
struct Defaults {
    log: LogDefaults,
}

#[derive(Debug, Clone, Serialize)]
struct LogDefaults {
    filter: String,
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Self::defaults().merge(Toml::file("taxonomy.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("taxonomy.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("taxonomy.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("taxonomy.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("TAXONOMY_").split("__"));

        tracing::debug!(env = %env_name, "configuration loaded");
        Ok(Self { figment })
    }

    /// Wrap an already-assembled figment on top of the built-in defaults.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment: Self::defaults().merge(figment) }
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Defaults {
            log: LogDefaults { filter: DEFAULT_LOG_FILTER.to_string() },
        }))
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    /// Snapshot file from `source.path`, expanded and resolved against `base`.
    pub fn source_path(&self, base: &Path) -> Result<PathBuf> {
        let raw: String = self.get("source.path")?;
        Ok(resolve_with_base(base, raw))
    }

    pub fn log_filter(&self) -> String {
        self.get("log.filter").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
