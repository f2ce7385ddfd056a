//! Translation catalog storage.
//!
//! # Responsibilities
//! - Define the store seam used by the resolver and the `t` template function
//! - Load locale files (JSON or TOML) from a directory into memory
//! - Select key-path subtrees for an [`AllowedKeys`] filter
//!
//! # File layout
//! Every file maps locales to nested key trees:
//! ```toml
//! [en.date]
//! short = "%b %d"
//!
//! [fr.date]
//! short = "%d %b"
//! ```
//! Files are merged in path order; later files override earlier ones.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use walkdir::WalkDir;

use crate::i18n::keys::AllowedKeys;
use crate::i18n::resolver::deep_merge;

/// Errors raised while loading or reading a translation catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read translation file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan translations directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Top level is not a `locale -> object` mapping.
    #[error("Translations from {origin} must map each locale to a table of keys")]
    Shape { origin: String },
}

/// Read access to translations partitioned by locale.
pub trait TranslationStore: Send + Sync + std::fmt::Debug {
    /// Locale used to fill gaps in every other locale.
    fn default_locale(&self) -> &str;

    /// Keys of `locale` selected by `only`. Unknown locales yield an empty map.
    fn subtree(&self, locale: &str, only: &AllowedKeys) -> Result<Map<String, Value>, CatalogError>;

    /// Value at dotted `key` in `locale`, if any.
    fn lookup(&self, locale: &str, key: &str) -> Result<Option<Value>, CatalogError>;
}

/// In-memory catalog, immutable once built.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    default_locale: String,
    locales: Map<String, Value>,
}

impl StaticCatalog {
    /// Empty catalog.
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            locales: Map::new(),
        }
    }

    /// Build from a `{locale: {...}}` value.
    pub fn from_value(default_locale: impl Into<String>, value: Value) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(default_locale);
        catalog.merge(value, "<memory>")?;
        Ok(catalog)
    }

    /// Load every `*.json` and `*.toml` file under `dir`.
    pub fn load_dir(dir: &Path, default_locale: impl Into<String>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(default_locale);

        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let parsed = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => {
                    let content = read(path)?;
                    serde_json::from_str::<Value>(&content).map_err(|source| CatalogError::Json {
                        path: path.to_path_buf(),
                        source,
                    })?
                }
                Some("toml") => {
                    let content = read(path)?;
                    toml::from_str::<Value>(&content).map_err(|source| CatalogError::Toml {
                        path: path.to_path_buf(),
                        source,
                    })?
                }
                _ => continue,
            };

            catalog.merge(parsed, &path.display().to_string())?;
        }

        tracing::info!(
            path = %dir.display(),
            locales = catalog.locales.len(),
            "Translation catalog loaded"
        );
        Ok(catalog)
    }

    /// Locales present in the catalog, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    fn merge(&mut self, value: Value, origin: &str) -> Result<(), CatalogError> {
        let Value::Object(locales) = value else {
            return Err(CatalogError::Shape { origin: origin.to_string() });
        };
        if locales.values().any(|tree| !tree.is_object()) {
            return Err(CatalogError::Shape { origin: origin.to_string() });
        }

        let mut merged = Value::Object(std::mem::take(&mut self.locales));
        deep_merge(&mut merged, Value::Object(locales));
        if let Value::Object(locales) = merged {
            self.locales = locales;
        }
        Ok(())
    }
}

impl TranslationStore for StaticCatalog {
    fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn subtree(&self, locale: &str, only: &AllowedKeys) -> Result<Map<String, Value>, CatalogError> {
        Ok(match self.locales.get(locale) {
            Some(Value::Object(tree)) => select(tree, only),
            _ => Map::new(),
        })
    }

    fn lookup(&self, locale: &str, key: &str) -> Result<Option<Value>, CatalogError> {
        let Some(tree) = self.locales.get(locale) else {
            return Ok(None);
        };
        let found = key.split('.').try_fold(tree, |node, segment| node.get(segment));
        Ok(found.cloned())
    }
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Keep only the parts of `tree` reachable through one of the dotted prefixes.
///
/// A `*` segment matches any key at its depth. A prefix naming a subtree keeps
/// that whole subtree; a prefix reaching past a leaf keeps nothing.
pub fn select(tree: &Map<String, Value>, only: &AllowedKeys) -> Map<String, Value> {
    match only {
        AllowedKeys::All => tree.clone(),
        AllowedKeys::Prefixes(prefixes) => {
            let patterns: Vec<Vec<&str>> = prefixes.iter().map(|p| p.split('.').collect()).collect();
            let patterns: Vec<&[&str]> = patterns.iter().map(Vec::as_slice).collect();
            select_paths(tree, &patterns)
        }
    }
}

fn select_paths(tree: &Map<String, Value>, patterns: &[&[&str]]) -> Map<String, Value> {
    let mut selected = Map::new();

    for (key, value) in tree {
        let mut whole = false;
        let mut deeper: Vec<&[&str]> = Vec::new();

        for pattern in patterns {
            let Some((head, tail)) = pattern.split_first() else {
                continue;
            };
            if *head != "*" && *head != key.as_str() {
                continue;
            }
            if tail.is_empty() {
                whole = true;
                break;
            }
            deeper.push(tail);
        }

        if whole {
            selected.insert(key.clone(), value.clone());
        } else if let (false, Value::Object(children)) = (deeper.is_empty(), value) {
            let nested = select_paths(children, &deeper);
            if !nested.is_empty() {
                selected.insert(key.clone(), Value::Object(nested));
            }
        }
    }

    selected
}
