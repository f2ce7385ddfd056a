//! Template tree compilation.
//!
//! Mirrors the templates directory as a nested map of rendered strings:
//! ```text
//! templates/
//!     greeting.html       → "greeting": "<rendered>"
//!     parts/
//!         footer.en.html  → "parts": { "footer": "<rendered>" }
//! ```
//! Directories keep their full name, files are keyed by the part of their
//! name before the first `.`. Hidden entries are skipped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::config::schema::ExecutionMode;
use crate::error::{TrimmerError, TrimmerResult};
use crate::templates::cache::CachePool;
use crate::templates::engine::{RenderOptions, TemplateEngine};

const RENDER_OPTIONS: RenderOptions = RenderOptions { pretty: false };

/// Rendered templates keyed by name, sorted at every level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateTree(BTreeMap<String, TemplateNode>);

/// A rendered file or a nested directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateNode {
    Rendered(String),
    Directory(TemplateTree),
}

impl TemplateTree {
    pub fn get(&self, name: &str) -> Option<&TemplateNode> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Templates = (<json>);`
    pub fn to_js(&self) -> TrimmerResult<String> {
        Ok(format!("Templates = ({});", serde_json::to_string(self)?))
    }

    fn insert(&mut self, name: String, node: TemplateNode) {
        self.0.insert(name, node);
    }

    fn subtree_mut(&mut self, path: &[String]) -> Option<&mut TemplateTree> {
        path.iter().try_fold(self, |tree, name| match tree.0.get_mut(name) {
            Some(TemplateNode::Directory(child)) => Some(child),
            _ => None,
        })
    }
}

/// Compiles the templates directory into a [`TemplateTree`].
#[derive(Debug)]
pub struct TemplateCompiler {
    root: PathBuf,
    engine: TemplateEngine,
    caches: Option<CachePool>,
}

impl TemplateCompiler {
    /// In production mode compiled templates are cached per worker.
    pub fn new(root: impl Into<PathBuf>, engine: TemplateEngine, mode: ExecutionMode) -> Self {
        let caches = match mode {
            ExecutionMode::Production => Some(CachePool::new(engine.clone(), RENDER_OPTIONS)),
            ExecutionMode::Development => None,
        };

        Self {
            root: root.into(),
            engine,
            caches,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render every template under the root for `locale`.
    ///
    /// The first failing file aborts the compilation.
    pub fn compile(&self, locale: Option<&str>) -> TrimmerResult<TemplateTree> {
        let mut lease = self.caches.as_ref().map(CachePool::lease);
        let mut tree = TemplateTree::default();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|err| self.walk_error(err))?;
            let name = entry.file_name().to_string_lossy();

            let (key, node) = if entry.file_type().is_dir() {
                (name.to_string(), TemplateNode::Directory(TemplateTree::default()))
            } else if entry.file_type().is_file() {
                let key = name.split('.').next().unwrap_or_default();
                if key.is_empty() {
                    continue;
                }
                let rendered =
                    self.engine
                        .render(entry.path(), locale, RENDER_OPTIONS, lease.as_deref_mut())?;
                (key.to_string(), TemplateNode::Rendered(rendered))
            } else {
                continue;
            };

            let parents = parent_names(&self.root, entry.path());
            match tree.subtree_mut(&parents) {
                Some(subtree) => subtree.insert(key, node),
                None => tracing::debug!(
                    path = %entry.path().display(),
                    "Skipping template shadowed by a file of the same name"
                ),
            }
        }

        Ok(tree)
    }

    /// `Templates = (...)` for `locale`.
    pub fn to_js(&self, locale: Option<&str>) -> TrimmerResult<String> {
        self.compile(locale)?.to_js()
    }

    fn walk_error(&self, err: walkdir::Error) -> TrimmerError {
        let path = err.path().unwrap_or(&self.root).to_path_buf();
        TrimmerError::Io {
            path,
            source: err.into(),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Directory names between the root and `path`'s parent.
fn parent_names(root: &Path, path: &Path) -> Vec<String> {
    path.parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}
