//! Per-worker compiled template caches.
//!
//! # Responsibilities
//! - Keep compiled templates keyed by file path (production mode only)
//! - Hand each compilation exclusive use of one cache
//! - Return caches to the pool when the compilation ends, error or not
//!
//! # Design Decisions
//! - A cache is owned by one execution at a time, so rendering never locks
//! - Append-only: templates are never evicted or recompiled
//! - The pool grows to the peak number of concurrent compilations

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use minijinja::Environment;

use crate::error::TrimmerResult;
use crate::templates::engine::{read_source, render_error, RenderOptions, TemplateEngine};

/// Compiled templates for one worker.
#[derive(Debug)]
pub struct RenderCache {
    env: Environment<'static>,
    compiled: HashSet<PathBuf>,
}

impl RenderCache {
    pub fn new(env: Environment<'static>) -> Self {
        Self {
            env,
            compiled: HashSet::new(),
        }
    }

    /// Number of templates compiled so far.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.compiled.contains(path)
    }

    /// Render `path`, compiling and caching it on first use.
    pub fn render(&mut self, path: &Path, ctx: minijinja::Value) -> TrimmerResult<String> {
        let name = path.to_string_lossy().into_owned();

        if !self.compiled.contains(path) {
            let source = read_source(path)?;
            self.env
                .add_template_owned(name.clone(), source)
                .map_err(|source| render_error(path, source))?;
            self.compiled.insert(path.to_path_buf());
        }

        self.env
            .get_template(&name)
            .and_then(|template| template.render(ctx))
            .map_err(|source| render_error(path, source))
    }
}

/// Idle caches waiting for the next compilation.
#[derive(Debug)]
pub struct CachePool {
    engine: TemplateEngine,
    options: RenderOptions,
    idle: Mutex<Vec<RenderCache>>,
}

impl CachePool {
    pub fn new(engine: TemplateEngine, options: RenderOptions) -> Self {
        Self {
            engine,
            options,
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Take an idle cache, or start a new one if every cache is in use.
    pub fn lease(&self) -> CacheLease<'_> {
        let cache = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_else(|| RenderCache::new(self.engine.environment(self.options)));

        CacheLease {
            pool: self,
            cache: Some(cache),
        }
    }

    /// Number of caches currently idle in the pool.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn release(&self, cache: RenderCache) {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cache);
    }
}

/// Exclusive use of one cache; returned to its pool on drop.
#[derive(Debug)]
pub struct CacheLease<'a> {
    pool: &'a CachePool,
    cache: Option<RenderCache>,
}

impl Deref for CacheLease<'_> {
    type Target = RenderCache;

    fn deref(&self) -> &Self::Target {
        self.cache.as_ref().expect("cache present until drop")
    }
}

impl DerefMut for CacheLease<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cache.as_mut().expect("cache present until drop")
    }
}

impl Drop for CacheLease<'_> {
    fn drop(&mut self) {
        if let Some(cache) = self.cache.take() {
            self.pool.release(cache);
        }
    }
}
