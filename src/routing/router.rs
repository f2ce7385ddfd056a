//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Strip the mount path and the `/trimmer` prefix
//! - Try each predicate in order
//! - Return the matched route or `None` for passthrough
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins; the generic resources shape is tried last
//! - Explicit passthrough rather than silent default

use crate::routing::matcher::{
    ResourcesRoute, RouteMatch, RoutePredicate, TemplatesRoute, TranslationsRoute,
};

const TRIMMER_PREFIX: &str = "/trimmer";

/// Ordered list of trimmer route predicates.
#[derive(Debug)]
pub struct RouteTable {
    mount_path: String,
    routes: Vec<Box<dyn RoutePredicate>>,
}

impl RouteTable {
    /// Routes under `<mount_path>/trimmer`.
    pub fn new(mount_path: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            routes: vec![
                Box::new(TranslationsRoute),
                Box::new(TemplatesRoute),
                Box::new(ResourcesRoute),
            ],
        }
    }

    /// Classify a request path. `None` means the request is not ours.
    pub fn classify(&self, path: &str) -> Option<RouteMatch> {
        let rest = path
            .strip_prefix(self.mount_path.as_str())?
            .strip_prefix(TRIMMER_PREFIX)?;

        self.routes.iter().find_map(|route| route.capture(rest))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new("")
    }
}
