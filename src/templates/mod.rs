//! Template compilation subsystem.
//!
//! # Data Flow
//! ```text
//! templates root directory
//!     → compiler.rs (walk tree, derive keys, sorted nested map)
//!     → engine.rs (render one file with scope + locale, `t` function)
//!     → cache.rs (production only: compiled templates per worker)
//!     → Templates = (...);
//! ```
//!
//! # Design Decisions
//! - The locale is a render parameter, never ambient state
//! - Output key order is sorted at every level so payloads are reproducible
//! - Any render failure fails the whole tree

pub mod cache;
pub mod compiler;
pub mod engine;

pub use cache::{CacheLease, CachePool, RenderCache};
pub use compiler::{TemplateCompiler, TemplateNode, TemplateTree};
pub use engine::{RenderOptions, TemplateEngine};
