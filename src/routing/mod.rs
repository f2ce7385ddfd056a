//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (strip mount path and /trimmer, ordered lookup)
//!     → matcher.rs (evaluate path shapes, capture locale/extension)
//!     → Return: RouteMatch or passthrough
//! ```
//!
//! # Design Decisions
//! - Routes fixed at startup, immutable at runtime
//! - Captured segments travel inside the RouteMatch, never via shared state
//! - Deterministic: same path always matches same route
//! - First match wins (translations, templates, resources)

pub mod matcher;
pub mod router;

pub use matcher::RouteMatch;
pub use router::RouteTable;
