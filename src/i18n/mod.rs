//! Internationalization subsystem.
//!
//! # Data Flow
//! ```text
//! locale path segment
//!     → locale.rs (tag grammar check)
//!
//! ?allowed_keys=... query parameter
//!     → keys.rs (intersect with configured prefixes)
//!     → resolver.rs (default locale subtree, requested locale overlaid)
//!     → catalog.rs (TranslationStore lookups, key-path selection)
//!     → I18n.translations = (...);
//! ```
//!
//! # Design Decisions
//! - Catalog is loaded once at startup and never mutated
//! - Requested locale always wins over the default locale on collisions
//! - Unknown requested key prefixes are dropped, never reported

pub mod catalog;
pub mod keys;
pub mod locale;
pub mod resolver;

pub use catalog::{CatalogError, StaticCatalog, TranslationStore};
pub use keys::{effective_keys, AllowedKeys};
pub use locale::validate_locale;
pub use resolver::{deep_merge, TranslationResolver};
